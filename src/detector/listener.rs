//! Exclusion notifications
//!
//! The detector never reports a cycle as an error. Instead every newly
//! excluded component is handed to an [`ExclusionListener`] so operators can
//! see what was skipped and why.

use tracing::warn;

use crate::core::ExclusionEvent;

/// Receives one call per newly excluded component
pub trait ExclusionListener {
    fn on_exclusion(&mut self, event: &ExclusionEvent);
}

impl<F> ExclusionListener for F
where
    F: FnMut(&ExclusionEvent),
{
    fn on_exclusion(&mut self, event: &ExclusionEvent) {
        self(event)
    }
}

/// Default listener: one `warn!` per exclusion
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingListener;

impl ExclusionListener for TracingListener {
    fn on_exclusion(&mut self, event: &ExclusionEvent) {
        warn!(
            component = %event.component,
            cause = ?event.cause,
            "Excluding component `{}` because {}",
            event.component,
            event.cause
        );
    }
}

/// Collects events in memory, optionally forwarding them to another listener
#[derive(Default)]
pub struct RecordingListener {
    events: Vec<ExclusionEvent>,
    forward: Option<Box<dyn ExclusionListener + Send>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn forwarding_to(listener: impl ExclusionListener + Send + 'static) -> Self {
        Self {
            events: Vec::new(),
            forward: Some(Box::new(listener)),
        }
    }

    pub fn events(&self) -> &[ExclusionEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<ExclusionEvent> {
        self.events
    }
}

impl ExclusionListener for RecordingListener {
    fn on_exclusion(&mut self, event: &ExclusionEvent) {
        if let Some(forward) = self.forward.as_mut() {
            forward.on_exclusion(event);
        }
        self.events.push(event.clone());
    }
}
