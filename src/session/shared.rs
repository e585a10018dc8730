use std::sync::Arc;

use parking_lot::Mutex;

use super::session_impl::{Admission, EdgeReport, StartupSession};
use crate::core::ComponentId;
use crate::detector::Classification;
use crate::eligibility::{ComponentDescriptor, EligibilityRules};

/// A [`StartupSession`] shared between threads
///
/// Hosts that instantiate components concurrently clone this handle into
/// each worker. One lock guards registry mutation and classification passes
/// alike, so no edge insertion can interleave with a pass.
#[derive(Debug, Clone, Default)]
pub struct SharedSession {
    inner: Arc<Mutex<StartupSession>>,
}

impl SharedSession {
    pub fn new(session: StartupSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Run `f` with exclusive access to the session
    pub fn with<R>(&self, f: impl FnOnce(&mut StartupSession) -> R) -> R {
        f(&mut self.inner.lock())
    }

    pub fn register_node(&self, id: impl Into<ComponentId>) -> bool {
        self.inner.lock().register_node(id)
    }

    pub fn register_static_edge(
        &self,
        from: impl Into<ComponentId>,
        to: impl Into<ComponentId>,
    ) -> EdgeReport {
        self.inner.lock().register_static_edge(from, to)
    }

    pub fn report_instance_edge(
        &self,
        from: impl Into<ComponentId>,
        to: impl Into<ComponentId>,
    ) -> EdgeReport {
        self.inner.lock().report_instance_edge(from, to)
    }

    pub fn mark_scanned(&self, id: impl Into<ComponentId>) -> bool {
        self.inner.lock().mark_scanned(id)
    }

    pub fn is_scanned(&self, id: &ComponentId) -> bool {
        self.inner.lock().is_scanned(id)
    }

    pub fn mark_excluded(&self, id: impl Into<ComponentId>) -> bool {
        self.inner.lock().mark_excluded(id)
    }

    pub fn is_excluded(&self, id: &ComponentId) -> bool {
        self.inner.lock().is_excluded(id)
    }

    pub fn admit(&self, descriptor: &ComponentDescriptor, rules: &EligibilityRules) -> Admission {
        self.inner.lock().admit(descriptor, rules)
    }

    pub fn run_classification(&self) -> Classification {
        self.inner.lock().run_classification()
    }

    /// Take the session back once every other handle is gone
    pub fn into_inner(self) -> Option<StartupSession> {
        Arc::into_inner(self.inner).map(|session| session.into_inner())
    }
}

impl From<StartupSession> for SharedSession {
    fn from(session: StartupSession) -> Self {
        Self::new(session)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn test_concurrent_registration_and_classification() {
        let shared = SharedSession::default();

        thread::scope(|scope| {
            for worker in 0..8 {
                let shared = shared.clone();
                scope.spawn(move || {
                    let name = format!("svc-{worker}");
                    shared.register_node(name.as_str());
                    shared.mark_scanned(name.as_str());
                    shared.report_instance_edge(name.as_str(), "shared-db");
                    shared.run_classification();
                });
            }
        });

        let classification = shared.run_classification();
        assert_eq!(classification.accepted.len(), 9);
        assert!(!classification.has_exclusions());

        let session = shared.into_inner().unwrap();
        assert_eq!(session.graph().edge_count(), 8);
        assert!(session.advisories().is_empty());
    }

    #[test]
    fn test_into_inner_with_live_handles() {
        let shared = SharedSession::default();
        let other = shared.clone();
        assert!(shared.into_inner().is_none());
        assert!(other.with(|session| session.graph().is_empty()));
    }
}
