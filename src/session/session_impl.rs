use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::core::{ComponentId, EdgeOrigin, ExclusionCause, ExclusionEvent, IneligibleReason};
use crate::detector::{Classification, CycleDetector, ExclusionListener, TracingListener};
use crate::eligibility::{ComponentDescriptor, EligibilityRules};
use crate::graph::DependencyGraph;

/// Outcome of reporting a dependency edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeReport {
    /// The edge is in the graph; `new` is `false` if it was already there
    Recorded { new: bool },
    /// The edge is in the graph, but its source was never scanned
    Advisory { new: bool },
    /// One end is excluded, so the graph was left untouched
    Ignored,
}

impl EdgeReport {
    /// Whether the graph was left untouched because one end is excluded
    pub fn is_ignored(&self) -> bool {
        matches!(self, EdgeReport::Ignored)
    }

    /// Whether this call added an edge that was not there before
    pub fn is_new(&self) -> bool {
        matches!(
            self,
            EdgeReport::Recorded { new: true } | EdgeReport::Advisory { new: true }
        )
    }
}

/// Outcome of [`StartupSession::admit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    Rejected(IneligibleReason),
    AlreadyExcluded,
}

/// Host misuse worth logging: an instance edge reported for a component that
/// was never scanned
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advisory {
    pub source: ComponentId,
    pub target: ComponentId,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "component `{}` was never scanned but reported a dependency on `{}`",
            self.source, self.target
        )
    }
}

/// Dependency graph and detector for one startup sequence
///
/// The host lifecycle manager owns a session from the first component
/// registration until startup finishes. Every operation the host needs
/// between instantiation steps goes through here.
pub struct StartupSession {
    graph: DependencyGraph,
    detector: CycleDetector,
    listener: Box<dyn ExclusionListener + Send>,
    ledger: Vec<ExclusionEvent>,
    advisories: Vec<Advisory>,
    passes: usize,
}

impl Default for StartupSession {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StartupSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StartupSession")
            .field("graph", &self.graph)
            .field("detector", &self.detector)
            .field("ledger", &self.ledger)
            .field("advisories", &self.advisories)
            .field("passes", &self.passes)
            .finish_non_exhaustive()
    }
}

impl StartupSession {
    /// Session whose exclusion notifications go to `tracing`
    pub fn new() -> Self {
        Self::with_listener(TracingListener)
    }

    pub fn with_listener(listener: impl ExclusionListener + Send + 'static) -> Self {
        Self {
            graph: DependencyGraph::new(),
            detector: CycleDetector::new(),
            listener: Box::new(listener),
            ledger: Vec::new(),
            advisories: Vec::new(),
            passes: 0,
        }
    }

    /// Register a discoverable component. Returns `false` if it was already
    /// registered.
    pub fn register_node(&mut self, id: impl Into<ComponentId>) -> bool {
        let id = id.into();
        let already = self.graph.get(&id).is_some_and(|node| node.is_registered());
        self.graph.register(id);
        !already
    }

    /// Record an ordering dependency declared before instantiation
    pub fn register_static_edge(
        &mut self,
        from: impl Into<ComponentId>,
        to: impl Into<ComponentId>,
    ) -> EdgeReport {
        let from = from.into();
        let to = to.into();
        if self.touches_excluded(&from, &to) {
            return EdgeReport::Ignored;
        }

        let new = self.graph.add_edge(from, to, EdgeOrigin::Static);
        EdgeReport::Recorded { new }
    }

    /// Record a dependency discovered by inspecting a live instance
    ///
    /// Idempotent. An unscanned source still gets its edge, and the call is
    /// flagged as an advisory.
    pub fn report_instance_edge(
        &mut self,
        from: impl Into<ComponentId>,
        to: impl Into<ComponentId>,
    ) -> EdgeReport {
        let from = from.into();
        let to = to.into();
        if self.touches_excluded(&from, &to) {
            return EdgeReport::Ignored;
        }

        let scanned = self.detector.is_scanned(&from);
        let new = self.graph.add_edge(from.clone(), to.clone(), EdgeOrigin::Instance);
        if scanned {
            return EdgeReport::Recorded { new };
        }

        if new {
            let advisory = Advisory {
                source: from,
                target: to,
            };
            warn!("{advisory}");
            self.advisories.push(advisory);
        }
        EdgeReport::Advisory { new }
    }

    fn touches_excluded(&self, from: &ComponentId, to: &ComponentId) -> bool {
        let excluded = self.detector.is_excluded(from) || self.detector.is_excluded(to);
        if excluded {
            debug!(%from, %to, "ignoring edge touching an excluded component");
        }
        excluded
    }

    pub fn mark_scanned(&mut self, id: impl Into<ComponentId>) -> bool {
        self.detector.mark_scanned(id)
    }

    pub fn is_scanned(&self, id: &ComponentId) -> bool {
        self.detector.is_scanned(id)
    }

    pub fn is_excluded(&self, id: &ComponentId) -> bool {
        self.detector.is_excluded(id)
    }

    /// Exclude a component on the host's own authority
    ///
    /// The component stays in the graph until the next classification pass
    /// evicts it.
    pub fn mark_excluded(&mut self, id: impl Into<ComponentId>) -> bool {
        self.exclude(id.into(), ExclusionCause::Manual)
    }

    fn exclude(&mut self, id: ComponentId, cause: ExclusionCause) -> bool {
        if !self.detector.mark_excluded(id.clone()) {
            return false;
        }
        self.notify(ExclusionEvent::new(id, cause));
        true
    }

    fn notify(&mut self, event: ExclusionEvent) {
        self.listener.on_exclusion(&event);
        self.ledger.push(event);
    }

    /// Screen a component and, when eligible, register it with its static
    /// dependencies and mark it scanned
    pub fn admit(
        &mut self,
        descriptor: &ComponentDescriptor,
        rules: &EligibilityRules,
    ) -> Admission {
        if self.detector.is_excluded(&descriptor.name) {
            return Admission::AlreadyExcluded;
        }

        if let Err(reason) = rules.check(descriptor) {
            self.exclude(descriptor.name.clone(), ExclusionCause::Ineligible(reason));
            return Admission::Rejected(reason);
        }

        self.register_node(descriptor.name.clone());
        for target in &descriptor.depends_on {
            self.register_static_edge(descriptor.name.clone(), target.clone());
        }
        self.mark_scanned(descriptor.name.clone());

        Admission::Admitted
    }

    /// Run a classification pass and notify the listener of every newly
    /// excluded component
    pub fn run_classification(&mut self) -> Classification {
        self.passes += 1;
        let classification = self.detector.run_classification(&mut self.graph);
        for event in &classification.excluded {
            self.notify(event.clone());
        }
        classification
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    pub fn detector(&self) -> &CycleDetector {
        &self.detector
    }

    /// Every exclusion so far, in the order it was announced
    pub fn exclusions(&self) -> &[ExclusionEvent] {
        &self.ledger
    }

    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    /// Number of classification passes run
    pub fn passes(&self) -> usize {
        self.passes
    }
}
