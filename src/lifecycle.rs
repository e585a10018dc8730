//! Startup replay
//!
//! Drives a [`StartupSession`] the way a dependency-injection container
//! would while starting up the components of a [`ComponentCatalog`]:
//!
//! 1. **Scan**: every declared component goes through the eligibility scan;
//!    eligible ones are registered together with their `depends_on` edges.
//! 2. **Instantiate**: components are brought up in declaration order. The
//!    dependencies injected into each instance are reported as instance
//!    edges, following newly discovered dependencies transitively, and a
//!    classification pass runs after every component.
//! 3. A final classification pass settles the verdict.
//!
//! Eviction drops an excluded component's edges from the session graph, so
//! the replay also keeps an append-only copy of every edge it reported for
//! rendering.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::{ComponentId, EdgeOrigin, ExclusionEvent};
use crate::eligibility::EligibilityRules;
use crate::graph::DependencyGraph;
use crate::manifest::ComponentCatalog;
use crate::session::{Admission, Advisory, StartupSession};

/// Everything the replay learned about one startup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StartupReport {
    /// Number of components declared in the manifests
    pub declared: usize,
    /// Components still live after the final pass, sorted
    pub accepted: Vec<ComponentId>,
    /// Accepted components that were only ever named as a dependency
    pub implicit: Vec<ComponentId>,
    /// Exclusions in the order they were announced
    pub exclusions: Vec<ExclusionEvent>,
    pub advisories: Vec<Advisory>,
    /// Classification passes run
    pub passes: usize,
}

impl StartupReport {
    /// Summarize the current state of a session
    pub fn from_session(session: &StartupSession, declared: usize) -> Self {
        let graph = session.graph();
        let accepted: Vec<ComponentId> = graph.all_nodes().collect();
        let implicit = accepted
            .iter()
            .filter(|id| graph.get(id).is_some_and(|node| !node.is_registered()))
            .cloned()
            .collect();

        Self {
            declared,
            accepted,
            implicit,
            exclusions: session.exclusions().to_vec(),
            advisories: session.advisories().to_vec(),
            passes: session.passes(),
        }
    }

    /// Whether any component was excluded by a classification pass, as
    /// opposed to the eligibility scan or the host
    pub fn has_cycle_exclusions(&self) -> bool {
        self.exclusions.iter().any(|event| event.cause.is_structural())
    }

    pub fn cycle_exclusions(&self) -> impl Iterator<Item = &ExclusionEvent> {
        self.exclusions
            .iter()
            .filter(|event| event.cause.is_structural())
    }
}

/// Replays a catalog against a session
pub struct LifecycleReplay<'a> {
    catalog: &'a ComponentCatalog,
    rules: EligibilityRules,
    instantiated: HashSet<ComponentId>,
    observed: DependencyGraph,
}

impl<'a> LifecycleReplay<'a> {
    /// Rules come from the catalog's scan prefix unless `scan_prefix`
    /// overrides it
    pub fn new(catalog: &'a ComponentCatalog, scan_prefix: Option<String>) -> Self {
        let scan_prefix = scan_prefix.or_else(|| catalog.scan_prefix().map(str::to_string));
        Self {
            catalog,
            rules: EligibilityRules::new(scan_prefix),
            instantiated: HashSet::new(),
            observed: DependencyGraph::new(),
        }
    }

    pub fn rules(&self) -> &EligibilityRules {
        &self.rules
    }

    /// Every admitted component and every edge reported so far, including
    /// those of components excluded since
    pub fn observed(&self) -> &DependencyGraph {
        &self.observed
    }

    /// Run the full startup and summarize it
    pub fn run(&mut self, session: &mut StartupSession) -> StartupReport {
        info!(
            components = self.catalog.len(),
            scan_prefix = self.rules.scan_prefix.as_deref().unwrap_or("<none>"),
            "starting component scan"
        );
        self.scan(session);

        for descriptor in self.catalog.descriptors() {
            self.instantiate(session, &descriptor.name);
            session.run_classification();
        }
        session.run_classification();

        let report = StartupReport::from_session(session, self.catalog.len());
        info!(
            accepted = report.accepted.len(),
            excluded = report.exclusions.len(),
            passes = report.passes,
            "startup replay complete"
        );
        report
    }

    fn scan(&mut self, session: &mut StartupSession) {
        for descriptor in self.catalog.descriptors() {
            match session.admit(descriptor, &self.rules) {
                Admission::Admitted => {
                    debug!(component = %descriptor.name, "admitted");
                    self.observed.register(&descriptor.name);
                    let Some(node) = session.graph().get(&descriptor.name) else {
                        continue;
                    };
                    // Static edges to excluded targets were never recorded
                    for target in &descriptor.depends_on {
                        if node.depends_on(target) {
                            self.observed
                                .add_edge(&descriptor.name, target, EdgeOrigin::Static);
                        }
                    }
                }
                Admission::Rejected(_) | Admission::AlreadyExcluded => {}
            }
        }
    }

    /// Report the instance edges of `id`, following newly discovered
    /// dependencies into their own injected dependencies
    fn instantiate(&mut self, session: &mut StartupSession, id: &ComponentId) {
        let mut pending = vec![id.clone()];

        while let Some(current) = pending.pop() {
            if session.is_excluded(&current) || !session.is_scanned(&current) {
                continue;
            }
            if !self.instantiated.insert(current.clone()) {
                continue;
            }
            let Some(descriptor) = self.catalog.get(&current) else {
                continue;
            };

            for target in &descriptor.injects {
                if self.catalog.get(target).is_none() && !session.graph().contains(target) {
                    warn!(
                        "Component `{}` injects `{}`, but no such component is declared",
                        descriptor.display_name(),
                        target
                    );
                    continue;
                }

                let report = session.report_instance_edge(current.clone(), target.clone());
                if report.is_ignored() {
                    continue;
                }
                self.observed
                    .add_edge(&current, target, EdgeOrigin::Instance);
                if report.is_new() {
                    pending.push(target.clone());
                }
            }
        }
    }
}
