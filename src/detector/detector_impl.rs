use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use crate::core::{ComponentId, ExclusionCause, ExclusionEvent};
use crate::graph::DependencyGraph;

/// Classifies components as accepted or excluded
///
/// Holds the two host-facing sets: components permanently excluded, and
/// components the host has scanned. Both only ever grow. Each call to
/// [`run_classification`](Self::run_classification) walks the live graph from
/// its roots, evicts every component that is not accepted, and reports each
/// newly excluded component exactly once.
#[derive(Debug, Default, Clone)]
pub struct CycleDetector {
    excluded: HashSet<ComponentId>,
    scanned: HashSet<ComponentId>,
}

/// Result of one classification pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Live components after the pass, sorted
    pub accepted: Vec<ComponentId>,
    /// Components excluded by this pass, in identity order
    pub excluded: Vec<ExclusionEvent>,
    /// Number of roots the pass started from
    pub roots: usize,
}

impl Classification {
    pub fn has_exclusions(&self) -> bool {
        !self.excluded.is_empty()
    }
}

impl CycleDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_excluded(&self, key: &ComponentId) -> bool {
        self.excluded.contains(key)
    }

    pub fn is_scanned(&self, key: &ComponentId) -> bool {
        self.scanned.contains(key)
    }

    /// Returns `true` if the component was not excluded before.
    pub fn mark_excluded(&mut self, key: impl Into<ComponentId>) -> bool {
        self.excluded.insert(key.into())
    }

    /// Returns `true` if the component was not scanned before.
    pub fn mark_scanned(&mut self, key: impl Into<ComponentId>) -> bool {
        self.scanned.insert(key.into())
    }

    /// Excluded identities, sorted
    pub fn excluded(&self) -> Vec<&ComponentId> {
        let mut excluded: Vec<_> = self.excluded.iter().collect();
        excluded.sort();
        excluded
    }

    pub fn excluded_count(&self) -> usize {
        self.excluded.len()
    }

    pub fn scanned_count(&self) -> usize {
        self.scanned.len()
    }

    /// Run one classification pass over the live graph
    ///
    /// Only components still present in `graph` are considered. Every live
    /// component that is not accepted is added to the exclusion set and
    /// removed from `graph`; components the host had already excluded are
    /// evicted without a second notification. Safe to call at any point and
    /// any number of times.
    pub fn run_classification(&mut self, graph: &mut DependencyGraph) -> Classification {
        let roots = graph.roots();
        let (accepted, rejected, below_cycle) = {
            let mut walk = Walk::new(graph, &self.excluded);
            for root in &roots {
                walk.run_from(root);
            }
            let accepted = std::mem::take(&mut walk.accepted);

            // Nothing reached from here is accepted; the walk only tells
            // rootless cycles apart from what hangs below them.
            let stranded: Vec<ComponentId> = graph
                .all_nodes()
                .filter(|key| !walk.visited.contains(key) && !self.excluded.contains(key))
                .collect();
            for key in &stranded {
                walk.run_from(key);
            }

            let below_cycle = walk.downstream_of_rejected();
            (accepted, walk.rejected, below_cycle)
        };

        let mut classification = Classification {
            roots: roots.len(),
            ..Classification::default()
        };

        for key in graph.all_nodes() {
            if self.excluded.contains(&key) {
                graph.remove(&key);
                continue;
            }

            if accepted.contains(&key) && !rejected.contains(&key) {
                classification.accepted.push(key);
                continue;
            }

            let cause = if rejected.contains(&key) {
                ExclusionCause::CycleMember
            } else if below_cycle.contains(&key) {
                ExclusionCause::Unrooted
            } else {
                ExclusionCause::Detached
            };
            graph.remove(&key);
            self.excluded.insert(key.clone());
            classification.excluded.push(ExclusionEvent::new(key, cause));
        }

        debug!(
            roots = classification.roots,
            accepted = classification.accepted.len(),
            excluded = classification.excluded.len(),
            "classification pass complete"
        );

        classification
    }
}

/// One entry of the explicit DFS stack
struct Frame {
    key: ComponentId,
    /// Snapshot of the node's dependencies, sorted for reproducible walks
    edges: Vec<ComponentId>,
    next: usize,
    /// Discovery order of this node
    index: usize,
    /// Lowest discovery index reachable through the subtree and back edges
    low: usize,
}

/// State of a single classification pass
///
/// `path` is the current dependency chain from a root. Every node entered
/// stays on `open` until the strongly connected component it belongs to is
/// complete; `on_open` maps each such identity to its discovery index so the
/// "reaches back into the current chain" check is a single lookup. A finished
/// component of more than one node, or a node depending on itself, is a
/// cycle and every member is rejected. The same walk is reused for nodes no
/// root reached, so rootless cycles are rejected too.
struct Walk<'a> {
    graph: &'a DependencyGraph,
    excluded: &'a HashSet<ComponentId>,
    accepted: HashSet<ComponentId>,
    rejected: HashSet<ComponentId>,
    visited: HashSet<ComponentId>,
    path: Vec<Frame>,
    open: Vec<ComponentId>,
    on_open: HashMap<ComponentId, usize>,
}

impl<'a> Walk<'a> {
    fn new(graph: &'a DependencyGraph, excluded: &'a HashSet<ComponentId>) -> Self {
        Self {
            graph,
            excluded,
            accepted: HashSet::new(),
            rejected: HashSet::new(),
            visited: HashSet::new(),
            path: Vec::new(),
            open: Vec::new(),
            on_open: HashMap::new(),
        }
    }

    fn run_from(&mut self, root: &ComponentId) {
        if self.visited.contains(root) {
            return;
        }
        self.enter(root.clone());

        while let Some(frame) = self.path.last_mut() {
            let target = frame.edges.get(frame.next).cloned();
            frame.next += 1;

            match target {
                Some(target) => self.follow(target),
                None => self.leave(),
            }
        }
    }

    /// Push `key` onto the path unless it is excluded or already evicted
    fn enter(&mut self, key: ComponentId) {
        if self.excluded.contains(&key) {
            return;
        }
        let Some(node) = self.graph.get(&key) else {
            return;
        };

        let mut edges: Vec<ComponentId> = node.outgoing().keys().cloned().collect();
        edges.sort();

        let index = self.visited.len();
        self.visited.insert(key.clone());
        self.on_open.insert(key.clone(), index);
        self.open.push(key.clone());
        self.path.push(Frame {
            key,
            edges,
            next: 0,
            index,
            low: index,
        });
    }

    fn follow(&mut self, target: ComponentId) {
        if let Some(&index) = self.on_open.get(&target) {
            let Some(current) = self.path.last_mut() else {
                return;
            };
            if current.key == target {
                trace!(%target, "self-loop");
                self.rejected.insert(target);
                return;
            }
            current.low = current.low.min(index);
            return;
        }

        // Finished in an earlier component: nothing there reaches back here.
        if self.visited.contains(&target) {
            return;
        }

        self.enter(target);
    }

    /// Live nodes reachable from a rejected node
    fn downstream_of_rejected(&self) -> HashSet<ComponentId> {
        let mut reached = HashSet::new();
        let mut pending: Vec<&ComponentId> = self.rejected.iter().collect();

        while let Some(key) = pending.pop() {
            let Some(node) = self.graph.get(key) else {
                continue;
            };
            for target in node.outgoing().keys() {
                if self.excluded.contains(target) || !self.graph.contains(target) {
                    continue;
                }
                if reached.insert(target.clone()) {
                    pending.push(target);
                }
            }
        }

        reached
    }

    /// Pop the top of the path once all of its edges were followed
    fn leave(&mut self) {
        let Some(frame) = self.path.pop() else {
            return;
        };
        if let Some(parent) = self.path.last_mut() {
            parent.low = parent.low.min(frame.low);
        }
        if frame.low != frame.index {
            return;
        }

        let Some(start) = self.open.iter().rposition(|key| *key == frame.key) else {
            return;
        };
        let component: Vec<ComponentId> = self.open.drain(start..).collect();
        for key in &component {
            self.on_open.remove(key);
        }

        if component.len() > 1 {
            trace!(size = component.len(), head = %frame.key, "cycle closed");
            self.rejected.extend(component);
            return;
        }
        for key in component {
            if !self.rejected.contains(&key) {
                self.accepted.insert(key);
            }
        }
    }
}
