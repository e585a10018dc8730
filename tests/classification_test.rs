//! Classification properties of the cycle detector, checked against
//! petgraph's strongly connected components

use std::collections::{BTreeSet, HashMap};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use pretty_assertions::assert_eq;
use wiring_guard::core::{ComponentId, EdgeOrigin, ExclusionCause};
use wiring_guard::detector::CycleDetector;
use wiring_guard::graph::DependencyGraph;

fn graph_of(edges: &[(&str, &str)]) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    for (from, to) in edges {
        graph.add_edge(*from, *to, EdgeOrigin::Static);
    }
    graph
}

fn excluded_names(detector: &CycleDetector) -> Vec<&str> {
    detector
        .excluded()
        .into_iter()
        .map(ComponentId::as_str)
        .collect()
}

fn live_names(graph: &DependencyGraph) -> Vec<String> {
    graph.all_nodes().map(|id| id.to_string()).collect()
}

#[test]
fn test_self_loop_is_excluded() {
    let mut graph = graph_of(&[("A", "A")]);
    let mut detector = CycleDetector::new();

    detector.run_classification(&mut graph);

    assert_eq!(excluded_names(&detector), vec!["A"]);
    assert!(graph.is_empty());
}

#[test]
fn test_simple_cycle_is_excluded() {
    let mut graph = graph_of(&[("A", "B"), ("B", "A")]);
    let mut detector = CycleDetector::new();

    detector.run_classification(&mut graph);

    assert_eq!(excluded_names(&detector), vec!["A", "B"]);
}

#[test]
fn test_partial_cycle_is_contained() {
    let mut graph = graph_of(&[("Root", "A"), ("A", "B"), ("B", "A")]);
    let mut detector = CycleDetector::new();

    let classification = detector.run_classification(&mut graph);

    assert_eq!(excluded_names(&detector), vec!["A", "B"]);
    assert_eq!(live_names(&graph), vec!["Root"]);
    assert!(
        classification
            .excluded
            .iter()
            .all(|event| event.cause == ExclusionCause::CycleMember)
    );
}

#[test]
fn test_diamond_is_accepted() {
    let mut graph = graph_of(&[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")]);
    let mut detector = CycleDetector::new();

    let classification = detector.run_classification(&mut graph);

    assert!(!classification.has_exclusions());
    assert_eq!(live_names(&graph), vec!["A", "B", "C", "D"]);
}

#[test]
fn test_repeated_runs_are_monotonic() {
    let mut graph = graph_of(&[("Root", "A"), ("A", "B"), ("B", "A"), ("Root", "C")]);
    let mut detector = CycleDetector::new();

    detector.run_classification(&mut graph);
    let first: Vec<String> = excluded_names(&detector)
        .into_iter()
        .map(String::from)
        .collect();

    let second = detector.run_classification(&mut graph);

    assert!(second.excluded.is_empty());
    assert_eq!(excluded_names(&detector), first);
    assert_eq!(live_names(&graph), vec!["C", "Root"]);
}

#[test]
fn test_incremental_cycle_is_excluded_on_next_pass() {
    let mut graph = graph_of(&[("app", "orders"), ("orders", "billing"), ("app", "audit")]);
    let mut detector = CycleDetector::new();

    assert!(!detector.run_classification(&mut graph).has_exclusions());

    graph.add_edge("billing", "orders", EdgeOrigin::Instance);
    let classification = detector.run_classification(&mut graph);

    let newly: Vec<&str> = classification
        .excluded
        .iter()
        .map(|event| event.component.as_str())
        .collect();
    assert_eq!(newly, vec!["billing", "orders"]);
    assert_eq!(live_names(&graph), vec!["app", "audit"]);
}

#[test]
fn test_edges_stay_mirrored() {
    let mut graph = graph_of(&[("a", "b"), ("b", "c"), ("c", "a"), ("a", "c"), ("d", "d")]);
    graph.add_edge("a", "b", EdgeOrigin::Instance);

    for node in graph.nodes() {
        for target in node.outgoing().keys() {
            let peer = graph.get(target).unwrap();
            assert!(peer.is_depended_on_by(node.key()));
        }
        for source in node.incoming().keys() {
            let peer = graph.get(source).unwrap();
            assert!(peer.depends_on(node.key()));
        }
    }
    assert_eq!(graph.edge_count(), 5);
}

/// Deterministic xorshift so generated graphs are reproducible
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}

fn generate(seed: u64) -> (Vec<String>, Vec<(String, String)>) {
    let mut rng = XorShift(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1);
    let count = 1 + rng.below(12) as usize;
    let names: Vec<String> = (0..count).map(|i| format!("n{i:02}")).collect();

    let mut edges = Vec::new();
    for from in &names {
        for to in &names {
            // sparse enough to leave acyclic pockets, dense enough for cycles
            if rng.below(100) < 15 {
                edges.push((from.clone(), to.clone()));
            }
        }
    }
    (names, edges)
}

/// Reference verdict: a node survives a pass on a fresh graph iff some root
/// reaches it and it lies on no cycle. Also returns the nodes on a cycle.
fn expected_exclusions(
    names: &[String],
    edges: &[(String, String)],
) -> (BTreeSet<String>, BTreeSet<String>) {
    let mut reference: DiGraph<String, ()> = DiGraph::new();
    let index: HashMap<&String, NodeIndex> = names
        .iter()
        .map(|name| (name, reference.add_node(name.clone())))
        .collect();
    for (from, to) in edges {
        reference.update_edge(index[from], index[to], ());
    }

    let mut on_cycle = BTreeSet::new();
    for component in tarjan_scc(&reference) {
        let looped = component.len() == 1 && reference.contains_edge(component[0], component[0]);
        if component.len() > 1 || looped {
            on_cycle.extend(component.into_iter().map(|n| reference[n].clone()));
        }
    }

    let mut reachable = BTreeSet::new();
    for root in reference.node_indices() {
        let has_dependents = reference
            .neighbors_directed(root, petgraph::Direction::Incoming)
            .next()
            .is_some();
        if has_dependents {
            continue;
        }
        let mut dfs = Dfs::new(&reference, root);
        while let Some(node) = dfs.next(&reference) {
            reachable.insert(reference[node].clone());
        }
    }

    let excluded = names
        .iter()
        .filter(|name| !reachable.contains(*name) || on_cycle.contains(*name))
        .cloned()
        .collect();
    (excluded, on_cycle)
}

#[test]
fn test_classification_matches_strongly_connected_components() {
    for seed in 0..300 {
        let (names, edges) = generate(seed);

        let mut graph = DependencyGraph::new();
        for name in &names {
            graph.register(name.as_str());
        }
        for (from, to) in &edges {
            graph.add_edge(from.as_str(), to.as_str(), EdgeOrigin::Static);
        }

        let mut detector = CycleDetector::new();
        let classification = detector.run_classification(&mut graph);

        let actual: BTreeSet<String> = classification
            .excluded
            .iter()
            .map(|event| event.component.to_string())
            .collect();
        let (expected, on_cycle) = expected_exclusions(&names, &edges);
        assert_eq!(actual, expected, "seed {seed}: edges {edges:?}");

        // Without host exclusions every unreached node hangs below a cycle
        for event in &classification.excluded {
            let cause = if on_cycle.contains(event.component.as_str()) {
                ExclusionCause::CycleMember
            } else {
                ExclusionCause::Unrooted
            };
            assert_eq!(event.cause, cause, "seed {seed}: {}", event.component);
        }

        // Survivors form an acyclic graph, so a second pass changes nothing
        let again = detector.run_classification(&mut graph);
        assert!(again.excluded.is_empty(), "seed {seed}: second pass excluded more");
        assert_eq!(graph.len() + actual.len(), names.len());
    }
}

#[test]
fn test_incremental_growth_never_resurrects() {
    for seed in 0..100 {
        let (names, edges) = generate(seed + 1_000);

        let mut graph = DependencyGraph::new();
        for name in &names {
            graph.register(name.as_str());
        }

        let mut detector = CycleDetector::new();
        let mut excluded_so_far = BTreeSet::new();

        for (from, to) in &edges {
            let from = ComponentId::from(from.as_str());
            let to = ComponentId::from(to.as_str());
            if detector.is_excluded(&from) || detector.is_excluded(&to) {
                continue;
            }
            graph.add_edge(from, to, EdgeOrigin::Instance);
            detector.run_classification(&mut graph);

            let now: BTreeSet<String> = detector
                .excluded()
                .into_iter()
                .map(|id| id.to_string())
                .collect();
            assert!(now.is_superset(&excluded_so_far), "seed {seed}");
            for id in &now {
                assert!(!graph.contains(&ComponentId::from(id.as_str())));
            }
            excluded_so_far = now;
        }
    }
}
