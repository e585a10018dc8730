use std::collections::HashMap;

use super::node::Node;
use crate::core::{ComponentId, EdgeOrigin};

/// Arena of component nodes keyed by identity
///
/// Every node lives here exactly once. Edges are recorded as a mirrored pair
/// of keys (`from.outgoing[to]` and `to.incoming[from]`), so a node and its
/// image in a peer's edge map can never diverge.
#[derive(Debug, Default, Clone)]
pub struct DependencyGraph {
    nodes: HashMap<ComponentId, Node>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
        }
    }

    /// Return the node for `key`, creating an empty one on first reference
    pub fn get_or_create(&mut self, key: impl Into<ComponentId>) -> &Node {
        self.entry(key.into())
    }

    /// Like [`get_or_create`](Self::get_or_create), but also records that the
    /// host registered the node itself rather than only naming it as a target.
    pub fn register(&mut self, key: impl Into<ComponentId>) -> &Node {
        let node = self.entry(key.into());
        node.mark_registered();
        node
    }

    fn entry(&mut self, key: ComponentId) -> &mut Node {
        self.nodes
            .entry(key)
            .or_insert_with_key(|key| Node::new(key.clone()))
    }

    /// Record that `from` depends on `to`
    ///
    /// Both nodes are created if missing. Returns `false` when the edge
    /// already existed, in which case nothing changes (the origin recorded
    /// first is kept). Self-loops are stored like any other edge.
    pub fn add_edge(
        &mut self,
        from: impl Into<ComponentId>,
        to: impl Into<ComponentId>,
        origin: EdgeOrigin,
    ) -> bool {
        let from = from.into();
        let to = to.into();

        let inserted = self.entry(from.clone()).insert_outgoing(to.clone(), origin);
        let mirrored = self.entry(to).insert_incoming(from, origin);
        debug_assert_eq!(inserted, mirrored, "edge maps out of sync");

        inserted
    }

    /// Evict a node from the registry
    ///
    /// Peers keep their references to the evicted key. Those references are
    /// dead weight: traversals treat keys missing from the registry as
    /// excluded.
    pub fn remove(&mut self, key: &ComponentId) -> Option<Node> {
        self.nodes.remove(key)
    }

    pub fn get(&self, key: &ComponentId) -> Option<&Node> {
        self.nodes.get(key)
    }

    pub fn contains(&self, key: &ComponentId) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over the live nodes in unspecified order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Snapshot of the live identities, sorted
    ///
    /// The snapshot owns its keys, so the registry may be mutated (including
    /// removals) while it is consumed; look each key up again with
    /// [`get`](Self::get) and skip the ones that are gone.
    pub fn all_nodes(&self) -> NodeSnapshot {
        let mut keys: Vec<ComponentId> = self.nodes.keys().cloned().collect();
        keys.sort();
        NodeSnapshot {
            keys: keys.into_iter(),
        }
    }

    /// Whether no live node depends on `key`
    ///
    /// Dangling keys of evicted dependents are ignored.
    pub fn is_root(&self, key: &ComponentId) -> bool {
        self.nodes.get(key).is_some_and(|node| {
            node.incoming()
                .keys()
                .all(|dependent| !self.nodes.contains_key(dependent))
        })
    }

    /// Live nodes that no live node depends on, sorted
    pub fn roots(&self) -> Vec<ComponentId> {
        self.all_nodes().filter(|key| self.is_root(key)).collect()
    }

    /// All edges whose source is live, sorted by `(from, to)`
    pub fn edges(&self) -> Vec<(ComponentId, ComponentId, EdgeOrigin)> {
        let mut edges: Vec<_> = self
            .nodes
            .values()
            .flat_map(|node| {
                node.outgoing()
                    .iter()
                    .map(|(to, origin)| (node.key().clone(), to.clone(), *origin))
            })
            .collect();
        edges.sort_by(|a, b| (&a.0, &a.1).cmp(&(&b.0, &b.1)));
        edges
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|node| node.outgoing().len()).sum()
    }
}

/// Owned, restartable sequence of identities taken from a [`DependencyGraph`]
#[derive(Debug, Clone)]
pub struct NodeSnapshot {
    keys: std::vec::IntoIter<ComponentId>,
}

impl Iterator for NodeSnapshot {
    type Item = ComponentId;

    fn next(&mut self) -> Option<Self::Item> {
        self.keys.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl ExactSizeIterator for NodeSnapshot {}
