//! Graph nodes
//!
//! A node holds its identity and the two mirrored edge maps. Peers are
//! referenced by identity only; the [`DependencyGraph`](super::DependencyGraph)
//! owns every node.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::core::{ComponentId, EdgeOrigin};

/// A component vertex in the dependency graph
#[derive(Debug, Clone)]
pub struct Node {
    key: ComponentId,

    /// Whether the host registered this node itself, as opposed to the node
    /// being created because an edge named it as a target.
    registered: bool,

    /// Components this node depends on.
    outgoing: HashMap<ComponentId, EdgeOrigin>,

    /// Components that depend on this node.
    incoming: HashMap<ComponentId, EdgeOrigin>,
}

impl Node {
    pub(crate) fn new(key: ComponentId) -> Self {
        Self {
            key,
            registered: false,
            outgoing: HashMap::new(),
            incoming: HashMap::new(),
        }
    }

    pub fn key(&self) -> &ComponentId {
        &self.key
    }

    /// Whether the host registered this node explicitly
    pub fn is_registered(&self) -> bool {
        self.registered
    }

    pub(crate) fn mark_registered(&mut self) {
        self.registered = true;
    }

    /// Dependencies of this node, with the origin of each edge
    pub fn outgoing(&self) -> &HashMap<ComponentId, EdgeOrigin> {
        &self.outgoing
    }

    /// Dependents of this node, with the origin of each edge
    pub fn incoming(&self) -> &HashMap<ComponentId, EdgeOrigin> {
        &self.incoming
    }

    pub fn depends_on(&self, key: &ComponentId) -> bool {
        self.outgoing.contains_key(key)
    }

    pub fn is_depended_on_by(&self, key: &ComponentId) -> bool {
        self.incoming.contains_key(key)
    }

    /// Returns `false` if the edge was already present.
    pub(crate) fn insert_outgoing(&mut self, to: ComponentId, origin: EdgeOrigin) -> bool {
        if self.outgoing.contains_key(&to) {
            return false;
        }
        self.outgoing.insert(to, origin);
        true
    }

    pub(crate) fn insert_incoming(&mut self, from: ComponentId, origin: EdgeOrigin) -> bool {
        if self.incoming.contains_key(&from) {
            return false;
        }
        self.incoming.insert(from, origin);
        true
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}
