//! # Component Graph Module
//!
//! This module holds the dependency graph of host-managed components and
//! renders it for humans.
//!
//! ## Components
//!
//! ### Graph Storage
//! - **DependencyGraph**: arena of nodes keyed by component identity, with
//!   idempotent node creation and edge registration
//! - **Node**: one component with its mirrored dependency and dependent maps
//!
//! ### Graph Rendering
//! - **GraphRenderer**: renders the live graph plus excluded components as
//!   DOT or Mermaid
//!
//! ## Example
//!
//! ```
//! use wiring_guard::core::{ComponentId, EdgeOrigin};
//! use wiring_guard::graph::DependencyGraph;
//!
//! let mut graph = DependencyGraph::new();
//! graph.register("web");
//! graph.add_edge("web", "sessions", EdgeOrigin::Static);
//! graph.add_edge("web", "sessions", EdgeOrigin::Instance);
//!
//! assert_eq!(graph.len(), 2);
//! assert_eq!(graph.edge_count(), 1);
//! assert!(graph.is_root(&ComponentId::from("web")));
//! ```

mod node;
mod registry;
mod renderer;

pub use node::Node;
pub use registry::{DependencyGraph, NodeSnapshot};
pub use renderer::{GraphRenderer, RenderFormat};
