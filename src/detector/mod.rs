//! # Cycle Detection Module
//!
//! This module classifies the components of a [`DependencyGraph`] as accepted
//! or excluded.
//!
//! ## Algorithm
//!
//! Starting from every root (a live component no live component depends on),
//! we walk dependencies depth-first with an explicit stack holding the
//! current path. A dependency on a component still in the open chain closes
//! a cycle. Every component on it is rejected, along with every component
//! that depends on itself. A component is accepted once its dependencies are
//! finished and it was never rejected. After all roots were walked, every
//! live component that is not accepted is excluded and evicted from the
//! graph.
//!
//! Open components are tracked with discovery indices and low-links, so each
//! component is entered at most once per pass no matter how many paths reach
//! it, and a component joining a cycle through a second path is still
//! rejected. The walk is iterative, so deep dependency chains never grow the
//! call stack.
//!
//! ## Example
//!
//! ```
//! use wiring_guard::core::{ComponentId, EdgeOrigin, ExclusionCause};
//! use wiring_guard::detector::CycleDetector;
//! use wiring_guard::graph::DependencyGraph;
//!
//! let mut graph = DependencyGraph::new();
//! graph.add_edge("app", "orders", EdgeOrigin::Static);
//! graph.add_edge("orders", "billing", EdgeOrigin::Instance);
//! graph.add_edge("billing", "orders", EdgeOrigin::Instance);
//!
//! let mut detector = CycleDetector::new();
//! let classification = detector.run_classification(&mut graph);
//!
//! assert_eq!(classification.accepted, vec![ComponentId::from("app")]);
//! assert!(detector.is_excluded(&ComponentId::from("orders")));
//! assert!(detector.is_excluded(&ComponentId::from("billing")));
//! assert!(
//!     classification
//!         .excluded
//!         .iter()
//!         .all(|event| event.cause == ExclusionCause::CycleMember)
//! );
//! ```
//!
//! [`DependencyGraph`]: crate::graph::DependencyGraph

mod detector_impl;
mod listener;

pub use detector_impl::*;
pub use listener::{ExclusionListener, RecordingListener, TracingListener};
