//! # Startup Session
//!
//! The surface a host lifecycle manager talks to while it brings components
//! up one at a time: register a component, declare its static dependencies,
//! report dependencies found on the live instance, and re-run classification
//! whenever it wants an up-to-date verdict.
//!
//! ## Example
//!
//! ```
//! use wiring_guard::core::ComponentId;
//! use wiring_guard::session::StartupSession;
//!
//! let mut session = StartupSession::new();
//! for name in ["app", "orders", "billing"] {
//!     session.register_node(name);
//!     session.mark_scanned(name);
//! }
//! session.register_static_edge("app", "orders");
//! session.report_instance_edge("orders", "billing");
//! session.report_instance_edge("billing", "orders");
//!
//! session.run_classification();
//!
//! assert!(!session.is_excluded(&ComponentId::from("app")));
//! assert!(session.is_excluded(&ComponentId::from("billing")));
//! ```

mod session_impl;
mod shared;

pub use session_impl::{Admission, Advisory, EdgeReport, StartupSession};
pub use shared::SharedSession;
