//! Core type definitions
//!
//! This module contains the basic data structures shared by the graph, the
//! detector and the startup session, with minimal logic - focusing on data
//! representation.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a host-managed component
///
/// Two components with the same identity are the same component. The
/// identity is opaque to the graph; hosts typically use a fully qualified
/// type or bean name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(String);

impl ComponentId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for ComponentId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&ComponentId> for ComponentId {
    fn from(id: &ComponentId) -> Self {
        id.clone()
    }
}

impl Borrow<str> for ComponentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// How a dependency edge became known
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeOrigin {
    /// Ordering-only dependency declared before instantiation
    Static,
    /// Dependency discovered by inspecting a live instance
    Instance,
}

impl fmt::Display for EdgeOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeOrigin::Static => write!(f, "static"),
            EdgeOrigin::Instance => write!(f, "instance"),
        }
    }
}

/// Why a component failed the eligibility scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IneligibleReason {
    Sealed,
    NotConcrete,
    Annotation,
    NotSingleton,
    OptedOut,
    OutsideScanPath,
    Infrastructure,
}

impl IneligibleReason {
    pub fn describe(&self) -> &'static str {
        match self {
            IneligibleReason::Sealed => "it is sealed and cannot be proxied",
            IneligibleReason::NotConcrete => "it is an abstract type or interface",
            IneligibleReason::Annotation => "it is an annotation type",
            IneligibleReason::NotSingleton => "it is not a singleton",
            IneligibleReason::OptedOut => "it is marked for manual exclusion",
            IneligibleReason::OutsideScanPath => "it is outside the scan path",
            IneligibleReason::Infrastructure => "it is a container extension",
        }
    }
}

impl fmt::Display for IneligibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Why a component left the live set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "reason")]
pub enum ExclusionCause {
    /// The component sits on a detected dependency cycle
    CycleMember,
    /// Not reachable from a live root, only from a cycle that has no live
    /// root either
    Unrooted,
    /// Not reachable from a live root because every path to it runs through
    /// a component excluded earlier
    Detached,
    /// The eligibility scan rejected the component
    Ineligible(IneligibleReason),
    /// The host excluded the component directly
    Manual,
}

impl ExclusionCause {
    /// Whether a dependency cycle caused the exclusion
    pub fn is_structural(&self) -> bool {
        matches!(self, ExclusionCause::CycleMember | ExclusionCause::Unrooted)
    }

    /// Short tag used in reports and rendered graphs
    pub fn tag(&self) -> &'static str {
        match self {
            ExclusionCause::CycleMember => "cycle",
            ExclusionCause::Unrooted => "unrooted",
            ExclusionCause::Detached => "detached",
            ExclusionCause::Ineligible(_) => "ineligible",
            ExclusionCause::Manual => "manual",
        }
    }
}

impl fmt::Display for ExclusionCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionCause::CycleMember => write!(f, "it's in a circular dependency"),
            ExclusionCause::Unrooted => {
                write!(f, "it's only reachable through a circular dependency")
            }
            ExclusionCause::Detached => {
                write!(f, "it's only reachable through an excluded component")
            }
            ExclusionCause::Ineligible(reason) => write!(f, "{reason}"),
            ExclusionCause::Manual => write!(f, "the host excluded it"),
        }
    }
}

/// Notification emitted once per newly excluded component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionEvent {
    pub component: ComponentId,
    pub cause: ExclusionCause,
}

impl ExclusionEvent {
    pub fn new(component: ComponentId, cause: ExclusionCause) -> Self {
        Self { component, cause }
    }
}
