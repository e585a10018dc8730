//! Eligibility scan
//!
//! Before any dependency edge is recorded, the host screens every
//! discoverable component. Components that can never be managed safely
//! (sealed types, abstract types, prototypes, container extensions, ...)
//! are excluded up front and never enter the dependency graph.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{ComponentId, IneligibleReason};

/// What sort of type backs a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    #[default]
    Concrete,
    Abstract,
    Interface,
    Annotation,
}

/// Instantiation policy of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentScope {
    #[default]
    Singleton,
    Prototype,
}

/// Everything the host knows about a component before instantiating it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentDescriptor {
    /// Fully qualified identity
    pub name: ComponentId,
    /// Short name the host container uses
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub kind: ComponentKind,
    #[serde(default)]
    pub scope: ComponentScope,
    /// The type cannot be subclassed, so it cannot be proxied
    #[serde(default)]
    pub sealed: bool,
    /// Manual exclusion marker
    #[serde(default)]
    pub opt_out: bool,
    /// The component extends the container itself (post-processors and such)
    #[serde(default)]
    pub infrastructure: bool,
    /// Ordering dependencies declared up front
    #[serde(default)]
    pub depends_on: Vec<ComponentId>,
    /// Dependencies injected into the live instance
    #[serde(default)]
    pub injects: Vec<ComponentId>,
}

impl ComponentDescriptor {
    pub fn new(name: impl Into<ComponentId>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            kind: ComponentKind::default(),
            scope: ComponentScope::default(),
            sealed: false,
            opt_out: false,
            infrastructure: false,
            depends_on: Vec::new(),
            injects: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: ComponentKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_scope(mut self, scope: ComponentScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_sealed(mut self, sealed: bool) -> Self {
        self.sealed = sealed;
        self
    }

    pub fn with_opt_out(mut self, opt_out: bool) -> Self {
        self.opt_out = opt_out;
        self
    }

    pub fn with_infrastructure(mut self, infrastructure: bool) -> Self {
        self.infrastructure = infrastructure;
        self
    }

    pub fn depends_on(mut self, target: impl Into<ComponentId>) -> Self {
        self.depends_on.push(target.into());
        self
    }

    pub fn injects(mut self, target: impl Into<ComponentId>) -> Self {
        self.injects.push(target.into());
        self
    }

    /// Name used in log lines: the alias when there is one
    pub fn display_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(self.name.as_str())
    }
}

/// Rules applied by the eligibility scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EligibilityRules {
    /// Only components whose name starts with this prefix are managed
    pub scan_prefix: Option<String>,
}

impl EligibilityRules {
    pub fn new(scan_prefix: Option<String>) -> Self {
        Self { scan_prefix }
    }

    /// Screen one component
    ///
    /// Reasons are checked in a fixed order and the first failing one is
    /// returned.
    pub fn check(&self, descriptor: &ComponentDescriptor) -> Result<(), IneligibleReason> {
        let verdict = self.first_failure(descriptor);
        if let Err(reason) = verdict {
            info!(
                component = %descriptor.name,
                ?reason,
                "Excluding component `{}` because {}",
                descriptor.display_name(),
                reason
            );
        }
        verdict
    }

    fn first_failure(&self, descriptor: &ComponentDescriptor) -> Result<(), IneligibleReason> {
        if descriptor.sealed {
            return Err(IneligibleReason::Sealed);
        }

        match descriptor.kind {
            ComponentKind::Abstract | ComponentKind::Interface => {
                return Err(IneligibleReason::NotConcrete);
            }
            ComponentKind::Annotation => return Err(IneligibleReason::Annotation),
            ComponentKind::Concrete => {}
        }

        if descriptor.scope != ComponentScope::Singleton {
            return Err(IneligibleReason::NotSingleton);
        }

        if descriptor.opt_out {
            return Err(IneligibleReason::OptedOut);
        }

        if let Some(prefix) = &self.scan_prefix
            && !descriptor.name.as_str().starts_with(prefix.as_str())
        {
            return Err(IneligibleReason::OutsideScanPath);
        }

        if descriptor.infrastructure {
            return Err(IneligibleReason::Infrastructure);
        }

        Ok(())
    }
}
