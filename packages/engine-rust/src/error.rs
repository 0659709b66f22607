//! Typed error values for registry and resolver operations.
//!
//! No operation in this crate is fatal to the process: every failure is a
//! structured value naming the affected service, module, parameter or phase,
//! and a failed multi-step operation leaves the registry in its prior,
//! consistent state. These values are the whole error contract — the engine
//! never writes to a global sink on the caller's behalf.

use axon_core::{Flow, ParamError};

/// Errors from resolving handler placement rules into chains.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    #[error("phase {phase} is not declared for the {flow} flow")]
    PhaseNotFound { phase: String, flow: Flow },
    #[error("cannot order handlers in phase {phase}: {detail}")]
    AmbiguousOrdering { phase: String, detail: String },
}

/// Errors returned by configuration registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("a service named {name} is already deployed")]
    DuplicateServiceName { name: String },
    #[error("parameter {name} is locked and cannot be overridden")]
    ParameterLocked { name: String },
    #[error("invalid module {name}: {reason}")]
    InvalidModule { name: String, reason: String },
    #[error("module {name} is not available in the configuration")]
    ModuleNotFound { name: String },
    #[error("module {name} is not engaged")]
    NotEngaged { name: String },
    #[error("the configuration has no services")]
    NoServices,
    #[error("default version for module {name} is already set to {version}")]
    DefaultVersionAlreadySet { name: String, version: String },
    #[error("resource exhaustion: {context}")]
    AllocationFailure { context: String },
    #[error(transparent)]
    Chain(#[from] ChainError),
}

impl From<ParamError> for ConfigError {
    fn from(err: ParamError) -> Self {
        match err {
            ParamError::Locked { name } => ConfigError::ParameterLocked { name },
        }
    }
}
