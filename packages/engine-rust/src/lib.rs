//! Axon Engine — the runtime configuration core of the Axon web-services
//! engine.
//!
//! This crate owns everything deployed into a running engine and keeps it
//! consistent under concurrent access:
//!
//! 1. **Registry** (`registry`): the single source of truth for services,
//!    service groups, modules, transports and message receivers, with
//!    lock-free snapshot reads for the dispatch path
//! 2. **Phase resolution** (`resolver`): pure chain construction from a
//!    declared phase skeleton plus module handler rules
//! 3. **Engagement** (`registry::engagement`): the ordered, deduplicated
//!    set of globally engaged modules
//! 4. **Deployment seams** (`deploy`): module archive location and the
//!    `ModuleSource` collaborator that builds descriptors from archives

pub mod deploy;
pub mod error;
pub mod registry;
pub mod resolver;

// Re-export key types for convenient access.
pub use deploy::{locate_module_archive, ModuleArchive, ModuleSource, MODULE_DIR_PARAM, MODULE_FOLDER};
pub use error::{ChainError, ConfigError};
pub use registry::{ConfigRegistry, DeploymentMode, PhasesInfo, Snapshot};
pub use resolver::{resolve_global_flows, resolve_service_chains};
