//! The configuration registry: single source of truth for everything
//! deployed into a running engine.
//!
//! Construction runs on one initializing actor; after publication the
//! traffic pattern is many concurrent readers (one per in-flight request)
//! against rare administrative writers. Reads are lock-free loads of an
//! [`ArcSwap`] snapshot. Writes serialize on one mutex, clone the current
//! state (maps of `Arc`s — a shallow copy), mutate and validate the clone,
//! and publish it with a single atomic store. A failed operation drops the
//! clone, so the registry observably never holds a partial mutation, and an
//! engage/disengage sweep is atomic: a reader sees every service's old
//! chains or every service's new chains, never a mix.

pub mod engagement;
mod state;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use axon_core::{
    phases, Flow, FlowChains, HandlerDesc, MessageReceiver, ModuleDesc, Parameter, Phase,
    QualifiedName, Service, ServiceGroup, TransportInDesc, TransportKind, TransportOutDesc,
};

use crate::deploy::{locate_module_archive, ModuleSource, MODULE_DIR_PARAM};
use crate::error::ConfigError;
use state::RegistryState;

pub use state::Snapshot;

// ---------------------------------------------------------------------------
// DeploymentMode
// ---------------------------------------------------------------------------

/// How the registry was built: from a repository directory tree or from a
/// single descriptor file. The two are mutually exclusive and fixed at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploymentMode {
    /// A repository root; modules live under its `modules/` subfolder.
    Repository(PathBuf),
    /// A single engine descriptor file; module locations come from the
    /// `moduleDir` parameter.
    Descriptor(PathBuf),
}

// ---------------------------------------------------------------------------
// PhasesInfo
// ---------------------------------------------------------------------------

/// The user phase names declared by the engine descriptor, per flow.
///
/// In-flow names are appended after the built-in phases; the other three
/// flows are declared wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhasesInfo {
    pub in_phases: Vec<String>,
    pub out_phases: Vec<String>,
    pub in_fault_phases: Vec<String>,
    pub out_fault_phases: Vec<String>,
}

impl PhasesInfo {
    /// The stock phase layout engines ship with when the descriptor does
    /// not declare its own.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            in_phases: vec![phases::MESSAGE_PROCESSING.to_string()],
            out_phases: vec![phases::MESSAGE_OUT.to_string()],
            in_fault_phases: Vec::new(),
            out_fault_phases: vec![phases::MESSAGE_OUT.to_string()],
        }
    }
}

// ---------------------------------------------------------------------------
// ConfigRegistry
// ---------------------------------------------------------------------------

/// The engine's configuration registry.
///
/// Owns every deployed descriptor and the resolved execution chains the
/// dispatch path walks. All operations are synchronous and return structured
/// [`ConfigError`] values; none are fatal to the process.
pub struct ConfigRegistry {
    state: ArcSwap<RegistryState>,
    /// Serializes every mutation; readers never take it.
    write_lock: Mutex<()>,
    mode: Option<DeploymentMode>,
    module_source: RwLock<Option<Box<dyn ModuleSource>>>,
    /// Deployment failures kept for diagnostics; these never dispatch.
    faulty_services: DashMap<String, String>,
    faulty_modules: DashMap<String, String>,
    security_enabled: AtomicBool,
    mtom_enabled: AtomicBool,
}

impl ConfigRegistry {
    /// Creates a registry with no deployment source configured.
    ///
    /// The in-flow skeleton starts with the transport-in phase (request-URI
    /// and addressing dispatch handlers) and the pre-dispatch phase.
    #[must_use]
    pub fn new() -> Self {
        Self::with_mode(None)
    }

    /// Creates a registry deployed from a repository directory.
    #[must_use]
    pub fn from_repository(root: impl Into<PathBuf>) -> Self {
        Self::with_mode(Some(DeploymentMode::Repository(root.into())))
    }

    /// Creates a registry deployed from a single descriptor file.
    #[must_use]
    pub fn from_descriptor(path: impl Into<PathBuf>) -> Self {
        Self::with_mode(Some(DeploymentMode::Descriptor(path.into())))
    }

    fn with_mode(mode: Option<DeploymentMode>) -> Self {
        Self {
            state: ArcSwap::new(Arc::new(RegistryState::new())),
            write_lock: Mutex::new(()),
            mode,
            module_source: RwLock::new(None),
            faulty_services: DashMap::new(),
            faulty_modules: DashMap::new(),
            security_enabled: AtomicBool::new(false),
            mtom_enabled: AtomicBool::new(false),
        }
    }

    /// Installs the collaborator that builds modules from archives.
    pub fn set_module_source(&self, source: Box<dyn ModuleSource>) {
        *self.module_source.write() = Some(source);
    }

    /// The repository root, in repository mode.
    #[must_use]
    pub fn repository_path(&self) -> Option<&Path> {
        match &self.mode {
            Some(DeploymentMode::Repository(root)) => Some(root),
            _ => None,
        }
    }

    /// The descriptor file, in descriptor mode.
    #[must_use]
    pub fn descriptor_path(&self) -> Option<&Path> {
        match &self.mode {
            Some(DeploymentMode::Descriptor(path)) => Some(path),
            _ => None,
        }
    }

    /// The deployment mode, if one was configured.
    #[must_use]
    pub fn deployment_mode(&self) -> Option<&DeploymentMode> {
        self.mode.as_ref()
    }

    // -- write plumbing -----------------------------------------------------

    fn mutate<T>(
        &self,
        op: impl FnOnce(&mut RegistryState) -> Result<T, ConfigError>,
    ) -> Result<T, ConfigError> {
        let _guard = self.write_lock.lock();
        let mut next = RegistryState::clone(&self.state.load());
        let value = op(&mut next)?;
        self.state.store(Arc::new(next));
        Ok(value)
    }

    fn mutate_infallible<T>(&self, op: impl FnOnce(&mut RegistryState) -> T) -> T {
        let _guard = self.write_lock.lock();
        let mut next = RegistryState::clone(&self.state.load());
        let value = op(&mut next);
        self.state.store(Arc::new(next));
        value
    }

    // -- reads --------------------------------------------------------------

    /// Takes a consistent snapshot of the registry.
    ///
    /// One snapshot per request keeps every lookup of that request on the
    /// same published registry version.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.state.load_full())
    }

    /// Looks up a service by its registry-wide unique name.
    #[must_use]
    pub fn get_service(&self, name: &str) -> Option<Arc<Service>> {
        self.state.load().services.get(name).cloned()
    }

    /// Looks up a service group by name.
    #[must_use]
    pub fn get_service_group(&self, name: &str) -> Option<Arc<ServiceGroup>> {
        self.state.load().groups.get(name).cloned()
    }

    /// The flat service index, keyed by service name.
    #[must_use]
    pub fn all_services(&self) -> HashMap<String, Arc<Service>> {
        self.state.load().services.clone()
    }

    /// The resolved execution chains of a service.
    #[must_use]
    pub fn service_chains(&self, name: &str) -> Option<Arc<FlowChains>> {
        self.state.load().chains.get(name).cloned()
    }

    /// Module lookup: exact qualified name first, then the bare name's
    /// registered default version.
    #[must_use]
    pub fn get_module(&self, qname: &QualifiedName) -> Option<Arc<ModuleDesc>> {
        self.state.load().lookup_module(qname).cloned()
    }

    /// The module behind a bare name's registered default version.
    #[must_use]
    pub fn get_default_module(&self, name: &str) -> Option<Arc<ModuleDesc>> {
        self.state.load().default_module(name).cloned()
    }

    /// The registered default version for a bare module name.
    #[must_use]
    pub fn default_module_version(&self, name: &str) -> Option<String> {
        self.state.load().default_versions.get(name).cloned()
    }

    /// A registry-level parameter.
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<Parameter> {
        self.state.load().params.get(name).cloned()
    }

    /// `true` if a registry-level parameter exists and is locked.
    #[must_use]
    pub fn is_param_locked(&self, name: &str) -> bool {
        self.state.load().params.is_locked(name)
    }

    /// The inbound transport descriptor for a kind.
    #[must_use]
    pub fn get_transport_in(&self, kind: TransportKind) -> Option<Arc<TransportInDesc>> {
        self.state.load().transports_in[kind.index()].clone()
    }

    /// The outbound transport descriptor for a kind.
    #[must_use]
    pub fn get_transport_out(&self, kind: TransportKind) -> Option<Arc<TransportOutDesc>> {
        self.state.load().transports_out[kind.index()].clone()
    }

    /// All registered inbound transports, in slot order.
    #[must_use]
    pub fn transports_in(&self) -> Vec<Arc<TransportInDesc>> {
        self.state
            .load()
            .transports_in
            .iter()
            .flatten()
            .cloned()
            .collect()
    }

    /// All registered outbound transports, in slot order.
    #[must_use]
    pub fn transports_out(&self) -> Vec<Arc<TransportOutDesc>> {
        self.state
            .load()
            .transports_out
            .iter()
            .flatten()
            .cloned()
            .collect()
    }

    /// The message receiver registered under a key.
    #[must_use]
    pub fn get_message_receiver(&self, key: &str) -> Option<Arc<MessageReceiver>> {
        self.state.load().receivers.get(key).cloned()
    }

    /// The engaged module names, in engagement order.
    #[must_use]
    pub fn engaged_modules(&self) -> Vec<QualifiedName> {
        self.state.load().engaged.as_slice().to_vec()
    }

    /// `true` if the exact qualified name, or the qualified name of the
    /// module's registered default-version module, is engaged.
    #[must_use]
    pub fn is_engaged(&self, qname: &QualifiedName) -> bool {
        self.state.load().is_engaged(qname)
    }

    /// The global phases of one flow with engaged handlers injected. For
    /// the in flow this is the list up to and including dispatch.
    #[must_use]
    pub fn flow_phases(&self, flow: Flow) -> Vec<Phase> {
        self.state.load().global_flows.flow(flow).to_vec()
    }

    /// Descriptors of the built-in handlers installed by the registry.
    #[must_use]
    pub fn system_handlers(&self) -> Vec<HandlerDesc> {
        self.state.load().system_handlers.clone()
    }

    /// The declared user phase names.
    #[must_use]
    pub fn phases_info(&self) -> PhasesInfo {
        self.state.load().phases_info.clone()
    }

    /// Services marked for initialization at startup, sorted by name.
    #[must_use]
    pub fn services_to_load(&self) -> Vec<Arc<Service>> {
        self.snapshot().services_to_load()
    }

    // -- services and groups ------------------------------------------------

    /// Deploys a service group.
    ///
    /// Every contained service is checked against the registry-wide flat
    /// index, then chains are resolved for each; only when all of that
    /// succeeds are the group, its services and their chains registered —
    /// either every service registers or none does.
    ///
    /// # Errors
    ///
    /// [`ConfigError::DuplicateServiceName`] if a contained service collides
    /// with any deployed service; any chain resolution error.
    pub fn add_service_group(&self, group: ServiceGroup) -> Result<(), ConfigError> {
        self.mutate(|next| {
            for service in group.services() {
                if next.services.contains_key(service.name()) {
                    return Err(ConfigError::DuplicateServiceName {
                        name: service.name().to_string(),
                    });
                }
            }

            let mut staged = Vec::with_capacity(group.len());
            for service in group.services() {
                let chains = next.resolve_chains_for(service)?;
                staged.push((service.clone(), Arc::new(chains)));
            }

            for (service, chains) in staged {
                next.chains.insert(service.name().to_string(), chains);
                next.services.insert(service.name().to_string(), service);
            }
            tracing::debug!(group = group.name(), services = group.len(), "deployed service group");
            next.groups.insert(group.name().to_string(), Arc::new(group));
            Ok(())
        })
    }

    /// Deploys a single service, synthesizing a group named after it.
    ///
    /// Chain resolution happens before any registry mutation, so a failure
    /// leaves no trace of the service.
    ///
    /// # Errors
    ///
    /// As [`add_service_group`](Self::add_service_group).
    pub fn add_service(&self, service: Service) -> Result<(), ConfigError> {
        let mut group = ServiceGroup::new(service.name());
        group.add_service(service);
        self.add_service_group(group)
    }

    /// Removes a service from the flat index and drops its chains.
    ///
    /// This is a shallow removal: the registry is the fast-lookup cache of
    /// the dispatch path, and group membership is deliberately left alone.
    pub fn remove_service(&self, name: &str) -> Option<Arc<Service>> {
        self.mutate_infallible(|next| {
            next.chains.remove(name);
            next.services.remove(name)
        })
    }

    // -- parameters ---------------------------------------------------------

    /// Adds a registry-level parameter.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ParameterLocked`] if an existing parameter of the same
    /// name is locked; the stored value is left untouched.
    pub fn add_param(&self, param: Parameter) -> Result<(), ConfigError> {
        self.mutate(|next| next.params.add(param).map_err(ConfigError::from))
    }

    // -- transports and receivers -------------------------------------------

    /// Registers an inbound transport; the kind's slot is overwritten if
    /// already occupied.
    pub fn add_transport_in(&self, transport: TransportInDesc) {
        self.mutate_infallible(|next| {
            let slot = transport.kind().index();
            next.transports_in[slot] = Some(Arc::new(transport));
        });
    }

    /// Registers an outbound transport; the kind's slot is overwritten if
    /// already occupied.
    pub fn add_transport_out(&self, transport: TransportOutDesc) {
        self.mutate_infallible(|next| {
            let slot = transport.kind().index();
            next.transports_out[slot] = Some(Arc::new(transport));
        });
    }

    /// Registers a message receiver under a key, overwriting any previous
    /// registration for that key.
    pub fn add_message_receiver(&self, key: impl Into<String>, receiver: MessageReceiver) {
        let key = key.into();
        self.mutate_infallible(|next| {
            next.receivers.insert(key, Arc::new(receiver));
        });
    }

    // -- modules ------------------------------------------------------------

    /// Stores a module descriptor by its qualified name.
    pub fn add_module(&self, module: ModuleDesc) {
        self.mutate_infallible(|next| {
            let qname = module.qname().clone();
            next.modules.insert(qname, Arc::new(module));
        });
    }

    /// Registers the default version for a bare module name. First writer
    /// wins; the mapping is never overwritten.
    ///
    /// # Errors
    ///
    /// [`ConfigError::DefaultVersionAlreadySet`] if a default version for
    /// the name already exists.
    pub fn add_default_module_version(
        &self,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<(), ConfigError> {
        let name = name.into();
        let version = version.into();
        self.mutate(|next| {
            if let Some(existing) = next.default_versions.get(&name) {
                return Err(ConfigError::DefaultVersionAlreadySet {
                    name: name.clone(),
                    version: existing.clone(),
                });
            }
            next.default_versions.insert(name.clone(), version.clone());
            Ok(())
        })
    }

    // -- engagement ---------------------------------------------------------

    /// Globally engages a module.
    ///
    /// Engaging an already-engaged module (exact match or its registered
    /// default-version module) is a successful no-op. A module that is not
    /// yet loaded is discovered through the configured [`ModuleSource`].
    /// First engagement injects the module's handlers into the global flow
    /// phases, rebuilds every service's chains, and appends the module to
    /// the engaged list — published as one atomic step.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ModuleNotFound`] if the module is unknown and no
    /// module source is configured; [`ConfigError::InvalidModule`] if
    /// discovery fails; any chain resolution error. On error the registry is
    /// unchanged.
    pub fn engage_module(&self, qname: &QualifiedName) -> Result<(), ConfigError> {
        let _guard = self.write_lock.lock();
        let mut next = RegistryState::clone(&self.state.load());

        let (module, newly_discovered) = match next.lookup_module(qname) {
            Some(module) => (module.clone(), false),
            None => (self.discover_module(&next, qname)?, true),
        };

        if next.is_engaged(module.qname()) {
            tracing::debug!(module = %module.qname(), "module already engaged");
            return Ok(());
        }

        if newly_discovered {
            next.modules.insert(module.qname().clone(), module.clone());
        }
        next.engaged.push_unique(module.qname().clone());
        next.rebuild_chains()?;

        self.state.store(Arc::new(next));
        tracing::info!(module = %module.qname(), "engaged module globally");
        Ok(())
    }

    /// Engages `name-version` — convenience over
    /// [`engage_module`](Self::engage_module).
    ///
    /// # Errors
    ///
    /// As [`engage_module`](Self::engage_module).
    pub fn engage_module_versioned(
        &self,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<(), ConfigError> {
        self.engage_module(&QualifiedName::versioned(name, version))
    }

    /// Globally disengages a module, removing its handlers from every
    /// service's chains and from the global flow phases.
    ///
    /// The new engaged list and every rebuilt chain are computed before
    /// anything is published, so readers never observe a partial sweep and
    /// a failure leaves the registry unchanged.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ModuleNotFound`] if the module is unknown,
    /// [`ConfigError::NotEngaged`] if it is loaded but not engaged,
    /// [`ConfigError::NoServices`] if the registry holds no services.
    pub fn disengage_module(&self, qname: &QualifiedName) -> Result<(), ConfigError> {
        let _guard = self.write_lock.lock();
        let mut next = RegistryState::clone(&self.state.load());

        let module = next
            .lookup_module(qname)
            .cloned()
            .ok_or_else(|| ConfigError::ModuleNotFound {
                name: qname.to_string(),
            })?;

        if !next.is_engaged(module.qname()) {
            return Err(ConfigError::NotEngaged {
                name: qname.to_string(),
            });
        }

        if next.services.is_empty() {
            return Err(ConfigError::NoServices);
        }

        next.engaged.remove(module.qname());
        next.rebuild_chains()?;

        self.state.store(Arc::new(next));
        tracing::info!(module = %module.qname(), "disengaged module");
        Ok(())
    }

    fn discover_module(
        &self,
        state: &RegistryState,
        qname: &QualifiedName,
    ) -> Result<Arc<ModuleDesc>, ConfigError> {
        let source_guard = self.module_source.read();
        let Some(source) = source_guard.as_deref() else {
            return Err(ConfigError::ModuleNotFound {
                name: qname.to_string(),
            });
        };

        let module_dir = state
            .params
            .get(MODULE_DIR_PARAM)
            .and_then(|p| p.value.as_str().map(str::to_string));
        let archive =
            locate_module_archive(self.mode.as_ref(), module_dir.as_deref(), qname.name())?;
        let module = source.build_module(&archive)?;
        tracing::debug!(
            module = %module.qname(),
            path = %archive.path.display(),
            "discovered module"
        );
        Ok(Arc::new(module))
    }

    // -- phases -------------------------------------------------------------

    /// Appends the dispatch phase (REST, SOAP-body and SOAP-action dispatch
    /// handlers) and the post-dispatch phase (dispatch checker and context
    /// handler) to the in-flow skeleton. A second call is a no-op.
    ///
    /// # Errors
    ///
    /// Any chain resolution error from rebuilding existing services against
    /// the extended skeleton.
    pub fn install_default_dispatchers(&self) -> Result<(), ConfigError> {
        self.mutate(|next| {
            if next.skeletons.has_phase(Flow::In, phases::DISPATCH) {
                return Ok(());
            }

            let mut dispatch = Phase::new(phases::DISPATCH);
            for name in [
                "rest-dispatcher",
                "soap-body-dispatcher",
                "soap-action-dispatcher",
            ] {
                let handler = HandlerDesc::system(name);
                next.system_handlers.push(handler.clone());
                dispatch.add_handler(handler);
            }

            let mut post_dispatch = Phase::new(phases::POST_DISPATCH);
            for name in ["dispatch-checker", "context-handler"] {
                let handler = HandlerDesc::system(name);
                next.system_handlers.push(handler.clone());
                post_dispatch.add_handler(handler);
            }

            next.skeletons.push_phase(Flow::In, dispatch);
            next.skeletons.push_phase(Flow::In, post_dispatch);
            next.rebuild_chains()
        })
    }

    /// Installs a caller-supplied dispatch phase followed by a post-dispatch
    /// phase carrying the dispatch checker. For engines that replace the
    /// stock dispatchers. A second call is a no-op.
    ///
    /// # Errors
    ///
    /// Any chain resolution error from rebuilding existing services against
    /// the extended skeleton.
    pub fn set_custom_dispatch_phase(&self, dispatch: Phase) -> Result<(), ConfigError> {
        self.mutate(|next| {
            if next.skeletons.has_phase(Flow::In, phases::POST_DISPATCH) {
                return Ok(());
            }

            next.skeletons.push_phase(Flow::In, dispatch);

            let mut post_dispatch = Phase::new(phases::POST_DISPATCH);
            let checker = HandlerDesc::system("dispatch-checker");
            next.system_handlers.push(checker.clone());
            post_dispatch.add_handler(checker);
            next.skeletons.push_phase(Flow::In, post_dispatch);
            next.rebuild_chains()
        })
    }

    /// Declares the user phases for all four flows and rebuilds every
    /// chain against the new skeleton.
    ///
    /// In-flow names are appended after the built-in phases (names that
    /// collide with a built-in are ignored); the out and fault flows are
    /// declared wholesale.
    ///
    /// # Errors
    ///
    /// Any chain resolution error from rebuilding existing services.
    pub fn set_phases_info(&self, info: PhasesInfo) -> Result<(), ConfigError> {
        self.mutate(|next| {
            let previous = std::mem::take(&mut next.user_in_phases);
            next.skeletons
                .flow_mut(Flow::In)
                .retain(|phase| !previous.iter().any(|name| name == phase.name()));
            for name in &info.in_phases {
                if !next.skeletons.has_phase(Flow::In, name) {
                    next.skeletons.push_phase(Flow::In, Phase::new(name.clone()));
                    next.user_in_phases.push(name.clone());
                }
            }

            for (flow, names) in [
                (Flow::Out, &info.out_phases),
                (Flow::InFault, &info.in_fault_phases),
                (Flow::OutFault, &info.out_fault_phases),
            ] {
                let list = next.skeletons.flow_mut(flow);
                list.clear();
                for name in names {
                    if !list.iter().any(|phase| phase.name() == name.as_str()) {
                        list.push(Phase::new(name.clone()));
                    }
                }
            }

            next.phases_info = info;
            next.rebuild_chains()
        })
    }

    // -- diagnostics --------------------------------------------------------

    /// Records a service that failed deployment. Faulty services never
    /// participate in dispatch; the record exists for operators.
    pub fn report_faulty_service(&self, name: impl Into<String>, reason: impl Into<String>) {
        let name = name.into();
        let reason = reason.into();
        tracing::warn!(service = %name, %reason, "service marked faulty");
        self.faulty_services.insert(name, reason);
    }

    /// Records a module that failed deployment.
    pub fn report_faulty_module(&self, name: impl Into<String>, reason: impl Into<String>) {
        let name = name.into();
        let reason = reason.into();
        tracing::warn!(module = %name, %reason, "module marked faulty");
        self.faulty_modules.insert(name, reason);
    }

    /// The faulty services and their failure reasons, sorted by name.
    #[must_use]
    pub fn faulty_services(&self) -> Vec<(String, String)> {
        let mut entries: Vec<(String, String)> = self
            .faulty_services
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();
        entries.sort();
        entries
    }

    /// The faulty modules and their failure reasons, sorted by name.
    #[must_use]
    pub fn faulty_modules(&self) -> Vec<(String, String)> {
        let mut entries: Vec<(String, String)> = self
            .faulty_modules
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();
        entries.sort();
        entries
    }

    // -- engine toggles -----------------------------------------------------

    /// Whether a security module has marked the engine as security-enabled.
    #[must_use]
    pub fn security_enabled(&self) -> bool {
        self.security_enabled.load(Ordering::Acquire)
    }

    /// Sets the security toggle.
    pub fn set_security_enabled(&self, enabled: bool) {
        self.security_enabled.store(enabled, Ordering::Release);
    }

    /// Whether MTOM attachment optimization is enabled.
    #[must_use]
    pub fn mtom_enabled(&self) -> bool {
        self.mtom_enabled.load(Ordering::Acquire)
    }

    /// Sets the MTOM toggle.
    pub fn set_mtom_enabled(&self, enabled: bool) {
        self.mtom_enabled.store(enabled, Ordering::Release);
    }
}

impl Default for ConfigRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
