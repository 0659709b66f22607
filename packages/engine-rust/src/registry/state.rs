//! The registry's copy-on-write state and its public read view.
//!
//! Every mutation builds a private clone of [`RegistryState`], validates it,
//! and publishes it with one atomic store. Readers take a [`Snapshot`] — an
//! `Arc` of one published state — so a sequence of lookups within a snapshot
//! is consistent: it observes either the pre-mutation registry for every
//! entry or the post-mutation registry for every entry, never a mix.

use std::collections::HashMap;
use std::sync::Arc;

use axon_core::{
    phases, Flow, FlowChains, FlowPhases, HandlerDesc, MessageReceiver, ModuleDesc, Parameter,
    ParamStore, Phase, QualifiedName, Service, ServiceGroup, TransportInDesc, TransportKind,
    TransportOutDesc,
};

use crate::error::ConfigError;
use crate::registry::engagement::EngagedModules;
use crate::registry::PhasesInfo;
use crate::resolver;

/// One immutable version of everything the registry holds.
///
/// Maps store `Arc`ed descriptors, so cloning the state for a mutation is a
/// map-of-pointers copy, not a deep copy of the deployment.
#[derive(Debug, Clone)]
pub(crate) struct RegistryState {
    pub(crate) groups: HashMap<String, Arc<ServiceGroup>>,
    /// Flat registry-wide service index; names are unique across all groups.
    pub(crate) services: HashMap<String, Arc<Service>>,
    /// Resolved chains per service, swapped whole on every rebuild.
    pub(crate) chains: HashMap<String, Arc<FlowChains>>,
    pub(crate) modules: HashMap<QualifiedName, Arc<ModuleDesc>>,
    /// Bare module name to default version.
    pub(crate) default_versions: HashMap<String, String>,
    pub(crate) engaged: EngagedModules,
    pub(crate) transports_in: [Option<Arc<TransportInDesc>>; TransportKind::COUNT],
    pub(crate) transports_out: [Option<Arc<TransportOutDesc>>; TransportKind::COUNT],
    /// Declared phases only — the pristine basis every resolution derives
    /// from. Module handlers never land here.
    pub(crate) skeletons: FlowPhases,
    /// Skeletons with the engaged modules' handlers injected.
    pub(crate) global_flows: FlowPhases,
    pub(crate) receivers: HashMap<String, Arc<MessageReceiver>>,
    pub(crate) params: ParamStore,
    /// Descriptors of every built-in handler the registry installed.
    pub(crate) system_handlers: Vec<HandlerDesc>,
    pub(crate) phases_info: PhasesInfo,
    /// In-flow user phase names actually appended to the skeleton; tracked
    /// so a later `set_phases_info` strips exactly these and no built-in.
    pub(crate) user_in_phases: Vec<String>,
}

impl RegistryState {
    /// Creates the initial state: an empty deployment whose in-flow skeleton
    /// already carries the transport-in phase (with the request-URI and
    /// addressing dispatch handlers) and the pre-dispatch phase. Security
    /// flows depend on service parameters being resolvable ahead of
    /// dispatch, so these two phases exist from construction and are never
    /// removed.
    pub(crate) fn new() -> Self {
        let mut skeletons = FlowPhases::new();
        let mut system_handlers = Vec::new();

        let mut transport_in = Phase::new(phases::TRANSPORT_IN);
        for name in ["request-uri-dispatcher", "addressing-dispatcher"] {
            let handler = HandlerDesc::system(name);
            system_handlers.push(handler.clone());
            transport_in.add_handler(handler);
        }
        skeletons.push_phase(Flow::In, transport_in);
        skeletons.push_phase(Flow::In, Phase::new(phases::PRE_DISPATCH));

        Self {
            groups: HashMap::new(),
            services: HashMap::new(),
            chains: HashMap::new(),
            modules: HashMap::new(),
            default_versions: HashMap::new(),
            engaged: EngagedModules::new(),
            transports_in: Default::default(),
            transports_out: Default::default(),
            global_flows: skeletons.clone(),
            skeletons,
            receivers: HashMap::new(),
            params: ParamStore::new(),
            system_handlers,
            phases_info: PhasesInfo::default(),
            user_in_phases: Vec::new(),
        }
    }

    /// Exact qualified-name lookup, then bare-name-to-default-version
    /// indirection and retry.
    pub(crate) fn lookup_module(&self, qname: &QualifiedName) -> Option<&Arc<ModuleDesc>> {
        if let Some(module) = self.modules.get(qname) {
            return Some(module);
        }
        let version = self.default_versions.get(qname.name())?;
        self.modules.get(&qname.with_version(version.clone()))
    }

    /// The module behind a bare name's registered default version.
    pub(crate) fn default_module(&self, name: &str) -> Option<&Arc<ModuleDesc>> {
        let qname = match self.default_versions.get(name) {
            Some(version) => QualifiedName::versioned(name, version.clone()),
            None => QualifiedName::new(name),
        };
        self.modules.get(&qname)
    }

    /// `true` if the exact qualified name, or the qualified name of the
    /// module's registered default-version module, is engaged.
    pub(crate) fn is_engaged(&self, qname: &QualifiedName) -> bool {
        if self.engaged.contains(qname) {
            return true;
        }
        self.default_module(qname.name())
            .is_some_and(|module| self.engaged.contains(module.qname()))
    }

    /// The engaged modules' descriptors in engagement order.
    pub(crate) fn engaged_descriptors(&self) -> Vec<Arc<ModuleDesc>> {
        self.engaged
            .iter()
            .filter_map(|qname| self.modules.get(qname).cloned())
            .collect()
    }

    /// Resolves a service's declared module references to descriptors.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ModuleNotFound`] if a reference names a module that is
    /// not deployed (directly or through a default version).
    pub(crate) fn service_dependencies(
        &self,
        service: &Service,
    ) -> Result<Vec<Arc<ModuleDesc>>, ConfigError> {
        service
            .module_refs()
            .iter()
            .map(|qname| {
                self.lookup_module(qname)
                    .cloned()
                    .ok_or_else(|| ConfigError::ModuleNotFound {
                        name: qname.to_string(),
                    })
            })
            .collect()
    }

    /// Re-derives the global flow lists and every service's chains from the
    /// pristine skeletons and the current engaged set.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] from dependency resolution or chain construction;
    /// on error the state may be partially updated and must be discarded by
    /// the caller (mutations always work on a private clone).
    pub(crate) fn rebuild_chains(&mut self) -> Result<(), ConfigError> {
        let engaged = self.engaged_descriptors();
        self.global_flows = resolver::resolve_global_flows(&self.skeletons, &engaged)?;

        let mut chains = HashMap::with_capacity(self.services.len());
        for (name, service) in &self.services {
            let dependencies = self.service_dependencies(service)?;
            let resolved =
                resolver::resolve_service_chains(&self.skeletons, &engaged, &dependencies)?;
            chains.insert(name.clone(), Arc::new(resolved));
        }
        self.chains = chains;
        Ok(())
    }

    /// Resolves chains for one service against the current state without
    /// touching any stored chain.
    pub(crate) fn resolve_chains_for(
        &self,
        service: &Service,
    ) -> Result<FlowChains, ConfigError> {
        let engaged = self.engaged_descriptors();
        let dependencies = self.service_dependencies(service)?;
        Ok(resolver::resolve_service_chains(
            &self.skeletons,
            &engaged,
            &dependencies,
        )?)
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// A consistent, immutable view of the registry.
///
/// The dispatch path takes one snapshot per request; every lookup through it
/// observes the same published registry version.
#[derive(Debug, Clone)]
pub struct Snapshot {
    state: Arc<RegistryState>,
}

impl Snapshot {
    pub(crate) fn new(state: Arc<RegistryState>) -> Self {
        Self { state }
    }

    /// Looks up a service by its registry-wide unique name.
    #[must_use]
    pub fn service(&self, name: &str) -> Option<&Arc<Service>> {
        self.state.services.get(name)
    }

    /// The resolved chains of a service.
    #[must_use]
    pub fn service_chains(&self, name: &str) -> Option<&Arc<FlowChains>> {
        self.state.chains.get(name)
    }

    /// Looks up a service group by name.
    #[must_use]
    pub fn service_group(&self, name: &str) -> Option<&Arc<ServiceGroup>> {
        self.state.groups.get(name)
    }

    /// The flat service index.
    #[must_use]
    pub fn all_services(&self) -> &HashMap<String, Arc<Service>> {
        &self.state.services
    }

    /// All service groups by name.
    #[must_use]
    pub fn all_service_groups(&self) -> &HashMap<String, Arc<ServiceGroup>> {
        &self.state.groups
    }

    /// Module lookup with default-version fallback.
    #[must_use]
    pub fn module(&self, qname: &QualifiedName) -> Option<&Arc<ModuleDesc>> {
        self.state.lookup_module(qname)
    }

    /// The module behind a bare name's default version.
    #[must_use]
    pub fn default_module(&self, name: &str) -> Option<&Arc<ModuleDesc>> {
        self.state.default_module(name)
    }

    /// The registered default version for a bare module name.
    #[must_use]
    pub fn default_module_version(&self, name: &str) -> Option<&str> {
        self.state.default_versions.get(name).map(String::as_str)
    }

    /// The engaged module names in engagement order.
    #[must_use]
    pub fn engaged_modules(&self) -> &[QualifiedName] {
        self.state.engaged.as_slice()
    }

    /// `true` if the module (or its default-version module) is engaged.
    #[must_use]
    pub fn is_engaged(&self, qname: &QualifiedName) -> bool {
        self.state.is_engaged(qname)
    }

    /// The inbound transport descriptor for a kind.
    #[must_use]
    pub fn transport_in(&self, kind: TransportKind) -> Option<&Arc<TransportInDesc>> {
        self.state.transports_in[kind.index()].as_ref()
    }

    /// The outbound transport descriptor for a kind.
    #[must_use]
    pub fn transport_out(&self, kind: TransportKind) -> Option<&Arc<TransportOutDesc>> {
        self.state.transports_out[kind.index()].as_ref()
    }

    /// The message receiver registered under a key.
    #[must_use]
    pub fn message_receiver(&self, key: &str) -> Option<&Arc<MessageReceiver>> {
        self.state.receivers.get(key)
    }

    /// A registry-level parameter.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&Parameter> {
        self.state.params.get(name)
    }

    /// `true` if a registry-level parameter exists and is locked.
    #[must_use]
    pub fn is_param_locked(&self, name: &str) -> bool {
        self.state.params.is_locked(name)
    }

    /// The global phases of one flow, with engaged modules' handlers
    /// injected. For the in flow this is the list up to and including
    /// dispatch.
    #[must_use]
    pub fn flow_phases(&self, flow: Flow) -> &[Phase] {
        self.state.global_flows.flow(flow)
    }

    /// Descriptors of the built-in handlers installed by the registry.
    #[must_use]
    pub fn system_handlers(&self) -> &[HandlerDesc] {
        &self.state.system_handlers
    }

    /// The declared user phase names.
    #[must_use]
    pub fn phases_info(&self) -> &PhasesInfo {
        &self.state.phases_info
    }

    /// Services marked for initialization at startup.
    #[must_use]
    pub fn services_to_load(&self) -> Vec<Arc<Service>> {
        let mut services: Vec<Arc<Service>> = self
            .state
            .services
            .values()
            .filter(|svc| svc.load_on_startup())
            .cloned()
            .collect();
        services.sort_by(|a, b| a.name().cmp(b.name()));
        services
    }
}
