//! Deployed service and service-group descriptors.
//!
//! A service names the modules it depends on and carries its own parameters.
//! Groups own their services; the flat registry-wide index shares them via
//! `Arc`. The owning group is reachable through the registry by name — the
//! descriptors themselves hold no parent pointers.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::param::ParamStore;
use crate::qname::QualifiedName;

/// Parameter name marking a service for initialization at engine startup.
pub const LOAD_ON_STARTUP: &str = "loadOnStartup";

/// A deployed service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    name: String,
    module_refs: Vec<QualifiedName>,
    params: ParamStore,
}

impl Service {
    /// Creates a service with no module dependencies.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module_refs: Vec::new(),
            params: ParamStore::new(),
        }
    }

    /// The registry-wide unique service name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declares a dependency on a module; its handler rules participate in
    /// this service's chains even when the module is not engaged globally.
    pub fn add_module_ref(&mut self, module: QualifiedName) {
        if !self.module_refs.contains(&module) {
            self.module_refs.push(module);
        }
    }

    /// Builder-style [`add_module_ref`](Self::add_module_ref).
    #[must_use]
    pub fn with_module_ref(mut self, module: QualifiedName) -> Self {
        self.add_module_ref(module);
        self
    }

    /// The declared module dependencies, in declaration order.
    #[must_use]
    pub fn module_refs(&self) -> &[QualifiedName] {
        &self.module_refs
    }

    /// The service's parameters.
    #[must_use]
    pub fn params(&self) -> &ParamStore {
        &self.params
    }

    /// Mutable access to the service's parameters.
    pub fn params_mut(&mut self) -> &mut ParamStore {
        &mut self.params
    }

    /// `true` if the service is marked for initialization at startup.
    #[must_use]
    pub fn load_on_startup(&self) -> bool {
        self.params.get(LOAD_ON_STARTUP).is_some()
    }
}

/// A named group of services deployed together.
///
/// Within a group the service name is the key; deploying a name twice into
/// the same group replaces the earlier descriptor. Registry-wide name
/// collisions are rejected at deployment, not here.
#[derive(Debug, Clone)]
pub struct ServiceGroup {
    name: String,
    services: HashMap<String, Arc<Service>>,
    params: ParamStore,
}

impl ServiceGroup {
    /// Creates an empty group.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            services: HashMap::new(),
            params: ParamStore::new(),
        }
    }

    /// The group name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a service to the group.
    pub fn add_service(&mut self, service: Service) {
        self.services
            .insert(service.name().to_string(), Arc::new(service));
    }

    /// Looks up a contained service by name.
    #[must_use]
    pub fn service(&self, name: &str) -> Option<&Arc<Service>> {
        self.services.get(name)
    }

    /// Iterates over the contained services in unspecified order.
    pub fn services(&self) -> impl Iterator<Item = &Arc<Service>> {
        self.services.values()
    }

    /// Number of services in the group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// `true` if the group holds no services.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// The group's parameters.
    #[must_use]
    pub fn params(&self) -> &ParamStore {
        &self.params
    }

    /// Mutable access to the group's parameters.
    pub fn params_mut(&mut self) -> &mut ParamStore {
        &mut self.params
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn module_refs_deduplicate() {
        let svc = Service::new("Echo")
            .with_module_ref(QualifiedName::new("logging"))
            .with_module_ref(QualifiedName::new("logging"));
        assert_eq!(svc.module_refs().len(), 1);
    }

    #[test]
    fn load_on_startup_reads_the_marker_param() {
        let mut svc = Service::new("Version");
        assert!(!svc.load_on_startup());
        svc.params_mut().set(LOAD_ON_STARTUP, json!(true), false);
        assert!(svc.load_on_startup());
    }

    #[test]
    fn group_replaces_same_named_service() {
        let mut group = ServiceGroup::new("util");
        group.add_service(Service::new("Echo"));
        group.add_service(
            Service::new("Echo").with_module_ref(QualifiedName::new("logging")),
        );

        assert_eq!(group.len(), 1);
        assert_eq!(group.service("Echo").unwrap().module_refs().len(), 1);
    }
}
