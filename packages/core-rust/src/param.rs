//! Parameter container with override locking.
//!
//! Parameters let deployment descriptors fix configuration values — including
//! security-critical ones — that later, less-trusted configuration layers
//! must not silently override. A locked parameter refuses `add_if_unlocked`
//! style writes; `set` is the trusted path that may overwrite anything.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named configuration value with an override lock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: Value,
    pub locked: bool,
}

impl Parameter {
    /// Creates an unlocked parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
            locked: false,
        }
    }

    /// Creates a locked parameter; later untrusted writes to this name fail.
    #[must_use]
    pub fn locked(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
            locked: true,
        }
    }
}

/// Errors raised by [`ParamStore`] writes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    #[error("parameter {name} is locked and cannot be overridden")]
    Locked { name: String },
}

/// Key-value parameter container attached to every configurable descriptor.
///
/// The store itself is plain data; callers that share one across threads are
/// expected to provide their own synchronization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamStore {
    params: HashMap<String, Parameter>,
}

impl ParamStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a parameter unconditionally, overwriting any previous value
    /// and lock state for the name.
    pub fn set(&mut self, name: impl Into<String>, value: Value, locked: bool) {
        let name = name.into();
        self.params.insert(
            name.clone(),
            Parameter {
                name,
                value,
                locked,
            },
        );
    }

    /// Adds a parameter, refusing to touch a name whose existing entry is
    /// locked.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::Locked`] if a parameter of the same name exists
    /// and is locked; the stored value is left unchanged.
    pub fn add(&mut self, param: Parameter) -> Result<(), ParamError> {
        if self.is_locked(&param.name) {
            return Err(ParamError::Locked {
                name: param.name.clone(),
            });
        }
        self.params.insert(param.name.clone(), param);
        Ok(())
    }

    /// Adds an unlocked parameter, refusing locked names.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::Locked`] if an existing parameter of that name
    /// is locked.
    pub fn add_if_unlocked(
        &mut self,
        name: impl Into<String>,
        value: Value,
    ) -> Result<(), ParamError> {
        self.add(Parameter::new(name, value))
    }

    /// Returns the parameter for a name, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.params.get(name)
    }

    /// `true` if a parameter of that name exists and is locked.
    #[must_use]
    pub fn is_locked(&self, name: &str) -> bool {
        self.params.get(name).is_some_and(|p| p.locked)
    }

    /// Iterates over all parameters in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.params.values()
    }

    /// Number of stored parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// `true` if no parameters are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}
