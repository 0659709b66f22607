//! Message receiver descriptors.
//!
//! A message receiver is the terminal step of an in-flow chain — the piece
//! that hands the message to application logic. The registry only stores
//! descriptors keyed by message-exchange pattern; invocation belongs to the
//! dispatch path.

use serde::{Deserialize, Serialize};

use crate::param::ParamStore;

/// Well-known message-exchange-pattern URIs.
pub mod mep {
    pub const IN_ONLY: &str = "http://www.w3.org/ns/wsdl/in-only";
    pub const IN_OUT: &str = "http://www.w3.org/ns/wsdl/in-out";
    pub const ROBUST_IN_ONLY: &str = "http://www.w3.org/ns/wsdl/robust-in-only";
    pub const IN_OPTIONAL_OUT: &str = "http://www.w3.org/ns/wsdl/in-opt-out";
}

/// Descriptor of a message receiver for one exchange pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageReceiver {
    mep: String,
    params: ParamStore,
}

impl MessageReceiver {
    /// Creates a receiver descriptor for the given exchange pattern.
    #[must_use]
    pub fn new(mep: impl Into<String>) -> Self {
        Self {
            mep: mep.into(),
            params: ParamStore::new(),
        }
    }

    /// The message-exchange-pattern URI this receiver serves.
    #[must_use]
    pub fn mep(&self) -> &str {
        &self.mep
    }

    /// The receiver's parameters.
    #[must_use]
    pub fn params(&self) -> &ParamStore {
        &self.params
    }

    /// Mutable access to the receiver's parameters.
    pub fn params_mut(&mut self) -> &mut ParamStore {
        &mut self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receiver_carries_its_pattern() {
        let recv = MessageReceiver::new(mep::IN_OUT);
        assert_eq!(recv.mep(), mep::IN_OUT);
        assert!(recv.params().is_empty());
    }
}
