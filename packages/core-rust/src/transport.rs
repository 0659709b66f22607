//! Transport descriptors and the fixed transport-kind slot index.
//!
//! The registry keeps one inbound and one outbound descriptor per kind in
//! fixed-size arrays; registering a kind twice overwrites the earlier slot.
//! Listening and wire handling are transport-layer concerns outside this
//! core.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::param::ParamStore;

/// The transports the engine can carry messages over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportKind {
    Http,
    Https,
    Smtp,
    Tcp,
    Udp,
}

impl TransportKind {
    /// Number of transport slots.
    pub const COUNT: usize = 5;

    /// All kinds, in slot order.
    pub const ALL: [TransportKind; TransportKind::COUNT] = [
        TransportKind::Http,
        TransportKind::Https,
        TransportKind::Smtp,
        TransportKind::Tcp,
        TransportKind::Udp,
    ];

    /// Stable index into the per-kind slot arrays.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            TransportKind::Http => 0,
            TransportKind::Https => 1,
            TransportKind::Smtp => 2,
            TransportKind::Tcp => 3,
            TransportKind::Udp => 4,
        }
    }

    /// The URI scheme for the kind.
    #[must_use]
    pub fn scheme(self) -> &'static str {
        match self {
            TransportKind::Http => "http",
            TransportKind::Https => "https",
            TransportKind::Smtp => "smtp",
            TransportKind::Tcp => "tcp",
            TransportKind::Udp => "udp",
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme())
    }
}

/// Configuration of one inbound transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportInDesc {
    kind: TransportKind,
    params: ParamStore,
}

impl TransportInDesc {
    /// Creates an inbound transport descriptor.
    #[must_use]
    pub fn new(kind: TransportKind) -> Self {
        Self {
            kind,
            params: ParamStore::new(),
        }
    }

    /// The transport kind this descriptor configures.
    #[must_use]
    pub fn kind(&self) -> TransportKind {
        self.kind
    }

    /// The transport's parameters.
    #[must_use]
    pub fn params(&self) -> &ParamStore {
        &self.params
    }

    /// Mutable access to the transport's parameters.
    pub fn params_mut(&mut self) -> &mut ParamStore {
        &mut self.params
    }
}

/// Configuration of one outbound transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportOutDesc {
    kind: TransportKind,
    params: ParamStore,
}

impl TransportOutDesc {
    /// Creates an outbound transport descriptor.
    #[must_use]
    pub fn new(kind: TransportKind) -> Self {
        Self {
            kind,
            params: ParamStore::new(),
        }
    }

    /// The transport kind this descriptor configures.
    #[must_use]
    pub fn kind(&self) -> TransportKind {
        self.kind
    }

    /// The transport's parameters.
    #[must_use]
    pub fn params(&self) -> &ParamStore {
        &self.params
    }

    /// Mutable access to the transport's parameters.
    pub fn params_mut(&mut self) -> &mut ParamStore {
        &mut self.params
    }
}
