//! Error types for node bootstrap.
//!
//! Bootstrap errors fall into two classes:
//! - configuration errors: the operator supplied a missing or malformed
//!   store, attribute or gossip string
//! - construction errors: a lower layer (engine, TLS material, HTTP client)
//!   failed while building a runtime object
//!
//! Every error raised during [`Context::init`](crate::core::context::Context::init)
//! is fatal to the process. Nothing in this crate retries internally.

use thiserror::Error;

/// Errors raised while turning configuration into runtime objects.
#[derive(Debug, Error)]
pub enum ContextError {
    /// The store specification is empty or contains no `attrs=location` pair.
    #[error("invalid or empty engines specification {spec:?}, did you specify --stores?")]
    EmptyStoreSpec { spec: String },

    /// Part of the store specification could not be split into attributes and a location.
    #[error("unable to parse attributes and path from store {fragment:?}")]
    MalformedStore { fragment: String },

    /// An in-memory store was declared with a size of zero bytes.
    #[error("unable to initialize an in-memory store with capacity 0")]
    ZeroCapacityStore,

    /// Building the engine for one store specification failed.
    #[error("unable to init engine for store {fragment:?}: {source}")]
    StoreInit {
        fragment: String,
        #[source]
        source: Box<ContextError>,
    },

    /// A gossip bootstrap token could not be turned into a resolver.
    #[error("invalid gossip address {address:?}: {reason}")]
    MalformedGossipAddress { address: String, reason: String },

    /// The gossip bootstrap list produced no resolvers.
    #[error("no gossip addresses found, did you specify --gossip?")]
    NoGossipAddresses,

    /// A lower layer failed to build a runtime object.
    #[error("failed to construct {component}: {source:#}")]
    Construction {
        component: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl ContextError {
    /// Create a MalformedGossipAddress error.
    pub fn malformed_gossip(address: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedGossipAddress {
            address: address.into(),
            reason: reason.into(),
        }
    }

    /// Create a Construction error wrapping a lower-layer cause.
    pub fn construction(component: &'static str, source: anyhow::Error) -> Self {
        Self::Construction { component, source }
    }

    /// Wrap an engine failure with the store fragment that caused it.
    pub fn store_init(fragment: impl Into<String>, source: ContextError) -> Self {
        Self::StoreInit {
            fragment: fragment.into(),
            source: Box::new(source),
        }
    }

    /// Check if this error was caused by operator-supplied configuration.
    ///
    /// A [`ContextError::StoreInit`] is a configuration error even when it
    /// wraps a construction failure, since it names the offending store.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Self::Construction { .. })
    }

    /// Check if a lower-layer construction failure is at the root of this error.
    pub fn is_construction(&self) -> bool {
        match self {
            Self::Construction { .. } => true,
            Self::StoreInit { source, .. } => source.is_construction(),
            _ => false,
        }
    }
}

/// Result type using ContextError.
pub type ContextResult<T> = Result<T, ContextError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_init_wraps_construction() {
        let inner = ContextError::construction("disk engine", anyhow::anyhow!("permission denied"));
        let err = ContextError::store_init("ssd=/root/forbidden", inner);

        assert!(err.is_configuration());
        assert!(err.is_construction());
        let msg = err.to_string();
        assert!(msg.contains("ssd=/root/forbidden"), "{}", msg);
        assert!(msg.contains("permission denied"), "{}", msg);
    }

    #[test]
    fn test_configuration_errors_are_not_construction() {
        let errors = [
            ContextError::EmptyStoreSpec {
                spec: String::new(),
            },
            ContextError::ZeroCapacityStore,
            ContextError::NoGossipAddresses,
            ContextError::malformed_gossip("tcp=", "empty address"),
            ContextError::store_init("mem=0", ContextError::ZeroCapacityStore),
        ];
        for err in &errors {
            assert!(err.is_configuration(), "{}", err);
            assert!(!err.is_construction(), "{}", err);
        }
    }

    #[test]
    fn test_error_messages() {
        let err = ContextError::EmptyStoreSpec {
            spec: String::new(),
        };
        assert!(err.to_string().contains("did you specify --stores?"));

        let err = ContextError::NoGossipAddresses;
        assert!(err.to_string().contains("did you specify --gossip?"));

        let err = ContextError::ZeroCapacityStore;
        assert!(err.to_string().contains("capacity 0"));
    }
}
