//! Node bootstrap context.
//!
//! [`Context`] holds the parameters needed to set up a node and, after
//! [`Context::init`], the runtime objects derived from them:
//! - storage engines built from [`Context::stores`]
//! - node attributes parsed from [`Context::attrs`]
//! - gossip bootstrap resolvers parsed from [`Context::gossip_bootstrap`]
//!
//! Init order: stores → engines → node attributes → gossip resolvers.
//! The shared HTTP client is built on demand by [`Context::http_client`],
//! never during init.

use crate::core::attributes::Attributes;
use crate::core::error::{ContextError, ContextResult};
use crate::gossip::{parse_gossip_bootstrap, ResolverDescriptor};
use crate::net::http::{build_http_client, HttpClientCache};
use crate::storage::{
    init_engine, parse_store_specs, DefaultEngineFactory, Engine, EngineFactory, StoreLocation,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Default bind address.
pub const DEFAULT_ADDR: &str = ":8080";
/// Default certificate directory.
pub const DEFAULT_CERTS_DIR: &str = "certs";
/// Default maximum clock offset.
pub const DEFAULT_MAX_OFFSET: Duration = Duration::from_millis(250);
/// Default gossip interval.
pub const DEFAULT_GOSSIP_INTERVAL: Duration = Duration::from_secs(2);
/// Default cache size (1 GiB).
pub const DEFAULT_CACHE_SIZE: u64 = 1 << 30;
/// Default range scan interval.
pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Parameters and derived runtime objects for one node process.
#[derive(Debug)]
pub struct Context {
    /// host:port to bind for HTTP/RPC traffic.
    pub addr: String,

    /// Directory containing the CA and node certificates.
    pub certs: PathBuf,

    /// Comma-separated store specifications, each a colon-separated list of
    /// device attributes followed by `=` and either a path (persistent store)
    /// or an integer byte size (in-memory store), e.g.
    /// `hdd:7200rpm=/mnt/hda1,ssd=/mnt/ssd01,mem=1073741824`.
    pub stores: String,

    /// Colon-separated node topography or machine capabilities, matched
    /// against placement preferences.
    pub attrs: String,

    /// Maximum clock offset for the cluster.
    pub max_offset: Duration,

    /// Comma-separated gossip bootstrap resolvers.
    pub gossip_bootstrap: String,

    /// How often gossip is exchanged between hosts.
    pub gossip_interval: Duration,

    /// Hold back commit timestamps until every node clock has passed them.
    pub linearizable: bool,

    /// Memory in bytes for caching data, split evenly between the
    /// disk-backed stores.
    pub cache_size: u64,

    /// Duration over which each range should be visited about once by the
    /// range scanner.
    pub scan_interval: Duration,

    engines: Vec<Arc<dyn Engine>>,
    node_attributes: Attributes,
    gossip_bootstrap_resolvers: Vec<ResolverDescriptor>,
    http_client: HttpClientCache<reqwest::Client>,
}

impl Context {
    /// Create a context with default values.
    pub fn new() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            certs: PathBuf::from(DEFAULT_CERTS_DIR),
            stores: String::new(),
            attrs: String::new(),
            max_offset: DEFAULT_MAX_OFFSET,
            gossip_bootstrap: String::new(),
            gossip_interval: DEFAULT_GOSSIP_INTERVAL,
            linearizable: false,
            cache_size: DEFAULT_CACHE_SIZE,
            scan_interval: DEFAULT_SCAN_INTERVAL,
            engines: Vec::new(),
            node_attributes: Attributes::default(),
            gossip_bootstrap_resolvers: Vec::new(),
            http_client: HttpClientCache::new(),
        }
    }

    /// Storage engines built by the last successful [`Context::init`].
    pub fn engines(&self) -> &[Arc<dyn Engine>] {
        &self.engines
    }

    /// Parsed node attributes.
    pub fn node_attributes(&self) -> &Attributes {
        &self.node_attributes
    }

    /// Gossip bootstrap resolvers.
    pub fn gossip_bootstrap_resolvers(&self) -> &[ResolverDescriptor] {
        &self.gossip_bootstrap_resolvers
    }

    /// Build engines, parse node attributes and gossip resolvers.
    ///
    /// Derived state is replaced only when every phase succeeds; on error the
    /// previous engines, attributes and resolvers are left untouched. Any
    /// error is fatal to node startup.
    pub fn init(&mut self) -> ContextResult<()> {
        self.init_with(&DefaultEngineFactory)
    }

    /// Same as [`Context::init`], constructing engines with `factory`.
    pub fn init_with(&mut self, factory: &dyn EngineFactory) -> ContextResult<()> {
        let specs = parse_store_specs(&self.stores)?;

        let disk_stores = specs
            .iter()
            .filter(|spec| StoreLocation::parse(&spec.location).is_disk())
            .count() as u64;
        let store_cache_size = self.cache_size / disk_stores.max(1);

        let mut engines = Vec::with_capacity(specs.len());
        for spec in &specs {
            let engine = init_engine(factory, &spec.attrs, &spec.location, store_cache_size)
                .map_err(|e| ContextError::store_init(&spec.fragment, e))?;
            tracing::debug!(
                store = %spec.fragment,
                kind = %engine.kind(),
                attrs = %engine.attrs(),
                "storage engine initialized"
            );
            engines.push(engine);
        }

        let node_attributes = Attributes::parse(&self.attrs);

        let resolvers = parse_gossip_bootstrap(&self.gossip_bootstrap, &self.addr)?;
        if resolvers.is_empty() {
            return Err(ContextError::NoGossipAddresses);
        }

        self.engines = engines;
        self.node_attributes = node_attributes;
        self.gossip_bootstrap_resolvers = resolvers;
        tracing::info!(
            engines = self.engines.len(),
            resolvers = self.gossip_bootstrap_resolvers.len(),
            attrs = %self.node_attributes,
            "initialized storage engines and gossip bootstrap resolvers"
        );

        Ok(())
    }

    /// Shared HTTP client, built from [`Context::certs`] on first call.
    ///
    /// Safe to call from many threads. A failed build is returned to the
    /// caller and retried by the next call.
    pub fn http_client(&self) -> ContextResult<reqwest::Client> {
        self.http_client.get_or_try_init(|| {
            build_http_client(&self.certs).map_err(|e| ContextError::construction("HTTP client", e))
        })
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let ctx = Context::new();
        assert_eq!(ctx.addr, ":8080");
        assert_eq!(ctx.certs, PathBuf::from("certs"));
        assert_eq!(ctx.max_offset, Duration::from_millis(250));
        assert_eq!(ctx.gossip_interval, Duration::from_secs(2));
        assert_eq!(ctx.cache_size, 1_073_741_824);
        assert_eq!(ctx.scan_interval, Duration::from_secs(600));
        assert!(!ctx.linearizable);
        assert!(ctx.engines().is_empty());
        assert!(ctx.node_attributes().is_empty());
        assert!(ctx.gossip_bootstrap_resolvers().is_empty());
    }

    #[test]
    fn test_init_in_memory_node() {
        let mut ctx = Context::new();
        ctx.stores = "mem=1073741824".to_string();
        ctx.attrs = "us-east::ssd".to_string();
        ctx.gossip_bootstrap = "self://".to_string();
        ctx.addr = ":26257".to_string();

        ctx.init().unwrap();
        assert_eq!(ctx.engines().len(), 1);
        assert_eq!(ctx.node_attributes().as_slice(), &["us-east", "ssd"]);
        assert_eq!(
            ctx.gossip_bootstrap_resolvers()[0].host_port(),
            Some(("127.0.0.1", 26257))
        );
    }

    #[test]
    fn test_init_without_gossip_fails() {
        let mut ctx = Context::new();
        ctx.stores = "mem=1024".to_string();

        let err = ctx.init().unwrap_err();
        assert!(matches!(err, ContextError::NoGossipAddresses));
    }

    #[test]
    fn test_init_without_stores_fails() {
        let mut ctx = Context::new();
        ctx.gossip_bootstrap = "self://".to_string();

        let err = ctx.init().unwrap_err();
        assert!(matches!(err, ContextError::EmptyStoreSpec { .. }));
        assert!(ctx.gossip_bootstrap_resolvers().is_empty());
    }

    #[test]
    fn test_zero_capacity_tagged_with_store() {
        let mut ctx = Context::new();
        ctx.stores = "mem=0".to_string();
        ctx.gossip_bootstrap = "self://".to_string();

        let err = ctx.init().unwrap_err();
        match &err {
            ContextError::StoreInit { fragment, source } => {
                assert_eq!(fragment, "mem=0");
                assert!(matches!(**source, ContextError::ZeroCapacityStore));
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(err.is_configuration());
    }

    #[test]
    fn test_failed_reinit_keeps_previous_state() {
        let mut ctx = Context::new();
        ctx.stores = "mem=1024,mem=2048".to_string();
        ctx.gossip_bootstrap = "self://".to_string();
        ctx.init().unwrap();

        ctx.stores = "mem=4096".to_string();
        ctx.gossip_bootstrap = String::new();
        assert!(ctx.init().is_err());

        assert_eq!(ctx.engines().len(), 2);
        assert_eq!(ctx.gossip_bootstrap_resolvers().len(), 1);
    }

    #[test]
    fn test_http_client_error_is_construction() {
        let tmp = tempfile::tempdir().unwrap();
        let mut ctx = Context::new();
        ctx.certs = tmp.path().join("missing");

        let err = ctx.http_client().unwrap_err();
        assert!(err.is_construction());
        assert!(err.to_string().contains("HTTP client"));
    }
}
