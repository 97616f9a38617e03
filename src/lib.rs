//! Cairn - node bootstrap configuration for a distributed key-value store.
//!
//! Cairn turns operator-supplied configuration strings into the runtime
//! objects a storage node needs at startup: storage engines, node capability
//! attributes, gossip bootstrap resolvers and a shared TLS-capable HTTP
//! client.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │               config file (TOML)  +  CLI overrides              │
//! └─────────────────────────────────────────────────────────────────┘
//!                                  │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          Context::init                          │
//! │   stores → engines │ attrs → attributes │ gossip → resolvers    │
//! └─────────────────────────────────────────────────────────────────┘
//!                                  │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Engines (mem/disk) │ Attributes │ ResolverDescriptors │ HTTP   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Module Organization
//!
//! ## Core
//! - [`core::context`] - Bootstrap context and initialization
//! - [`core::attributes`] - Capability attributes
//! - [`core::config`] - Configuration parsing and validation
//! - [`core::runtime`] - Process lifecycle
//! - [`core::error`] - Error types
//!
//! ## Storage
//! - [`storage::spec`] - Store specification parsing
//! - [`storage::engine`] - Engine trait and factory
//! - [`storage::memory`] - In-memory engine
//! - [`storage::disk`] - Disk-backed engine
//!
//! ## Gossip
//! - [`gossip::bootstrap`] - Bootstrap list parsing
//! - [`gossip::resolver`] - Resolver descriptors
//!
//! ## Networking
//! - [`net::addr`] - Address helpers
//! - [`net::tls`] - Certificate directory loading
//! - [`net::http`] - Shared HTTP client
//!
//! ## CLI
//! - [`cli::commands`] - CLI command implementations
//!
//! # Example
//!
//! ```no_run
//! use cairn::core::context::Context;
//!
//! let mut ctx = Context::new();
//! ctx.stores = "ssd=/mnt/ssd01,mem=1073741824".to_string();
//! ctx.attrs = "us-east:ssd".to_string();
//! ctx.gossip_bootstrap = "self://".to_string();
//! ctx.init().expect("node bootstrap failed");
//! assert_eq!(ctx.engines().len(), 2);
//! ```

// Core infrastructure
pub mod core;

// Storage engine bootstrap
pub mod storage;

// Gossip bootstrap
pub mod gossip;

// Networking
pub mod net;

// CLI
pub mod cli;

// Re-exports for convenience
pub use self::core::{attributes, config, context, error, runtime};
pub use self::core::attributes::Attributes;
pub use self::core::context::Context;
pub use self::core::error::{ContextError, ContextResult};
