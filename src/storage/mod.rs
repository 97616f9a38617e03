//! Storage engine bootstrap.
//!
//! Turns the operator's store specification into constructed engines.
//!
//! # Modules
//!
//! - [`spec`] - Store specification parsing
//! - [`engine`] - Engine trait, location interpretation and factory
//! - [`memory`] - In-memory engine
//! - [`disk`] - Disk-backed engine

pub mod disk;
pub mod engine;
pub mod memory;
pub mod spec;

// Re-exports for convenience
pub use disk::DiskEngine;
pub use engine::{
    init_engine, DefaultEngineFactory, Engine, EngineFactory, EngineKind, StoreLocation,
};
pub use memory::InMemEngine;
pub use spec::{parse_store_specs, StoreSpec};
