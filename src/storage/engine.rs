//! Engine handles and engine construction.
//!
//! The bootstrap layer only decides *which* engine to build for a store and
//! with *what* parameters. Construction goes through [`EngineFactory`] so the
//! node can substitute its own engine implementations.

use crate::core::attributes::Attributes;
use crate::core::error::{ContextError, ContextResult};
use crate::storage::disk::DiskEngine;
use crate::storage::memory::InMemEngine;
use anyhow::Result;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Kind and sizing of a constructed engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineKind {
    /// Memory-backed engine with a byte capacity.
    InMem { capacity: u64 },
    /// Disk-backed engine rooted at a directory.
    Disk { dir: PathBuf, cache_size: u64 },
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InMem { capacity } => write!(f, "mem({} bytes)", capacity),
            Self::Disk { dir, .. } => write!(f, "disk({})", dir.display()),
        }
    }
}

/// A storage engine owned by the node for the life of the process.
pub trait Engine: Send + Sync + fmt::Debug {
    /// Engine kind and sizing.
    fn kind(&self) -> EngineKind;

    /// Store attributes used for placement matching.
    fn attrs(&self) -> &Attributes;

    /// Write a value.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Read a value.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Remove a value. Removing a missing key is not an error.
    fn delete(&self, key: &[u8]) -> Result<()>;
}

/// Interpreted store location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    /// In-memory store of the given size in bytes.
    Memory(u64),
    /// Filesystem path for a disk-backed store.
    Path(PathBuf),
}

impl StoreLocation {
    /// Interpret a location string.
    ///
    /// A string of ASCII digits that fits in a `u64` is a byte size, anything
    /// else is a path. A zero size is returned as-is and rejected by
    /// [`init_engine`].
    pub fn parse(location: &str) -> Self {
        let is_decimal = !location.is_empty() && location.bytes().all(|b| b.is_ascii_digit());
        if is_decimal {
            if let Ok(size) = location.parse::<u64>() {
                return Self::Memory(size);
            }
        }
        Self::Path(PathBuf::from(location))
    }

    /// Check if this location names a disk-backed store.
    pub fn is_disk(&self) -> bool {
        matches!(self, Self::Path(_))
    }
}

/// Constructs engines for parsed store specifications.
pub trait EngineFactory {
    /// Build an in-memory engine. `capacity` is never zero.
    fn in_mem(&self, attrs: Attributes, capacity: u64) -> ContextResult<Arc<dyn Engine>>;

    /// Build a disk-backed engine rooted at `dir`.
    fn disk(&self, attrs: Attributes, dir: &Path, cache_size: u64)
        -> ContextResult<Arc<dyn Engine>>;
}

/// Factory building the engines shipped with this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEngineFactory;

impl EngineFactory for DefaultEngineFactory {
    fn in_mem(&self, attrs: Attributes, capacity: u64) -> ContextResult<Arc<dyn Engine>> {
        Ok(Arc::new(InMemEngine::new(attrs, capacity)))
    }

    fn disk(
        &self,
        attrs: Attributes,
        dir: &Path,
        cache_size: u64,
    ) -> ContextResult<Arc<dyn Engine>> {
        let engine = DiskEngine::open(attrs, dir, cache_size)
            .map_err(|e| ContextError::construction("disk engine", e))?;
        Ok(Arc::new(engine))
    }
}

/// Build one engine from an attribute string and a location string.
///
/// The location is a byte size for an in-memory engine or a path for a
/// disk-backed engine, which receives `cache_size` as its cache budget.
pub fn init_engine(
    factory: &dyn EngineFactory,
    attrs: &str,
    location: &str,
    cache_size: u64,
) -> ContextResult<Arc<dyn Engine>> {
    let attrs = Attributes::parse(attrs);
    match StoreLocation::parse(location) {
        StoreLocation::Memory(0) => Err(ContextError::ZeroCapacityStore),
        StoreLocation::Memory(capacity) => factory.in_mem(attrs, capacity),
        StoreLocation::Path(dir) => factory.disk(attrs, &dir, cache_size),
    }
}
