//! Common test utilities.
//!
//! This module contains shared helpers for integration tests.
//! Import with `mod common;` in test files.

#![allow(dead_code)]

use cairn::core::attributes::Attributes;
use cairn::core::config::Config;
use cairn::core::context::Context;
use cairn::core::error::{ContextError, ContextResult};
use cairn::storage::{Engine, EngineFactory, EngineKind, InMemEngine};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Write a TOML config to a temp file.
pub fn create_config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write config");
    file
}

/// Create a config with one in-memory store and a self gossip entry.
pub fn create_minimal_config() -> NamedTempFile {
    create_config_file(
        r#"
[node]
addr = ":26257"

[storage]
stores = "mem=1048576"

[gossip]
bootstrap = "self://"
"#,
    )
}

/// Load a config from a temp file.
pub fn load_config(file: &NamedTempFile) -> Config {
    Config::from_file(file.path()).expect("Failed to load config")
}

/// Context with the given stores and gossip list, other fields defaulted.
pub fn context_with(stores: &str, gossip: &str) -> Context {
    let mut ctx = Context::new();
    ctx.stores = stores.to_string();
    ctx.gossip_bootstrap = gossip.to_string();
    ctx
}

/// Path to the PEM fixtures (`ca.crt`, `node.crt`, `node.key`).
pub fn fixture_certs_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/certs")
}

/// Create a temporary directory for test data.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// One engine construction seen by [`RecordingEngineFactory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Construction {
    pub kind: EngineKind,
    pub attrs: Vec<String>,
}

/// Engine factory that records every construction instead of touching disk.
///
/// Disk stores are backed by [`StubDiskEngine`]; a directory listed in
/// `fail_dirs` fails construction.
#[derive(Debug, Default)]
pub struct RecordingEngineFactory {
    pub constructions: Mutex<Vec<Construction>>,
    pub fail_dirs: Vec<PathBuf>,
}

impl RecordingEngineFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(dir: &str) -> Self {
        Self {
            fail_dirs: vec![PathBuf::from(dir)],
            ..Self::default()
        }
    }

    pub fn constructions(&self) -> Vec<Construction> {
        self.constructions.lock().clone()
    }

    fn record(&self, kind: EngineKind, attrs: &Attributes) {
        self.constructions.lock().push(Construction {
            kind,
            attrs: attrs.as_slice().to_vec(),
        });
    }
}

impl EngineFactory for RecordingEngineFactory {
    fn in_mem(&self, attrs: Attributes, capacity: u64) -> ContextResult<Arc<dyn Engine>> {
        self.record(EngineKind::InMem { capacity }, &attrs);
        Ok(Arc::new(InMemEngine::new(attrs, capacity)))
    }

    fn disk(
        &self,
        attrs: Attributes,
        dir: &Path,
        cache_size: u64,
    ) -> ContextResult<Arc<dyn Engine>> {
        if self.fail_dirs.iter().any(|d| d == dir) {
            return Err(ContextError::construction(
                "disk engine",
                anyhow::anyhow!("device not ready: {}", dir.display()),
            ));
        }
        let kind = EngineKind::Disk {
            dir: dir.to_path_buf(),
            cache_size,
        };
        self.record(kind.clone(), &attrs);
        Ok(Arc::new(StubDiskEngine {
            kind,
            attrs,
            data: Mutex::new(BTreeMap::new()),
        }))
    }
}

/// Disk engine stand-in that keeps data in memory.
#[derive(Debug)]
pub struct StubDiskEngine {
    kind: EngineKind,
    attrs: Attributes,
    data: Mutex<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl Engine for StubDiskEngine {
    fn kind(&self) -> EngineKind {
        self.kind.clone()
    }

    fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    fn put(&self, key: &[u8], value: &[u8]) -> anyhow::Result<()> {
        self.data.lock().insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn get(&self, key: &[u8]) -> anyhow::Result<Option<Vec<u8>>> {
        Ok(self.data.lock().get(key).cloned())
    }

    fn delete(&self, key: &[u8]) -> anyhow::Result<()> {
        self.data.lock().remove(key);
        Ok(())
    }
}

/// Assert that a result is Ok and return the value.
#[track_caller]
pub fn assert_ok<T, E: std::fmt::Debug>(result: Result<T, E>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("Expected Ok, got Err: {:?}", e),
    }
}

/// Assert that a result is Err.
#[track_caller]
pub fn assert_err<T: std::fmt::Debug, E>(result: Result<T, E>) -> E {
    match result {
        Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
        Err(e) => e,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_minimal_config() {
        let file = create_minimal_config();
        let config = load_config(&file);
        assert_eq!(config.storage.stores, "mem=1048576");
    }

    #[test]
    fn test_fixture_certs_present() {
        let dir = fixture_certs_dir();
        for name in ["ca.crt", "node.crt", "node.key"] {
            assert!(dir.join(name).is_file(), "missing fixture {}", name);
        }
    }

    #[test]
    fn test_recording_factory_records() {
        let factory = RecordingEngineFactory::new();
        factory
            .disk(Attributes::parse("ssd"), Path::new("/mnt/ssd01"), 64)
            .unwrap();
        assert_eq!(factory.constructions().len(), 1);
    }
}
