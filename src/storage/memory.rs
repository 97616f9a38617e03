//! In-memory engine with a fixed byte capacity.

use crate::core::attributes::Attributes;
use crate::storage::engine::{Engine, EngineKind};
use anyhow::Result;
use parking_lot::RwLock;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct InMemState {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
    /// Sum of key and value lengths currently stored.
    used_bytes: u64,
}

/// Memory-backed engine.
///
/// Capacity counts key and value bytes. Writes that would exceed it fail.
#[derive(Debug)]
pub struct InMemEngine {
    attrs: Attributes,
    capacity: u64,
    state: RwLock<InMemState>,
}

impl InMemEngine {
    /// Create an empty engine.
    pub fn new(attrs: Attributes, capacity: u64) -> Self {
        Self {
            attrs,
            capacity,
            state: RwLock::new(InMemState::default()),
        }
    }

    /// Configured capacity in bytes.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Bytes currently in use.
    pub fn used_bytes(&self) -> u64 {
        self.state.read().used_bytes
    }

    /// Bytes still available.
    pub fn available_bytes(&self) -> u64 {
        self.capacity.saturating_sub(self.used_bytes())
    }
}

impl Engine for InMemEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::InMem {
            capacity: self.capacity,
        }
    }

    fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        let mut state = self.state.write();
        let released = state
            .data
            .get(key)
            .map(|old| (key.len() + old.len()) as u64)
            .unwrap_or(0);
        let needed = state.used_bytes - released + (key.len() + value.len()) as u64;
        if needed > self.capacity {
            anyhow::bail!(
                "in-memory store full: write needs {} bytes, capacity is {}",
                needed,
                self.capacity
            );
        }
        state.data.insert(key.to_vec(), value.to_vec());
        state.used_bytes = needed;
        Ok(())
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.state.read().data.get(key).cloned())
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        let mut state = self.state.write();
        if let Some(old) = state.data.remove(key) {
            state.used_bytes -= (key.len() + old.len()) as u64;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get_delete() {
        let engine = InMemEngine::new(Attributes::parse("mem"), 1024);
        engine.put(b"a", b"1").unwrap();
        assert_eq!(engine.get(b"a").unwrap(), Some(b"1".to_vec()));
        assert_eq!(engine.used_bytes(), 2);

        engine.delete(b"a").unwrap();
        assert_eq!(engine.get(b"a").unwrap(), None);
        assert_eq!(engine.used_bytes(), 0);

        // Deleting a missing key is fine.
        engine.delete(b"missing").unwrap();
    }

    #[test]
    fn test_capacity_enforced() {
        let engine = InMemEngine::new(Attributes::default(), 8);
        engine.put(b"key", b"vals").unwrap();
        assert_eq!(engine.available_bytes(), 1);

        let err = engine.put(b"k2", b"v").unwrap_err();
        assert!(err.to_string().contains("capacity is 8"));
        assert_eq!(engine.get(b"k2").unwrap(), None);
    }

    #[test]
    fn test_overwrite_reuses_space() {
        let engine = InMemEngine::new(Attributes::default(), 8);
        engine.put(b"key", b"vals").unwrap();
        engine.put(b"key", b"v").unwrap();
        assert_eq!(engine.used_bytes(), 4);
        assert_eq!(engine.get(b"key").unwrap(), Some(b"v".to_vec()));
    }
}
