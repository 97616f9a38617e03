//! Disk-backed engine.
//!
//! Writes are appended to a length-prefixed log in the store directory and
//! indexed in memory. Opening an existing directory replays the log, so a
//! store survives node restarts and repeated [`Context::init`] calls.
//!
//! # Log format
//!
//! ```text
//! ┌──────────────┬──────────────────────────────┐
//! │ len: u32 LE  │ bincode(LogRecord), len bytes│  ... repeated
//! └──────────────┴──────────────────────────────┘
//! ```
//!
//! A torn record at the tail (crash during append) ends replay.
//!
//! [`Context::init`]: crate::core::context::Context::init

use crate::core::attributes::Attributes;
use crate::storage::engine::{Engine, EngineKind};
use anyhow::{Context, Result};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

/// Log file name inside the store directory.
pub const LOG_FILE_NAME: &str = "engine.log";

/// A single log record.
#[derive(Debug, Clone, Serialize, Deserialize)]
enum LogRecord {
    Put { key: Vec<u8>, value: Vec<u8> },
    Delete { key: Vec<u8> },
}

impl LogRecord {
    fn serialize(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).context("failed to serialize log record")
    }

    fn deserialize(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).context("failed to deserialize log record")
    }
}

/// Disk-backed engine rooted at a directory.
#[derive(Debug)]
pub struct DiskEngine {
    attrs: Attributes,
    dir: PathBuf,
    cache_size: u64,
    index: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
    log: Mutex<File>,
}

impl DiskEngine {
    /// Open or create a store directory.
    ///
    /// Fails if the directory cannot be created or the log cannot be read
    /// or opened for append.
    pub fn open(attrs: Attributes, dir: &Path, cache_size: u64) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create store directory: {}", dir.display()))?;

        let log_path = dir.join(LOG_FILE_NAME);
        let index = Self::replay(&log_path)?;

        let log = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("failed to open store log: {}", log_path.display()))?;

        tracing::debug!(
            dir = %dir.display(),
            keys = index.len(),
            cache_size,
            "opened disk engine"
        );

        Ok(Self {
            attrs,
            dir: dir.to_path_buf(),
            cache_size,
            index: RwLock::new(index),
            log: Mutex::new(log),
        })
    }

    /// Store directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Cache budget in bytes assigned to this store.
    pub fn cache_size(&self) -> u64 {
        self.cache_size
    }

    /// Number of live keys.
    pub fn len(&self) -> usize {
        self.index.read().len()
    }

    /// Check if the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.index.read().is_empty()
    }

    /// Rebuild the in-memory index from the log.
    fn replay(log_path: &Path) -> Result<BTreeMap<Vec<u8>, Vec<u8>>> {
        let mut index = BTreeMap::new();

        let file = match File::open(log_path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(index),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read store log: {}", log_path.display()))
            }
        };

        let mut reader = BufReader::new(file);
        let mut len_buf = [0u8; 4];
        let mut records = 0u64;

        loop {
            match reader.read_exact(&mut len_buf) {
                Ok(_) => {}
                Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e).context("failed to read record length"),
            }

            let len = u32::from_le_bytes(len_buf) as usize;
            let mut record_buf = vec![0u8; len];
            match reader.read_exact(&mut record_buf) {
                Ok(_) => {}
                Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                    tracing::warn!(
                        log = %log_path.display(),
                        records,
                        "torn record at end of store log, ignoring tail"
                    );
                    break;
                }
                Err(e) => return Err(e).context("failed to read record data"),
            }

            match LogRecord::deserialize(&record_buf)? {
                LogRecord::Put { key, value } => {
                    index.insert(key, value);
                }
                LogRecord::Delete { key } => {
                    index.remove(&key);
                }
            }
            records += 1;
        }

        Ok(index)
    }

    fn append(&self, record: &LogRecord) -> Result<()> {
        let bytes = record.serialize()?;
        let mut frame = Vec::with_capacity(4 + bytes.len());
        frame.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
        frame.extend_from_slice(&bytes);

        let mut log = self.log.lock();
        log.write_all(&frame).context("failed to append to store log")?;
        log.flush().context("failed to flush store log")?;
        Ok(())
    }
}

impl Engine for DiskEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Disk {
            dir: self.dir.clone(),
            cache_size: self.cache_size,
        }
    }

    fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.append(&LogRecord::Put {
            key: key.to_vec(),
            value: value.to_vec(),
        })?;
        self.index.write().insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.index.read().get(key).cloned())
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        if !self.index.read().contains_key(key) {
            return Ok(());
        }
        self.append(&LogRecord::Delete { key: key.to_vec() })?;
        self.index.write().remove(key);
        Ok(())
    }
}
