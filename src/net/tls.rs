//! TLS material loaded from the node's certificate directory.
//!
//! # Layout
//!
//! ```text
//! certs/
//! ├── ca.crt     - CA certificate(s) trusted for peer connections
//! ├── node.crt   - this node's certificate chain
//! └── node.key   - this node's private key (PKCS#8 or RSA PEM)
//! ```

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// CA bundle file name.
pub const CA_CERT_FILE: &str = "ca.crt";
/// Node certificate chain file name.
pub const NODE_CERT_FILE: &str = "node.crt";
/// Node private key file name.
pub const NODE_KEY_FILE: &str = "node.key";

/// A certificate directory.
#[derive(Debug, Clone)]
pub struct CertsDir {
    dir: PathBuf,
}

impl CertsDir {
    /// Wrap a certificate directory path.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory path.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// CA bundle path.
    pub fn ca_cert_path(&self) -> PathBuf {
        self.dir.join(CA_CERT_FILE)
    }

    /// Node certificate chain path.
    pub fn node_cert_path(&self) -> PathBuf {
        self.dir.join(NODE_CERT_FILE)
    }

    /// Node private key path.
    pub fn node_key_path(&self) -> PathBuf {
        self.dir.join(NODE_KEY_FILE)
    }

    /// Validate that all TLS files exist.
    pub fn validate(&self) -> Result<()> {
        if !self.dir.is_dir() {
            anyhow::bail!("certificate directory not found: {}", self.dir.display());
        }
        for path in [
            self.ca_cert_path(),
            self.node_cert_path(),
            self.node_key_path(),
        ] {
            if !path.exists() {
                anyhow::bail!("TLS file not found: {}", path.display());
            }
        }
        Ok(())
    }

    /// Load the node identity.
    pub fn load_identity(&self) -> Result<TlsIdentity> {
        TlsIdentity::load(&self.node_cert_path(), &self.node_key_path())
    }

    /// Load the CA trust store.
    pub fn load_trust_store(&self) -> Result<TrustStore> {
        TrustStore::load(&self.ca_cert_path())
    }
}

/// Loaded TLS identity (certificate chain + private key).
#[derive(Clone)]
pub struct TlsIdentity {
    /// Certificate chain in PEM format.
    pub cert_chain_pem: Vec<u8>,
    /// Private key in PEM format.
    pub key_pem: Vec<u8>,
}

impl std::fmt::Debug for TlsIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsIdentity")
            .field("cert_chain_pem", &format_args!("{} bytes", self.cert_chain_pem.len()))
            .field("key_pem", &"<redacted>")
            .finish()
    }
}

impl TlsIdentity {
    /// Load a TLS identity from file paths.
    pub fn load(cert_chain_path: &Path, key_path: &Path) -> Result<Self> {
        let cert_chain_pem = std::fs::read(cert_chain_path)
            .with_context(|| format!("failed to read cert chain: {}", cert_chain_path.display()))?;
        let key_pem = std::fs::read(key_path)
            .with_context(|| format!("failed to read private key: {}", key_path.display()))?;

        if count_pem_blocks(&cert_chain_pem, "CERTIFICATE") == 0 {
            anyhow::bail!("no certificate found in {}", cert_chain_path.display());
        }
        if !String::from_utf8_lossy(&key_pem).contains("PRIVATE KEY-----") {
            anyhow::bail!("no private key found in {}", key_path.display());
        }

        Ok(Self {
            cert_chain_pem,
            key_pem,
        })
    }

    /// Key followed by certificate chain, the single-buffer form HTTP
    /// clients accept.
    pub fn to_pem_bundle(&self) -> Vec<u8> {
        let mut bundle = Vec::with_capacity(self.key_pem.len() + self.cert_chain_pem.len() + 1);
        bundle.extend_from_slice(&self.key_pem);
        if !bundle.ends_with(b"\n") {
            bundle.push(b'\n');
        }
        bundle.extend_from_slice(&self.cert_chain_pem);
        bundle
    }
}

/// Trust store for CA certificates.
#[derive(Debug, Clone)]
pub struct TrustStore {
    /// CA certificates in PEM format.
    pub ca_certs_pem: Vec<u8>,
    /// Number of certificates loaded.
    pub cert_count: usize,
}

impl TrustStore {
    /// Load a trust store from a CA bundle file.
    pub fn load(ca_path: &Path) -> Result<Self> {
        let ca_certs_pem = std::fs::read(ca_path)
            .with_context(|| format!("failed to read CA bundle: {}", ca_path.display()))?;

        let cert_count = count_pem_blocks(&ca_certs_pem, "CERTIFICATE");
        if cert_count == 0 {
            anyhow::bail!("no CA certificate found in {}", ca_path.display());
        }

        Ok(Self {
            ca_certs_pem,
            cert_count,
        })
    }
}

fn count_pem_blocks(pem: &[u8], label: &str) -> usize {
    let marker = format!("-----BEGIN {}-----", label);
    String::from_utf8_lossy(pem).matches(marker.as_str()).count()
}
