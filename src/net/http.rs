//! Lazily constructed HTTP client.
//!
//! The node shares one TLS-capable HTTP client for out-of-band requests
//! (node lookups behind `http-lb` resolvers, status endpoints). It is built
//! on first use from the certificate directory.

use crate::net::tls::CertsDir;
use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::path::Path;

/// Memoizes one lazily built value behind a lock.
///
/// The lock covers the whole check-and-construct section, so concurrent
/// first callers see exactly one successful construction and all receive
/// clones of the same value. A failed construction caches nothing; the next
/// caller tries again.
#[derive(Debug)]
pub struct HttpClientCache<T> {
    client: Mutex<Option<T>>,
}

impl<T: Clone> HttpClientCache<T> {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            client: Mutex::new(None),
        }
    }

    /// Return the cached value, building it with `init` if there is none.
    pub fn get_or_try_init<E, F>(&self, init: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let mut guard = self.client.lock();
        if let Some(client) = guard.as_ref() {
            return Ok(client.clone());
        }
        let client = init()?;
        *guard = Some(client.clone());
        Ok(client)
    }

    /// Return the cached value without building it.
    pub fn get(&self) -> Option<T> {
        self.client.lock().clone()
    }

    /// Check if a value has been built.
    pub fn is_initialized(&self) -> bool {
        self.client.lock().is_some()
    }
}

impl<T: Clone> Default for HttpClientCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Build an HTTP client that trusts the directory's CA and presents the
/// node certificate.
pub fn build_http_client(certs_dir: &Path) -> Result<reqwest::Client> {
    let certs = CertsDir::new(certs_dir);
    certs.validate()?;

    let trust_store = certs.load_trust_store()?;
    let identity = certs.load_identity()?;

    let ca = reqwest::Certificate::from_pem(&trust_store.ca_certs_pem)
        .with_context(|| format!("invalid CA certificate: {}", certs.ca_cert_path().display()))?;
    let identity = reqwest::Identity::from_pem(&identity.to_pem_bundle()).with_context(|| {
        format!(
            "invalid node certificate or key in {}",
            certs.dir().display()
        )
    })?;

    let client = reqwest::Client::builder()
        .use_rustls_tls()
        .add_root_certificate(ca)
        .identity(identity)
        .build()
        .context("failed to build HTTP client")?;

    tracing::info!(
        certs = %certs.dir().display(),
        ca_certs = trust_store.cert_count,
        "HTTP client initialized"
    );
    Ok(client)
}
