//! Networking helpers used during bootstrap.
//!
//! - [`addr`] - Host/port splitting and loopback defaulting
//! - [`tls`] - Certificate directory loading
//! - [`http`] - Lazily built, shared HTTP client

pub mod addr;
pub mod http;
pub mod tls;
