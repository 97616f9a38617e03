//! Gossip resolver descriptors.
//!
//! A resolver spec is `address` or `kind=address`:
//!
//! | kind      | address     | meaning                                   |
//! |-----------|-------------|-------------------------------------------|
//! | `tcp`     | `host:port` | a single gossip peer (default kind)       |
//! | `lb`      | `host:port` | a load balancer in front of gossip peers  |
//! | `http-lb` | `host:port` | an HTTP load balancer queried for peers   |
//! | `unix`    | path        | a unix domain socket                      |
//!
//! Descriptors are not connected; the gossip subsystem dials them.

use crate::core::error::{ContextError, ContextResult};
use crate::net::addr::split_host_port;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Resolver type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResolverKind {
    /// Direct TCP peer.
    Tcp,
    /// Unix domain socket.
    Unix,
    /// TCP load balancer.
    Lb,
    /// HTTP load balancer.
    HttpLb,
}

impl ResolverKind {
    /// Spec name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tcp => "tcp",
            Self::Unix => "unix",
            Self::Lb => "lb",
            Self::HttpLb => "http-lb",
        }
    }

    /// Look up a kind by spec name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "tcp" => Some(Self::Tcp),
            "unix" => Some(Self::Unix),
            "lb" => Some(Self::Lb),
            "http-lb" => Some(Self::HttpLb),
            _ => None,
        }
    }

    /// Check if addresses of this kind are `host:port`.
    pub fn is_network(&self) -> bool {
        !matches!(self, Self::Unix)
    }
}

impl fmt::Display for ResolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parsed, not-yet-connected gossip bootstrap endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolverDescriptor {
    kind: ResolverKind,
    address: String,
}

impl ResolverDescriptor {
    /// Parse a resolver spec.
    pub fn parse(spec: &str) -> ContextResult<Self> {
        let mut parts = spec.split('=');
        let (kind, address) = match (parts.next(), parts.next(), parts.next()) {
            (Some(address), None, _) => (ResolverKind::Tcp, address),
            (Some(kind), Some(address), None) => {
                let kind = ResolverKind::from_name(kind).ok_or_else(|| {
                    ContextError::malformed_gossip(spec, format!("unknown address type {:?}", kind))
                })?;
                (kind, address)
            }
            _ => return Err(ContextError::malformed_gossip(spec, "unable to parse resolver spec")),
        };

        if address.is_empty() {
            return Err(ContextError::malformed_gossip(spec, "empty address"));
        }
        if kind.is_network() {
            split_host_port(address)
                .map_err(|reason| ContextError::malformed_gossip(spec, reason))?;
        }

        Ok(Self {
            kind,
            address: address.to_string(),
        })
    }

    /// Resolver type.
    pub fn kind(&self) -> ResolverKind {
        self.kind
    }

    /// Address, without the kind prefix.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Host and port for network resolvers.
    pub fn host_port(&self) -> Option<(&str, u16)> {
        if !self.kind.is_network() {
            return None;
        }
        split_host_port(&self.address).ok()
    }
}

impl FromStr for ResolverDescriptor {
    type Err = ContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ResolverDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.kind, self.address)
    }
}
