//! Gossip bootstrap list parsing.

use crate::core::error::{ContextError, ContextResult};
use crate::gossip::resolver::ResolverDescriptor;
use crate::net::addr::ensure_host;

/// Prefix standing for this node's own bind address.
///
/// Lets single-node clusters name the gossip port once (in the bind address)
/// instead of twice.
pub const SELF_PREFIX: &str = "self://";

/// Parse a comma-separated gossip bootstrap list.
///
/// Empty entries are skipped. An entry starting with [`SELF_PREFIX`] is
/// replaced by `self_addr`, with the loopback host filled in if only a port
/// is configured. The first malformed entry aborts the parse.
///
/// An empty result is not an error here; [`Context::init`] rejects it.
///
/// [`Context::init`]: crate::core::context::Context::init
pub fn parse_gossip_bootstrap(
    bootstrap: &str,
    self_addr: &str,
) -> ContextResult<Vec<ResolverDescriptor>> {
    let mut resolvers = Vec::new();

    for address in bootstrap.split(',') {
        if address.is_empty() {
            continue;
        }

        let resolver = if address.starts_with(SELF_PREFIX) {
            let resolved = ensure_host(self_addr);
            ResolverDescriptor::parse(&resolved).map_err(|e| match e {
                ContextError::MalformedGossipAddress { reason, .. } => {
                    ContextError::malformed_gossip(
                        address,
                        format!("bind address {:?}: {}", self_addr, reason),
                    )
                }
                other => other,
            })?
        } else {
            ResolverDescriptor::parse(address)?
        };

        tracing::debug!(%resolver, "parsed gossip bootstrap resolver");
        resolvers.push(resolver);
    }

    Ok(resolvers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gossip::resolver::ResolverKind;

    #[test]
    fn test_self_uses_loopback_for_port_only() {
        let resolvers = parse_gossip_bootstrap("self://", ":26257").unwrap();
        assert_eq!(resolvers.len(), 1);
        assert_eq!(resolvers[0].kind(), ResolverKind::Tcp);
        assert_eq!(resolvers[0].host_port(), Some(("127.0.0.1", 26257)));
    }

    #[test]
    fn test_self_keeps_configured_host() {
        let resolvers = parse_gossip_bootstrap("self://anything", "node1:8080").unwrap();
        assert_eq!(resolvers[0].address(), "node1:8080");
    }

    #[test]
    fn test_empty_entries_skipped() {
        assert!(parse_gossip_bootstrap("", ":8080").unwrap().is_empty());
        assert!(parse_gossip_bootstrap(",,", ":8080").unwrap().is_empty());

        let resolvers = parse_gossip_bootstrap("node1:1,,node2:2,", ":8080").unwrap();
        let addrs: Vec<_> = resolvers.iter().map(|r| r.address()).collect();
        assert_eq!(addrs, vec!["node1:1", "node2:2"]);
    }

    #[test]
    fn test_malformed_entry_aborts() {
        let err = parse_gossip_bootstrap("node1:1,bogus,node2:2", ":8080").unwrap_err();
        match err {
            ContextError::MalformedGossipAddress { address, .. } => assert_eq!(address, "bogus"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_self_with_bad_bind_address() {
        let err = parse_gossip_bootstrap("self://", "no-port").unwrap_err();
        match err {
            ContextError::MalformedGossipAddress { address, reason } => {
                assert_eq!(address, "self://");
                assert!(reason.contains("no-port"), "{}", reason);
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
