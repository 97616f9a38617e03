//! Gossip network bootstrap.
//!
//! Parses the operator's bootstrap list into resolver descriptors. Dialing
//! and the gossip protocol itself live outside this crate.

pub mod bootstrap;
pub mod resolver;

pub use bootstrap::{parse_gossip_bootstrap, SELF_PREFIX};
pub use resolver::{ResolverDescriptor, ResolverKind};
