//! Store specification parsing.
//!
//! A store specification is a comma-separated list of stores, each a
//! colon-separated list of device attributes followed by `=` and either a
//! filesystem path (persistent store) or an integer byte size (in-memory
//! store):
//!
//! ```text
//! hdd:7200rpm=/mnt/hda1,ssd=/mnt/ssd01,ssd=/mnt/ssd02,mem=1073741824
//! ```

use crate::core::error::{ContextError, ContextResult};
use once_cell::sync::Lazy;
use regex::Regex;

static STORE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^=]+)=([^,]+)(,|$)").expect("store pattern is valid"));

/// One `attrs=location` entry of a store specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSpec {
    /// The entry as written, without the trailing comma.
    pub fragment: String,
    /// Colon-separated attributes.
    pub attrs: String,
    /// Path or byte size.
    pub location: String,
}

/// Parse a store specification into its entries, in input order.
///
/// Fails if the string is empty or has no `attrs=location` entry, or if any
/// part of it is left over between or after the entries.
pub fn parse_store_specs(spec: &str) -> ContextResult<Vec<StoreSpec>> {
    let mut specs = Vec::new();
    let mut covered = 0;

    for caps in STORE_RE.captures_iter(spec) {
        let (Some(whole), Some(attrs), Some(location)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            let fragment = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
            return Err(ContextError::MalformedStore {
                fragment: fragment.to_string(),
            });
        };

        if whole.start() != covered {
            return Err(ContextError::MalformedStore {
                fragment: spec[covered..whole.start()].to_string(),
            });
        }
        covered = whole.end();

        specs.push(StoreSpec {
            fragment: spec[whole.start()..location.end()].to_string(),
            attrs: attrs.as_str().to_string(),
            location: location.as_str().to_string(),
        });
    }

    if specs.is_empty() {
        return Err(ContextError::EmptyStoreSpec {
            spec: spec.to_string(),
        });
    }
    if covered != spec.len() {
        return Err(ContextError::MalformedStore {
            fragment: spec[covered..].to_string(),
        });
    }

    Ok(specs)
}
