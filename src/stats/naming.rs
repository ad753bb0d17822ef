//! Metric names for index samples.
//!
//! Sharded deployments name databases `<prefix>_<shard>_<suffix>`. Those
//! namespaces are shortened to `index_<shard>_<collection>`; anything else
//! is used as is.

use std::borrow::Cow;

use regex::Regex;

use crate::error::{Error, Result};

pub const DEFAULT_SHARD_PREFIX: &str = "t2s";

#[derive(Clone, Debug)]
pub struct NameTransformer {
    pattern: Regex,
}

impl NameTransformer {
    pub fn new(prefix: &str) -> Result<Self> {
        if prefix.is_empty() || prefix.contains('.') {
            return Err(Error::Config(format!("invalid shard prefix {prefix:?}")));
        }
        let pattern = Regex::new(&format!(r"^{}_([^_]+)_[^.]+\.(.*)$", regex::escape(prefix)))
            .map_err(|e| Error::Config(format!("invalid shard prefix {prefix:?}: {e}")))?;
        Ok(Self { pattern })
    }

    /// Metric name for a namespace.
    pub fn transform<'a>(&self, namespace: &'a str) -> Cow<'a, str> {
        self.pattern.replace(namespace, "index_${1}_${2}")
    }
}
