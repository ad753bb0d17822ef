// Run settings, resolved once before any sampling starts

use crate::error::Result;
use crate::metrics::{Interval, OutputFormat, SampleHeader};
use crate::models::ConnectionTarget;
use crate::stats::{DEFAULT_SHARD_PREFIX, DatabaseFilter, NameTransformer, TopIndexOptions};

/// Checked in order for the host identifier
pub const HOSTNAME_ENV_VARS: [&str; 2] = ["COLLECTD_HOSTNAME", "HOSTNAME"];
pub const INTERVAL_ENV_VAR: &str = "COLLECTD_INTERVAL";
pub const DEFAULT_HOST_ID: &str = "localhost";

/// Everything a run needs to know. Nothing in the core reads the
/// environment; it all comes through here.
#[derive(Clone, Debug)]
pub struct Settings {
    pub target: ConnectionTarget,
    pub databases: DatabaseFilter,
    pub top: TopIndexOptions,
    pub names: NameTransformer,
    /// Host the samples are reported under
    pub host_id: String,
    pub interval: Interval,
    pub format: OutputFormat,
}

impl Settings {
    /// Defaults for `target`, with host identifier and interval taken from
    /// `lookup` (normally the process environment).
    pub fn for_target(
        target: ConnectionTarget,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        Ok(Self {
            target,
            databases: DatabaseFilter::all(),
            top: TopIndexOptions::default(),
            names: NameTransformer::new(DEFAULT_SHARD_PREFIX)?,
            host_id: resolve_host_id(None, &lookup),
            interval: resolve_interval(None, &lookup)?,
            format: OutputFormat::default(),
        })
    }

    pub fn header(&self, timestamp: i64) -> SampleHeader {
        SampleHeader { host_id: self.host_id.clone(), interval: self.interval, timestamp }
    }
}

/// Process environment lookup for [`Settings::for_target`] and the CLI.
pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Explicit value, then `COLLECTD_HOSTNAME`, then `HOSTNAME`, then `localhost`.
pub fn resolve_host_id(explicit: Option<&str>, lookup: impl Fn(&str) -> Option<String>) -> String {
    non_empty(explicit.map(str::to_string))
        .or_else(|| HOSTNAME_ENV_VARS.iter().find_map(|key| non_empty(lookup(*key))))
        .unwrap_or_else(|| DEFAULT_HOST_ID.to_string())
}

/// Explicit value, then `COLLECTD_INTERVAL`, then 10 seconds.
///
/// A bad explicit value is an error; a bad environment value falls back to
/// the default with a warning.
pub fn resolve_interval(
    explicit: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Interval> {
    if let Some(text) = non_empty(explicit.map(str::to_string)) {
        return Interval::parse(&text);
    }
    match non_empty(lookup(INTERVAL_ENV_VAR)) {
        Some(text) => Ok(Interval::parse(&text).unwrap_or_else(|e| {
            log::warn!("Ignoring {INTERVAL_ENV_VAR}: {e}");
            Interval::default()
        })),
        None => Ok(Interval::default()),
    }
}
