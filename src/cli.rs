//! Command line arguments.

use std::time::Duration;

use clap::Parser;

use crate::config::{Settings, resolve_host_id, resolve_interval};
use crate::error::Result;
use crate::metrics::OutputFormat;
use crate::models::{ConnectionTarget, Credentials, DEFAULT_HOST, DEFAULT_PORT};
use crate::stats::{
    DEFAULT_SHARD_PREFIX, DEFAULT_TOP_N, DatabaseFilter, NameTransformer, SizeCollision,
    TopIndexOptions,
};

/// Print collection and index size statistics of a MongoDB server as
/// collectd PUTVAL lines.
#[derive(Parser, Debug, Clone)]
#[command(name = "mongo-index-stats")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct Cli {
    /// MongoDB host
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// MongoDB port
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Target database to generate statistics for. All if omitted.
    #[arg(short, long)]
    pub database: Option<String>,

    /// Admin username if authentication is enabled
    #[arg(short, long)]
    pub user: Option<String>,

    /// Admin password if authentication is enabled
    #[arg(long, env = "MONGO_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Database to authenticate against
    #[arg(long)]
    pub auth_source: Option<String>,

    /// Seconds to wait for a reachable server [default: driver's 30]
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Report every index instead of the top ones
    #[arg(short, long)]
    pub all: bool,

    /// Number of top indexes to report
    #[arg(short = 'n', long = "nb-top", visible_alias = "nb_top", default_value_t = DEFAULT_TOP_N)]
    pub nb_top: usize,

    /// Report every index of a given size instead of one per size
    #[arg(long)]
    pub keep_size_ties: bool,

    /// Also scan the `local` database, even when it is the --database target
    #[arg(long)]
    pub include_local: bool,

    /// Also scan the `admin` database when scanning all databases
    #[arg(long)]
    pub include_admin: bool,

    /// Database name prefix of sharded deployments, shortened in metric names
    #[arg(long, default_value = DEFAULT_SHARD_PREFIX)]
    pub shard_prefix: String,

    /// Host identifier for the samples [default: $COLLECTD_HOSTNAME, $HOSTNAME, localhost]
    #[arg(long)]
    pub hostname: Option<String>,

    /// Sampling interval in seconds [default: $COLLECTD_INTERVAL, 10]
    #[arg(long)]
    pub interval: Option<String>,

    /// Output line format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Putval)]
    pub format: OutputFormat,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Default log filter for the requested verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    /// Resolve arguments and environment fallbacks into run settings.
    pub fn into_settings(self, lookup: impl Fn(&str) -> Option<String>) -> Result<Settings> {
        let mut target = ConnectionTarget::new(self.host, self.port);
        match (self.user, self.password) {
            (Some(user), Some(password)) if !user.is_empty() && !password.is_empty() => {
                target = target.with_credentials(Credentials {
                    user,
                    password,
                    auth_source: self.auth_source,
                });
            }
            (None, None) => {}
            _ => log::warn!(
                "Both --user and --password are needed to authenticate, connecting without"
            ),
        }
        if let Some(secs) = self.timeout {
            target = target.with_server_selection_timeout(Duration::from_secs(secs));
        }

        let databases = DatabaseFilter {
            target: self.database.filter(|name| !name.is_empty()),
            include_local: self.include_local,
            include_admin: self.include_admin,
        };

        let top = TopIndexOptions {
            limit: if self.all { None } else { Some(self.nb_top) },
            collision: if self.keep_size_ties {
                SizeCollision::KeepAll
            } else {
                SizeCollision::OnePerSize
            },
        };

        Ok(Settings {
            target,
            databases,
            top,
            names: NameTransformer::new(&self.shard_prefix)?,
            host_id: resolve_host_id(self.hostname.as_deref(), &lookup),
            interval: resolve_interval(self.interval.as_deref(), &lookup)?,
            format: self.format,
        })
    }
}
