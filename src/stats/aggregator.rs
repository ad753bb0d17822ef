//! Walks every selected database and collection and folds their statistics
//! into server-wide totals.

use crate::connection::StatsSource;
use crate::error::Result;
use crate::models::{DatabaseStats, ServerStats};

/// Oplog and replication state, skipped unless asked for
pub const LOCAL_DATABASE: &str = "local";
/// Users and roles, skipped unless asked for
pub const ADMIN_DATABASE: &str = "admin";

/// Which databases a run scans.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DatabaseFilter {
    /// Scan only this database. The server listing is not consulted.
    pub target: Option<String>,
    pub include_local: bool,
    pub include_admin: bool,
}

impl DatabaseFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn only(database: impl Into<String>) -> Self {
        Self { target: Some(database.into()), ..Self::default() }
    }

    /// Whether a listed database is left out when scanning the whole server.
    pub fn excludes(&self, database: &str) -> bool {
        match database {
            LOCAL_DATABASE => !self.include_local,
            ADMIN_DATABASE => !self.include_admin,
            _ => false,
        }
    }

    fn select(&self, source: &(impl StatsSource + ?Sized)) -> Result<Vec<String>> {
        if let Some(target) = &self.target {
            // Only `admin` may be scanned just by naming it.
            if target == LOCAL_DATABASE && !self.include_local {
                log::debug!("Skipping database {target}");
                return Ok(Vec::new());
            }
            return Ok(vec![target.clone()]);
        }
        let mut names = source.database_names()?;
        names.retain(|name| {
            let excluded = self.excludes(name);
            if excluded {
                log::debug!("Skipping database {name}");
            }
            !excluded
        });
        Ok(names)
    }
}

/// Fetch stats for every collection the filter selects.
///
/// A collection that can no longer be statted is logged and skipped; any
/// other failure aborts the run.
pub fn aggregate(
    source: &(impl StatsSource + ?Sized),
    filter: &DatabaseFilter,
) -> Result<ServerStats> {
    let mut server = ServerStats::default();

    for database in filter.select(source)? {
        let mut db_stats = DatabaseStats::new(database.as_str());

        for collection in source.collection_names(&database)? {
            match source.collection_stats(&database, &collection) {
                Ok(stats) => {
                    log::debug!(
                        "{}: {} docs, {} data bytes, {} index bytes",
                        stats.namespace,
                        stats.document_count,
                        stats.data_size,
                        stats.total_index_size
                    );
                    server.summary.add(&stats);
                    db_stats.collections.push(stats);
                }
                Err(e) if e.is_collection_unavailable() => {
                    log::warn!("Skipping {database}.{collection}: {e}");
                    server.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        server.databases.push(db_stats);
    }

    Ok(server)
}
