//! One sampling run, from connection to rendered lines.

use crate::config::Settings;
use crate::connection::{ConnectionManager, MongoSource, StatsSource};
use crate::error::Result;
use crate::helpers::{format_bytes, format_number, format_size, is_local_host, machine_host_name};
use crate::metrics::{MemorySnapshot, MetricSample, build_samples, render};
use crate::models::{IndexSizeEntry, ServerStats};
use crate::stats::{aggregate, top_indexes};

/// Result of a successful run. Nothing is written until a run has produced
/// all of its lines.
#[derive(Clone, Debug)]
pub struct Report {
    pub stats: ServerStats,
    pub top: Vec<IndexSizeEntry>,
    pub samples: Vec<MetricSample>,
    pub lines: Vec<String>,
}

/// Aggregate every selected collection of `source`.
pub fn gather(source: &(impl StatsSource + ?Sized), settings: &Settings) -> Result<ServerStats> {
    let stats = aggregate(source, &settings.databases)?;
    log::info!(
        "Scanned {} collections in {} databases ({} skipped): {} documents, {} data, {} indexes",
        stats.collection_count(),
        stats.databases.len(),
        stats.skipped,
        format_number(stats.summary.document_count),
        format_size(stats.summary.data_size),
        format_size(stats.summary.total_index_size),
    );
    Ok(stats)
}

/// Select the largest indexes and render every sample of the run.
pub fn build_report(
    stats: ServerStats,
    settings: &Settings,
    memory: Option<MemorySnapshot>,
    timestamp: i64,
) -> Result<Report> {
    let top = top_indexes(&stats, settings.top);
    for entry in &top {
        log::debug!(
            "Large index {}.{}: {}",
            entry.namespace,
            entry.index_name,
            format_size(entry.size)
        );
    }

    let samples = build_samples(&stats.summary, &top, &settings.names, memory.as_ref());
    let lines = render(&samples, &settings.header(timestamp), settings.format)?;
    Ok(Report { stats, top, samples, lines })
}

/// Runs samplings against a live server.
pub struct Collector {
    manager: ConnectionManager,
}

impl Collector {
    pub fn new() -> Result<Self> {
        Ok(Self { manager: ConnectionManager::new()? })
    }

    /// Connect, gather, and render. The client is shut down whether the run
    /// succeeds or not.
    pub fn run(&self, settings: &Settings) -> Result<Report> {
        log::info!("Sampling {}", settings.target);
        let client = self.manager.connect(&settings.target)?;

        let stats = gather(&MongoSource::new(&self.manager, &client), settings);
        self.manager.disconnect(client);
        let stats = stats?;

        let timestamp = chrono::Utc::now().timestamp();
        let memory = if is_local_host(&settings.target.host, machine_host_name().as_deref()) {
            let snapshot = MemorySnapshot::capture();
            log::debug!(
                "RAM headroom over indexes: {}",
                format_bytes(snapshot.ram_headroom(stats.summary.total_index_size))
            );
            Some(snapshot)
        } else {
            log::debug!("{} is not this machine, skipping RAM samples", settings.target.host);
            None
        };

        build_report(stats, settings, memory, timestamp)
    }
}
