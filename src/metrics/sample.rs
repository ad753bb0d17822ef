// Metric samples produced by a run

use serde::Serialize;

use crate::metrics::memory::{MemorySnapshot, clamp_i64};
use crate::models::{IndexSizeEntry, SummaryStats};
use crate::stats::NameTransformer;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Category {
    #[serde(rename = "mongo_largest_indexes")]
    LargestIndexes,
    #[serde(rename = "mongo_size")]
    Size,
    #[serde(rename = "mongo_ram")]
    Ram,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::LargestIndexes => "mongo_largest_indexes",
            Category::Size => "mongo_size",
            Category::Ram => "mongo_ram",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One gauge value
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetricSample {
    pub category: Category,
    pub name: String,
    pub value: i64,
}

impl MetricSample {
    pub fn new(category: Category, name: impl Into<String>, value: i64) -> Self {
        Self { category, name: name.into(), value }
    }

    fn bytes(category: Category, name: &str, value: u64) -> Self {
        Self::new(category, name, clamp_i64(value as i128))
    }
}

/// Samples for a run, in emission order: the selected indexes, the size
/// totals, then RAM headroom when `memory` is given.
pub fn build_samples(
    summary: &SummaryStats,
    top: &[IndexSizeEntry],
    names: &NameTransformer,
    memory: Option<&MemorySnapshot>,
) -> Vec<MetricSample> {
    let mut samples = Vec::with_capacity(top.len() + 6);

    for entry in top {
        samples.push(MetricSample::bytes(
            Category::LargestIndexes,
            &names.transform(&entry.namespace),
            entry.size,
        ));
    }

    samples.push(MetricSample::bytes(Category::Size, "nb_docs", summary.document_count));
    samples.push(MetricSample::bytes(Category::Size, "data_size", summary.data_size));
    samples.push(MetricSample::bytes(Category::Size, "index_size", summary.total_index_size));

    if let Some(memory) = memory {
        let headroom = memory.ram_headroom(summary.total_index_size);
        samples.push(MetricSample::new(Category::Ram, "ram_headroom", headroom));
        samples.push(MetricSample::bytes(Category::Ram, "ram_used", memory.used));
        samples.push(MetricSample::new(
            Category::Ram,
            "avail_ram_headroom",
            memory.available_headroom(headroom),
        ));
    }

    samples
}
