//! Metric samples and their rendering for collectd.

pub mod emitter;
pub mod memory;
pub mod sample;

pub use emitter::{Interval, OutputFormat, SampleHeader, render, render_line, write_lines};
pub use memory::MemorySnapshot;
pub use sample::{Category, MetricSample, build_samples};
