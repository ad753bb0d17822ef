// Rendering of samples for the monitoring agent

use std::io::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::metrics::sample::{Category, MetricSample};

pub const DEFAULT_INTERVAL_SECS: f64 = 10.0;

/// Sampling interval in seconds, as announced to the agent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval(f64);

impl Interval {
    pub fn new(seconds: f64) -> Result<Self> {
        if seconds.is_finite() && seconds > 0.0 {
            Ok(Self(seconds))
        } else {
            Err(Error::Config(format!(
                "interval must be a positive number of seconds, got {seconds}"
            )))
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let seconds = text
            .trim()
            .parse::<f64>()
            .map_err(|_| Error::Config(format!("interval {text:?} is not a number")))?;
        Self::new(seconds)
    }

    pub fn seconds(&self) -> f64 {
        self.0
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self(DEFAULT_INTERVAL_SECS)
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.fract() == 0.0 { write!(f, "{:.0}", self.0) } else { write!(f, "{}", self.0) }
    }
}

/// Line format written to stdout
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// collectd exec plugin `PUTVAL` lines
    #[default]
    Putval,
    /// One JSON object per sample
    Json,
}

/// Fields shared by every line of a run.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleHeader {
    pub host_id: String,
    pub interval: Interval,
    /// Unix seconds, taken once per run
    pub timestamp: i64,
}

#[derive(Serialize)]
struct JsonSample<'a> {
    host: &'a str,
    category: Category,
    name: &'a str,
    interval: f64,
    timestamp: i64,
    value: i64,
}

pub fn render_line(
    sample: &MetricSample,
    header: &SampleHeader,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Putval => Ok(format!(
            "PUTVAL {}/{}/gauge-{} interval={} {}:{}",
            header.host_id,
            sample.category,
            sample.name,
            header.interval,
            header.timestamp,
            sample.value
        )),
        OutputFormat::Json => Ok(serde_json::to_string(&JsonSample {
            host: &header.host_id,
            category: sample.category,
            name: &sample.name,
            interval: header.interval.seconds(),
            timestamp: header.timestamp,
            value: sample.value,
        })?),
    }
}

/// Render every sample. Fails as a whole so a run never emits half its lines.
pub fn render(
    samples: &[MetricSample],
    header: &SampleHeader,
    format: OutputFormat,
) -> Result<Vec<String>> {
    samples.iter().map(|sample| render_line(sample, header, format)).collect()
}

/// Write all lines with a single flush at the end.
pub fn write_lines(out: &mut impl Write, lines: &[String]) -> Result<()> {
    let mut buffer = String::with_capacity(lines.iter().map(|line| line.len() + 1).sum());
    for line in lines {
        buffer.push_str(line);
        buffer.push('\n');
    }
    out.write_all(buffer.as_bytes())?;
    out.flush()?;
    Ok(())
}
