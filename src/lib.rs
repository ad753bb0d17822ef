//! Point-in-time MongoDB size statistics for collectd.
//!
//! A run lists every database and collection of a server, sums their
//! `collStats` sizes, picks the largest indexes and renders everything as
//! `PUTVAL` lines for the collectd `exec` plugin.

pub mod cli;
pub mod collector;
pub mod config;
pub mod connection;
pub mod error;
pub mod helpers;
pub mod metrics;
pub mod models;
pub mod stats;

pub use collector::{Collector, Report};
pub use error::{Error, Result};
