#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::process;

use anyhow::Context;
use clap::Parser;
use mongo_index_stats::Collector;
use mongo_index_stats::cli::Cli;
use mongo_index_stats::config::env_lookup;
use mongo_index_stats::metrics::write_lines;

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    if let Err(err) = run(cli) {
        log::error!("{err:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = cli.into_settings(env_lookup).context("Invalid arguments")?;
    let collector = Collector::new().context("Failed to start runtime")?;
    let report = collector.run(&settings).context("Sampling failed")?;

    let stdout = std::io::stdout();
    write_lines(&mut stdout.lock(), &report.lines).context("Failed to write samples")?;
    Ok(())
}
