use clap::Parser;
use depthnorm::batch::{self, BatchReport};
use depthnorm::cli::Args;
use depthnorm::config::Config;
use depthnorm::error::ConfigError;
use depthnorm::histogram::PlottersRenderer;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let args = Args::parse();

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match run(&args) {
        Ok(report) => report.print_summary(),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Load the configuration and run the batch with PNG histogram charts
fn run(args: &Args) -> Result<BatchReport, ConfigError> {
    let config = Config::load(&args.config)?;
    info!(
        "Normalizing {} into {} ({} output, percentiles {}..{})",
        config.input_folder.display(),
        config.output_folder.display(),
        config.output_format,
        config.normalization.low_percentile,
        config.normalization.high_percentile
    );
    batch::run(&config, &PlottersRenderer::default())
}
