use std::io;

use clap::Parser;
use orderboard::{
    board::btree_board::BTreeBoard,
    cli::{Driver, SummaryFormat},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Live order board reading JSON commands from stdin
#[derive(Debug, Parser)]
#[command(version, about)]
struct Opts {
    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
    /// How the summary command renders its levels
    #[arg(long, value_enum, default_value_t = SummaryFormat::Json)]
    summary_format: SummaryFormat,
}

fn main() -> eyre::Result<()> {
    let opts = Opts::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&opts.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    info!("orderboard v{} ready", env!("CARGO_PKG_VERSION"));

    let mut driver = Driver::new(BTreeBoard::new(), opts.summary_format);
    driver.run(io::stdin().lock(), &mut io::stdout().lock())
}
