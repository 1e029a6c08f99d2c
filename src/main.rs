use anyhow::Result;
use clap::Parser;

use earnings_edge::Cli;
use earnings_edge::app;

#[tokio::main]
async fn main() -> Result<()> {
    let (global_level, my_code_level) = if cfg!(debug_assertions) {
        (log::LevelFilter::Warn, log::LevelFilter::Info)
    } else {
        (log::LevelFilter::Warn, log::LevelFilter::Warn)
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, global_level)
        .filter(Some("earnings_edge"), my_code_level)
        .init();

    let args = Cli::parse();
    app::run(&args).await
}
