use clap::Parser;
use formula_cli::core::config;
use formula_cli::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "formula-cli", version, about = "Formula 1 standings, drivers and news in the terminal")]
struct Args {}

fn main() -> std::io::Result<()> {
    let _args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to formula-cli.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("formula-cli.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        Default::default()
    });
    let resolved = config::resolve(&file_config);

    log::info!(
        "formula-cli starting against {} (timeout {:?})",
        resolved.base_url,
        resolved.fetch_timeout
    );

    tui::run(resolved)
}
