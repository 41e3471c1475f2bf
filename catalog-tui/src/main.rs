use std::fs::{self, File};

use catalog_tui::{Config, paths, runtime};
use log::{info, warn};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[tokio::main]
async fn main() {
    paths::rotate_logs();

    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    let log_path = paths::log_file().unwrap_or_else(|| "catalog-tui.log".into());
    if let Some(dir) = log_path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    let log_file = File::create(&log_path).expect("Failed to create log file");
    let level = config.level_filter().unwrap_or(LevelFilter::Debug);
    let log_config = ConfigBuilder::new()
        .add_filter_ignore_str("hyper")
        .add_filter_ignore_str("reqwest")
        .add_filter_ignore_str("rustls")
        .build();
    WriteLogger::init(level, log_config, log_file).expect("Failed to initialize logger");

    if let Some(e) = config_error {
        warn!("{}, using defaults", e);
    }
    info!("Starting catalog-tui, logging to {}", log_path.display());

    if let Err(e) = runtime::run(&config).await {
        eprintln!("Error: {}", e);
    }
}
