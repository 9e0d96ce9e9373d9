mod commands;
mod config;
mod db;
mod handlers;
mod models;
mod ui;
mod voting;

use config::Config;
use db::Database;
use handlers::App;
use log::{error, info};
use std::fs::OpenOptions;
use std::io;

// The terminal belongs to the UI: logs go to the configured file, or nowhere
fn log_target(config: &Config) -> env_logger::Target {
    if let Some(path) = &config.log_file {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => return env_logger::Target::Pipe(Box::new(file)),
            Err(e) => eprintln!("Could not open log file {}: {}", path.display(), e),
        }
    }
    env_logger::Target::Pipe(Box::new(io::sink()))
}

fn init_logging(config: &Config) {
    env_logger::Builder::from_default_env()
        .target(log_target(config))
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    init_logging(&config);

    if config.database_url.is_none() {
        info!(
            "Using MySQL database {} on {}:{}",
            config.database, config.host, config.port
        );
    }

    let database = Database::new(config.connection_url());
    if config.init_schema {
        if let Err(e) = database.ensure_schema().await {
            error!("Failed to initialize database schema: {}", e);
            eprintln!("Failed to initialize database schema: {}", e);
            return;
        }
    }

    info!("Starting voting app");
    if let Err(why) = ui::terminal::run(App::new(database)).await {
        error!("Terminal error: {:?}", why);
        eprintln!("Terminal error: {}", why);
    }
}
