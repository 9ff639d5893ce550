pub mod app;
pub mod config;
pub mod demo;
pub mod domain;
pub mod error;
pub mod infra;
pub mod logging;

use config::AppConfig;
use error::AppError;
use infra::init_db;

/// Open the configured database and run the walkthrough against stdout.
pub fn run(config: &AppConfig) -> Result<(), AppError> {
    log::info!("DB path: {:?}", config.db_path);
    let pool = init_db(&config.db_path, &config.db).map_err(|e| {
        log::error!("DB init failed: {}", e);
        e
    })?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    demo::run_demo(&pool, &mut out)
}
