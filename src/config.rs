//! Runtime configuration. Nothing is read from flags or the environment.

use std::path::PathBuf;

pub const DEFAULT_DB_FILE: &str = "demo.db";

#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Log every executed statement under the `sql` target.
    pub echo: bool,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self { echo: true }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub db: DbConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE),
            db: DbConfig::default(),
        }
    }
}
