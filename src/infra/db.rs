//! SQLite connection and migrations.

use crate::config::DbConfig;
use crate::error::AppError;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

pub struct DbPool(pub Mutex<Connection>);

const MIGRATIONS: &[(i32, &str)] = &[(1, include_str!("../../migrations/0001_init.sql"))];

/// Initialize DB at path, run migrations, return the guarded connection.
pub fn init_db(db_path: &Path, config: &DbConfig) -> Result<DbPool, AppError> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| AppError::Db(e.to_string()))?;
    }
    let conn = Connection::open(db_path).map_err(|e| AppError::Db(e.to_string()))?;
    log::info!("Opened database at {:?}", db_path);
    setup_connection(conn, config)
}

/// In-memory database with the full schema, statement echo off.
pub fn init_test_db() -> DbPool {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    setup_connection(conn, &DbConfig { echo: false }).expect("init test db")
}

fn setup_connection(mut conn: Connection, config: &DbConfig) -> Result<DbPool, AppError> {
    if config.echo {
        conn.trace(Some(echo_statement));
    }
    conn.pragma_update(None, "foreign_keys", true)
        .map_err(|e| AppError::Db(e.to_string()))?;
    run_migrations(&mut conn)?;
    Ok(DbPool(Mutex::new(conn)))
}

fn echo_statement(sql: &str) {
    log::info!(target: "sql", "{}", sql);
}

fn run_migrations(conn: &mut Connection) -> Result<(), AppError> {
    let tx = conn.transaction()?;

    // Ensure schema_migrations exists (first run)
    tx.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (version INTEGER PRIMARY KEY, applied_at TEXT NOT NULL DEFAULT (datetime('now')))",
        [],
    )?;

    let applied: Vec<i32> = tx
        .prepare("SELECT version FROM schema_migrations ORDER BY version")?
        .query_map([], |r| r.get(0))?
        .collect::<Result<Vec<_>, _>>()?;

    for (version, sql) in MIGRATIONS {
        if applied.contains(version) {
            continue;
        }
        // The ledger row is written below, not by the script
        let statements = sql
            .split(';')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty() && !s.contains("INSERT INTO schema_migrations"));
        for stmt in statements {
            tx.execute(stmt, [])?;
        }
        tx.execute(
            "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, datetime('now'))",
            [version],
        )?;
        log::info!("Applied schema migration {}", version);
    }

    tx.commit()?;
    Ok(())
}

/// Lock the connection for one unit of work.
pub fn get_connection(pool: &DbPool) -> Result<MutexGuard<'_, Connection>, AppError> {
    pool.0
        .lock()
        .map_err(|_| AppError::Db("database connection lock poisoned".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap()
            .query_map([], |r| r.get(0))
            .unwrap()
            .collect::<Result<Vec<String>, _>>()
            .unwrap()
    }

    #[test]
    fn migrations_create_both_tables() {
        let pool = init_test_db();
        let conn = get_connection(&pool).unwrap();
        let names = table_names(&conn);
        assert!(names.contains(&"user_account".to_string()));
        assert!(names.contains(&"address".to_string()));
    }

    #[test]
    fn rerunning_migrations_is_a_noop() {
        let pool = init_test_db();
        let mut conn = get_connection(&pool).unwrap();
        let before = table_names(&conn);
        run_migrations(&mut conn).unwrap();
        run_migrations(&mut conn).unwrap();
        assert_eq!(table_names(&conn), before);
        let versions: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_migrations", [], |r| r.get(0))
            .unwrap();
        assert_eq!(versions, MIGRATIONS.len() as i64);
    }

    #[test]
    fn foreign_keys_are_enforced() {
        let pool = init_test_db();
        let conn = get_connection(&pool).unwrap();
        let on: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |r| r.get(0))
            .unwrap();
        assert_eq!(on, 1);
    }
}
