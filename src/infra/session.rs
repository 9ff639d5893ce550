//! Scoped units of work over the guarded connection.
//!
//! Every helper locks the connection for the duration of the closure and
//! releases it when the guard drops, on success and on failure alike.

use super::db::{get_connection, DbPool};
use crate::error::AppError;
use rusqlite::{Connection, Params, Row, Transaction};

/// Run `f` inside a transaction: commit on `Ok`, roll back on `Err`.
pub fn with_transaction<T, F>(pool: &DbPool, f: F) -> Result<T, AppError>
where
    F: FnOnce(&Transaction<'_>) -> Result<T, AppError>,
{
    let mut conn = get_connection(pool)?;
    let tx = conn.transaction()?;
    match f(&tx) {
        Ok(value) => {
            tx.commit()?;
            Ok(value)
        }
        Err(e) => {
            log::warn!("Rolling back transaction: {}", e);
            if let Err(rb) = tx.rollback() {
                log::error!("Rollback failed: {}", rb);
            }
            Err(e)
        }
    }
}

/// Run `f` against the connection without opening a transaction.
pub fn with_session<T, F>(pool: &DbPool, f: F) -> Result<T, AppError>
where
    F: FnOnce(&Connection) -> Result<T, AppError>,
{
    let conn = get_connection(pool)?;
    f(&conn)
}

/// Query that must match exactly one row.
///
/// `what` describes the lookup and ends up in the error message.
pub fn scalar_one<T, P, F>(
    conn: &Connection,
    sql: &str,
    params: P,
    map: F,
    what: &str,
) -> Result<T, AppError>
where
    P: Params,
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    scalar_one_or_none(conn, sql, params, map, what)?
        .ok_or_else(|| AppError::NoResultFound(what.to_string()))
}

/// Query that may match at most one row.
pub fn scalar_one_or_none<T, P, F>(
    conn: &Connection,
    sql: &str,
    params: P,
    map: F,
    what: &str,
) -> Result<Option<T>, AppError>
where
    P: Params,
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query_map(params, map)?;
    let first = match rows.next() {
        None => return Ok(None),
        Some(row) => row?,
    };
    if rows.next().is_some() {
        return Err(AppError::MultipleResultsFound(what.to_string()));
    }
    Ok(Some(first))
}
