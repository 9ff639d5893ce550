//! Address use cases: add, get, list by owner, remove.

use crate::domain::{validate_email, Address};
use crate::error::AppError;
use crate::infra::{scalar_one_or_none, with_session, with_transaction, DbPool};
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressDto {
    pub id: i64,
    pub email: String,
    pub user_id: i64,
}

impl From<Address> for AddressDto {
    fn from(a: Address) -> Self {
        AddressDto {
            id: a.id,
            email: a.email,
            user_id: a.user_id,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressAddReq {
    pub user_id: i64,
    pub email: String,
}

pub(crate) fn map_address(r: &Row<'_>) -> rusqlite::Result<Address> {
    Ok(Address {
        id: r.get(0)?,
        email: r.get(1)?,
        user_id: r.get(2)?,
    })
}

pub(crate) fn find_address(conn: &Connection, id: i64) -> Result<Option<Address>, AppError> {
    scalar_one_or_none(
        conn,
        "SELECT id, email, user_id FROM address WHERE id = ?1",
        [id],
        map_address,
        &format!("address id = {}", id),
    )
}

/// A User's address collection, materialized by querying on the owner id.
pub fn load_addresses(conn: &Connection, user_id: i64) -> Result<Vec<Address>, AppError> {
    let mut stmt =
        conn.prepare("SELECT id, email, user_id FROM address WHERE user_id = ?1 ORDER BY id")?;
    let rows = stmt.query_map([user_id], map_address)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn user_exists(conn: &Connection, user_id: i64) -> Result<bool, AppError> {
    let found = scalar_one_or_none(
        conn,
        "SELECT 1 FROM user_account WHERE id = ?1",
        [user_id],
        |_| Ok(()),
        &format!("user id = {}", user_id),
    )?;
    Ok(found.is_some())
}

/// Attach a new address to an existing user.
pub fn address_add(pool: &DbPool, req: AddressAddReq) -> Result<AddressDto, AppError> {
    let email = validate_email(&req.email)?;
    let address = with_transaction(pool, |tx| {
        if !user_exists(tx, req.user_id)? {
            return Err(AppError::NotFound(format!("user {}", req.user_id)));
        }
        tx.execute(
            "INSERT INTO address (email, user_id) VALUES (?1, ?2)",
            params![&email, req.user_id],
        )?;
        Ok(Address {
            id: tx.last_insert_rowid(),
            email,
            user_id: req.user_id,
        })
    })?;
    log::info!("Added {}", address);
    Ok(address.into())
}

pub fn address_get(pool: &DbPool, id: i64) -> Result<AddressDto, AppError> {
    with_session(pool, |conn| find_address(conn, id))?
        .map(AddressDto::from)
        .ok_or_else(|| AppError::NotFound(format!("address {}", id)))
}

pub fn address_exists(pool: &DbPool, id: i64) -> Result<bool, AppError> {
    Ok(with_session(pool, |conn| find_address(conn, id))?.is_some())
}

pub fn address_list_by_user(pool: &DbPool, user_id: i64) -> Result<Vec<AddressDto>, AppError> {
    with_session(pool, |conn| {
        if !user_exists(conn, user_id)? {
            return Err(AppError::NotFound(format!("user {}", user_id)));
        }
        Ok(load_addresses(conn, user_id)?
            .into_iter()
            .map(AddressDto::from)
            .collect())
    })
}

/// Taking an address out of its owner's collection deletes the row.
pub fn address_remove(pool: &DbPool, id: i64) -> Result<AddressDto, AppError> {
    let removed = with_transaction(pool, |tx| {
        let address =
            find_address(tx, id)?.ok_or_else(|| AppError::NotFound(format!("address {}", id)))?;
        tx.execute("DELETE FROM address WHERE id = ?1", [id])?;
        Ok(address)
    })?;
    log::info!("Removed {}", removed);
    Ok(removed.into())
}
