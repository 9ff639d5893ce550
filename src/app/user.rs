//! User use cases: create with addresses, lookup by name, rename, delete.

use super::address::{load_addresses, AddressDto};
use crate::domain::{validate_email, validate_name, Address, User};
use crate::error::AppError;
use crate::infra::{scalar_one, scalar_one_or_none, with_session, with_transaction, DbPool};
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreateReq {
    pub name: String,
    #[serde(default)]
    pub emails: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRenameReq {
    /// Exact current name; must match exactly one user.
    pub name: String,
    pub new_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub addresses: Vec<AddressDto>,
}

impl UserDto {
    fn new(user: User, addresses: Vec<Address>) -> Self {
        UserDto {
            id: user.id,
            name: user.name,
            addresses: addresses.into_iter().map(AddressDto::from).collect(),
        }
    }

    pub fn user(&self) -> User {
        User {
            id: self.id,
            name: self.name.clone(),
        }
    }

    pub fn emails(&self) -> Vec<&str> {
        self.addresses.iter().map(|a| a.email.as_str()).collect()
    }
}

fn map_user(r: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: r.get(0)?,
        name: r.get(1)?,
    })
}

/// Exact name match that must hit exactly one user.
pub fn find_one_by_name(conn: &Connection, name: &str) -> Result<User, AppError> {
    scalar_one(
        conn,
        "SELECT id, name FROM user_account WHERE name = ?1",
        [name],
        map_user,
        &format!("user name = '{}'", name),
    )
}

/// Exact name match, zero or more users.
pub fn find_by_name(conn: &Connection, name: &str) -> Result<Vec<User>, AppError> {
    let mut stmt = conn.prepare("SELECT id, name FROM user_account WHERE name = ?1 ORDER BY id")?;
    let rows = stmt.query_map([name], map_user)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Delete the user's addresses, then the user. Call inside a transaction.
pub fn delete_user_cascade(conn: &Connection, user_id: i64) -> Result<usize, AppError> {
    let addresses = conn.execute("DELETE FROM address WHERE user_id = ?1", [user_id])?;
    let users = conn.execute("DELETE FROM user_account WHERE id = ?1", [user_id])?;
    if users == 0 {
        return Err(AppError::NotFound(format!("user {}", user_id)));
    }
    Ok(addresses)
}

/// Insert one user together with all of its addresses.
pub fn user_create(pool: &DbPool, req: UserCreateReq) -> Result<UserDto, AppError> {
    let name = validate_name(&req.name)?;
    let emails = req
        .emails
        .iter()
        .map(|e| validate_email(e))
        .collect::<Result<Vec<_>, _>>()?;

    let created = with_transaction(pool, |tx| {
        tx.execute("INSERT INTO user_account (name) VALUES (?1)", params![&name])?;
        let user = User {
            id: tx.last_insert_rowid(),
            name,
        };
        let mut addresses = Vec::with_capacity(emails.len());
        for email in emails {
            tx.execute(
                "INSERT INTO address (email, user_id) VALUES (?1, ?2)",
                params![&email, user.id],
            )?;
            addresses.push(Address {
                id: tx.last_insert_rowid(),
                email,
                user_id: user.id,
            });
        }
        Ok(UserDto::new(user, addresses))
    })?;

    log::info!(
        "Created user {} with {} address(es)",
        created.id,
        created.addresses.len()
    );
    Ok(created)
}

pub fn user_get(pool: &DbPool, id: i64) -> Result<UserDto, AppError> {
    with_session(pool, |conn| {
        let user = scalar_one_or_none(
            conn,
            "SELECT id, name FROM user_account WHERE id = ?1",
            [id],
            map_user,
            &format!("user id = {}", id),
        )?
        .ok_or_else(|| AppError::NotFound(format!("user {}", id)))?;
        let addresses = load_addresses(conn, user.id)?;
        Ok(UserDto::new(user, addresses))
    })
}

pub fn user_find_one(pool: &DbPool, name: &str) -> Result<UserDto, AppError> {
    with_session(pool, |conn| {
        let user = find_one_by_name(conn, name)?;
        let addresses = load_addresses(conn, user.id)?;
        Ok(UserDto::new(user, addresses))
    })
}

pub fn user_find(pool: &DbPool, name: &str) -> Result<Vec<UserDto>, AppError> {
    with_session(pool, |conn| {
        let mut out = Vec::new();
        for user in find_by_name(conn, name)? {
            let addresses = load_addresses(conn, user.id)?;
            out.push(UserDto::new(user, addresses));
        }
        Ok(out)
    })
}

pub fn user_list(pool: &DbPool) -> Result<Vec<UserDto>, AppError> {
    with_session(pool, |conn| {
        let mut stmt = conn.prepare("SELECT id, name FROM user_account ORDER BY id")?;
        let users = stmt
            .query_map([], map_user)?
            .collect::<Result<Vec<_>, _>>()?;
        let mut out = Vec::with_capacity(users.len());
        for user in users {
            let addresses = load_addresses(conn, user.id)?;
            out.push(UserDto::new(user, addresses));
        }
        Ok(out)
    })
}

/// Look the user up by exact name and change it, in one transaction.
pub fn user_rename(pool: &DbPool, req: UserRenameReq) -> Result<UserDto, AppError> {
    let new_name = validate_name(&req.new_name)?;
    let renamed = with_transaction(pool, |tx| {
        let mut user = find_one_by_name(tx, &req.name)?;
        tx.execute(
            "UPDATE user_account SET name = ?1 WHERE id = ?2",
            params![&new_name, user.id],
        )?;
        user.name = new_name;
        let addresses = load_addresses(tx, user.id)?;
        Ok(UserDto::new(user, addresses))
    })?;
    log::info!("Renamed user {} from '{}' to '{}'", renamed.id, req.name, renamed.name);
    Ok(renamed)
}

/// Look the user up by exact name and delete it with its addresses.
///
/// Returns the user as it was before deletion.
pub fn user_delete(pool: &DbPool, name: &str) -> Result<UserDto, AppError> {
    let deleted = with_transaction(pool, |tx| {
        let user = find_one_by_name(tx, name)?;
        let addresses = load_addresses(tx, user.id)?;
        delete_user_cascade(tx, user.id)?;
        Ok(UserDto::new(user, addresses))
    })?;
    log::info!(
        "Deleted user {} and {} address(es)",
        deleted.id,
        deleted.addresses.len()
    );
    Ok(deleted)
}
