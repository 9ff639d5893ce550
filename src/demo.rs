//! The insert / query / update / delete walkthrough run by the binary.

use crate::app::{user_create, user_delete, user_find_one, user_rename, UserCreateReq, UserRenameReq};
use crate::error::AppError;
use crate::infra::DbPool;
use std::io::Write;

pub const DEMO_NAME: &str = "alice";
pub const DEMO_NEW_NAME: &str = "Alice";
pub const DEMO_EMAILS: [&str; 2] = ["alice@example.com", "a@work.com"];

/// Run the four blocks in order, writing the two diagnostic lines to `out`.
pub fn run_demo<W: Write>(pool: &DbPool, out: &mut W) -> Result<(), AppError> {
    user_create(
        pool,
        UserCreateReq {
            name: DEMO_NAME.to_string(),
            emails: DEMO_EMAILS.iter().map(|e| e.to_string()).collect(),
        },
    )?;

    let alice = user_find_one(pool, DEMO_NAME)?;
    writeln!(out, "Loaded: {}", alice.user()).map_err(io_err)?;
    writeln!(out, "Emails: {:?}", alice.emails()).map_err(io_err)?;

    user_rename(
        pool,
        UserRenameReq {
            name: DEMO_NAME.to_string(),
            new_name: DEMO_NEW_NAME.to_string(),
        },
    )?;

    user_delete(pool, DEMO_NEW_NAME)?;
    Ok(())
}

fn io_err(e: std::io::Error) -> AppError {
    AppError::Db(format!("write output: {}", e))
}
