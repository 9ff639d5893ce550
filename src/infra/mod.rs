//! Infrastructure: SQLite connection, migrations, transactional sessions.

pub mod db;
pub mod session;

pub use db::{get_connection, init_db, DbPool};
pub use session::{scalar_one, scalar_one_or_none, with_session, with_transaction};
