//! Domain records and validation rules.

pub mod entities;

pub use entities::{validate_email, validate_name, Address, User, EMAIL_MAX_LEN, NAME_MAX_LEN};
