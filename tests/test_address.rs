//! Address integration tests

use app_lib::app::{
    address_add, address_exists, address_get, address_list_by_user, address_remove, user_create,
    user_find_one, AddressAddReq, UserCreateReq,
};
use app_lib::infra::db::init_test_db;
use app_lib::infra::with_transaction;

// ──────────────────────── Helper ────────────────────────

fn seed_user(pool: &app_lib::infra::DbPool, name: &str) -> i64 {
    user_create(
        pool,
        UserCreateReq {
            name: name.to_string(),
            emails: vec![format!("{}@example.com", name)],
        },
    )
    .unwrap()
    .id
}

// ══════════════════════════════════════════════════════════
//  address_add
// ══════════════════════════════════════════════════════════

#[test]
fn add_address_appends_to_collection() {
    let pool = init_test_db();
    let user_id = seed_user(&pool, "alice");
    let added = address_add(
        &pool,
        AddressAddReq {
            user_id,
            email: " second@example.com ".to_string(),
        },
    )
    .unwrap();
    assert_eq!(added.email, "second@example.com");
    assert_eq!(added.user_id, user_id);

    let list = address_list_by_user(&pool, user_id).unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[1], added);
}

#[test]
fn add_address_to_missing_user_fails() {
    let pool = init_test_db();
    let err = address_add(
        &pool,
        AddressAddReq {
            user_id: 999,
            email: "orphan@example.com".to_string(),
        },
    )
    .unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
}

#[test]
fn add_address_email_too_long_fails() {
    let pool = init_test_db();
    let user_id = seed_user(&pool, "alice");
    let err = address_add(
        &pool,
        AddressAddReq {
            user_id,
            email: "e".repeat(201),
        },
    )
    .unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
}

#[test]
fn orphan_insert_is_rejected_by_foreign_key() {
    let pool = init_test_db();
    let err = with_transaction(&pool, |tx| {
        tx.execute(
            "INSERT INTO address (email, user_id) VALUES ('x@example.com', 12345)",
            [],
        )?;
        Ok(())
    })
    .unwrap_err();
    assert_eq!(err.code(), "CONFLICT");
}

// ══════════════════════════════════════════════════════════
//  address_get / address_exists / address_list_by_user
// ══════════════════════════════════════════════════════════

#[test]
fn get_address_by_id() {
    let pool = init_test_db();
    let user_id = seed_user(&pool, "alice");
    let first = &address_list_by_user(&pool, user_id).unwrap()[0];
    let fetched = address_get(&pool, first.id).unwrap();
    assert_eq!(&fetched, first);
    assert!(address_exists(&pool, first.id).unwrap());
}

#[test]
fn get_address_not_found() {
    let pool = init_test_db();
    assert_eq!(address_get(&pool, 7).unwrap_err().code(), "NOT_FOUND");
    assert!(!address_exists(&pool, 7).unwrap());
}

#[test]
fn list_by_missing_user_fails() {
    let pool = init_test_db();
    assert_eq!(
        address_list_by_user(&pool, 3).unwrap_err().code(),
        "NOT_FOUND"
    );
}

#[test]
fn list_only_returns_owned_addresses() {
    let pool = init_test_db();
    let alice = seed_user(&pool, "alice");
    let bob = seed_user(&pool, "bob");
    let list = address_list_by_user(&pool, alice).unwrap();
    assert_eq!(list.len(), 1);
    assert!(list.iter().all(|a| a.user_id == alice && a.user_id != bob));
}

// ══════════════════════════════════════════════════════════
//  address_remove
// ══════════════════════════════════════════════════════════

#[test]
fn removing_address_deletes_the_row() {
    let pool = init_test_db();
    let user_id = seed_user(&pool, "alice");
    let id = address_list_by_user(&pool, user_id).unwrap()[0].id;

    let removed = address_remove(&pool, id).unwrap();
    assert_eq!(removed.id, id);
    assert!(!address_exists(&pool, id).unwrap());

    // owner survives with an empty collection
    let alice = user_find_one(&pool, "alice").unwrap();
    assert!(alice.addresses.is_empty());
}

#[test]
fn remove_missing_address_fails() {
    let pool = init_test_db();
    assert_eq!(address_remove(&pool, 1).unwrap_err().code(), "NOT_FOUND");
}
