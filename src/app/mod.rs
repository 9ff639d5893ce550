//! Application use cases and transactions.

mod address;
mod user;

pub use address::{
    address_add, address_exists, address_get, address_list_by_user, address_remove,
    load_addresses, AddressAddReq, AddressDto,
};
pub use user::{
    delete_user_cascade, find_by_name, find_one_by_name, user_create, user_delete, user_find,
    user_find_one, user_get, user_list, user_rename, UserCreateReq, UserDto, UserRenameReq,
};
