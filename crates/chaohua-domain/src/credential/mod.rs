mod list;
mod repository;
mod value_objects;


pub use list::{CredentialList, MSG_DUPLICATE_COOKIE, MSG_EMPTY_COOKIE, MSG_INVALID_INDEX};
pub use repository::CredentialStore;
pub use value_objects::{mask_cookie, Credential};
