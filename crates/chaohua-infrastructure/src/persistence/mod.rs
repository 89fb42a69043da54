mod json_credential_store;

pub use json_credential_store::JsonCredentialStore;
