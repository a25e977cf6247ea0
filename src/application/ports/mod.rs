pub mod email;
pub mod kv_store;
