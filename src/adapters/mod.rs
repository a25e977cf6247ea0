pub mod email;
pub mod http;
