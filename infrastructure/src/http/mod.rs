//! HTTP adapters for the backend endpoints.

mod backend;

pub use backend::{CHAT_PATH, HttpBackend, RECORDS_PATH};
