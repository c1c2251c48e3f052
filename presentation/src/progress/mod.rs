//! Terminal rendering of streamed chat replies

pub mod reporter;
