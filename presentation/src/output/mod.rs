//! Record listing output

pub mod console;
pub mod formatter;
