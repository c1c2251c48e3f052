//! Record listing domain.

pub mod human;
