//! Command implementations

pub mod check;
pub mod setup;
