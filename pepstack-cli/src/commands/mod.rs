//! Command implementations for the pepstack CLI

pub mod check;
pub mod layout;
