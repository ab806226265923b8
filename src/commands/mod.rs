//! Subcommand handlers and console help text.

pub mod auth;
pub mod databases;
pub mod help;
