//! D1 Console - an interactive SQL console for Cloudflare D1.
//!
//! This library exposes the core modules for use in integration tests.

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod repl;
pub mod session;
