//! Integration tests for the D1 console.

pub mod batch_test;
pub mod common;
pub mod config_test;
pub mod confirmation_test;
pub mod output_test;
pub mod session_test;
