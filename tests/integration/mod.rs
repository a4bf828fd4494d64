//! Integration tests for directory-mailer
//!
//! These tests drive the real HTTP client against a local fake service.

pub mod client_batch_tests;
pub mod pipeline_tests;
