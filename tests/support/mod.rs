//! Shared helpers for integration tests.
#![allow(dead_code)]

pub mod gens;
pub mod table_pair;

pub use maumau_link::telemetry::init_test_logging;
