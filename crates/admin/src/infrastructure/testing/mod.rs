//! Test support shared across unit tests

pub mod fixtures;
