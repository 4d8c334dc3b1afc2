//! Integration test modules

mod persistence_tests;
mod workflow_tests;
