//! Chatfold library — re-exports internal modules for integration testing.
//!
//! Integration tests in `tests/` cannot access items from a binary crate.
//! This `lib.rs` creates a library target alongside the binary so that
//! `tests/bridge_integration.rs` can import `chatfold::bridge::client::run`, etc.
//!
//! **All application logic lives in the module files (src/engine/, src/bridge/, …).**
//! This file merely makes those modules reachable to external test crates.

#![allow(dead_code)]

pub mod bridge;
pub mod cli;
pub mod config;
pub mod engine;
pub mod interrupt;
pub mod output;
pub mod ui;
