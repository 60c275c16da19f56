// ABOUTME: Library root for gosu - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod browser;
pub mod ci_env;
pub mod config;
pub mod error;
pub mod git;
pub mod github;
pub mod jenkins;
pub mod output;
pub mod process;
pub mod release;
pub mod tasks;
pub mod types;
