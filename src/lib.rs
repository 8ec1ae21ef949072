//! Helium - language tooling for the Helium DSL
//!
//! Turns DSL source text into diagnostics (syntax errors, lint findings),
//! document symbols and completions, and keeps a workspace index of object
//! definitions for navigation.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod infra;
pub mod models;
pub mod services;

pub use error::{HeliumError, HeliumResult};
