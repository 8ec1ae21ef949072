//! Infrastructure layer for Helium
//!
//! Lexing, per-line literal scanning, declaration shapes, URI conversion and
//! source discovery. Everything here is synchronous and stateless.

pub mod decl;
pub mod file_filter;
pub mod lexer;
pub mod scanner;
pub mod uri;
