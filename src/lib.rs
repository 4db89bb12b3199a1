//! i18nify - move hardcoded text in JS/TS/JSX sources into translation calls
//!
//! i18nify is a CLI tool and library that finds human-readable text in
//! source files, replaces each occurrence with a call to a translation
//! function keyed by a generated identifier, and writes a resource module
//! mapping those keys to the original text.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Transformation engine and file pipeline
//! - `error`: Error types shared by the library
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;
