//! Core transformation engine.
//!
//! ## Module Structure
//!
//! - `locale`: decides whether text is written in the source language
//! - `key`: translation key generation
//! - `parsers`: swc parser wrapper with byte-offset helpers
//! - `transform`: per-node rewriters (literals, templates, JSX text)
//! - `printer`: splices rewrites back into the original source
//! - `formatter`: output normalisation and validation
//! - `engine`: per-file traversal, skip rules and import management
//! - `registry`: shared key → text store and resource module emitter
//! - `file_scanner`: entry resolution and directory walking
//! - `pipeline`: runs the engine over every file, then emits the registry

pub mod engine;
pub mod file_scanner;
pub mod formatter;
pub mod key;
pub mod locale;
pub mod parsers;
pub mod pipeline;
pub mod printer;
pub mod registry;
pub mod transform;

pub use engine::{Engine, EngineOptions, FileOutcome};
pub use key::generate_key;
pub use locale::{Locale, should_translate};
pub use pipeline::{RunSummary, run};
pub use registry::{OutputFormat, TranslationRegistry, emit};
