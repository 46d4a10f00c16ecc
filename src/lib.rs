//! Tpot - gettext string extractor for template files
//!
//! Tpot is a CLI tool and library that rips gettext strings from template
//! files marked with `{t ...}...{/t}` tags and emits them in POT catalog
//! format, ready for the standard gettext tooling.
//!
//! ## Module Structure
//!
//! - `catalog`: In-memory message catalog and POT serialization
//! - `cli`: Command-line interface layer
//! - `config`: Delimiter and extension configuration, optional config file
//! - `extract`: Tag pattern matching and attribute parsing
//! - `merge`: Merging per-file catalogs into the cumulative output
//! - `scanner`: Resolving CLI arguments into a template file list

pub mod catalog;
pub mod cli;
pub mod config;
pub mod extract;
pub mod merge;
pub mod scanner;
