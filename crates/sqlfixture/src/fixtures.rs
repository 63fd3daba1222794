//! Fixture document decoding.
//!
//! - [`FixtureFormat`] - Supported formats (JSON, YAML)
//! - [`FixtureParser`] - Decode fixture bytes, strings and files into tables

pub mod format;
pub mod parser;

pub use format::FixtureFormat;
pub use parser::FixtureParser;
