//! Fixture parsing functionality.
//!
//! This module decodes JSON and YAML fixture documents into [`Tables`].

use std::path::Path;

use super::FixtureFormat;
use crate::error::DecodeError;
use crate::model::Tables;

/// Parser for fixture documents.
///
/// Supports both JSON and YAML formats (YAML requires the `yaml` feature).
/// Parsing is pure: the same bytes always produce the same tables or the
/// same error.
#[derive(Debug, Default)]
pub struct FixtureParser;

impl FixtureParser {
	/// Creates a new fixture parser.
	pub fn new() -> Self {
		Self
	}

	/// Parses fixture data from raw bytes.
	///
	/// # Errors
	///
	/// Returns an error if the bytes are not valid for `format` or do not
	/// describe a sequence of `{name, rows}` tables.
	pub fn parse_bytes(&self, bytes: &[u8], format: FixtureFormat) -> Result<Tables, DecodeError> {
		match format {
			FixtureFormat::Json => self.parse_json(bytes),
			FixtureFormat::Yaml => self.parse_yaml(bytes),
		}
	}

	/// Parses fixture data from a string.
	pub fn parse_str(&self, content: &str, format: FixtureFormat) -> Result<Tables, DecodeError> {
		self.parse_bytes(content.as_bytes(), format)
	}

	/// Parses a fixture file from the given path.
	///
	/// The format is automatically detected from the file extension.
	///
	/// # Errors
	///
	/// Returns an error if:
	/// - The file extension is not recognized
	/// - The file cannot be read
	/// - The file content is invalid
	pub fn parse_file(&self, path: &Path) -> Result<Tables, DecodeError> {
		let format = FixtureFormat::from_path(path).ok_or_else(|| {
			DecodeError::UnsupportedExtension(
				path.extension()
					.and_then(|e| e.to_str())
					.unwrap_or("(none)")
					.to_string(),
			)
		})?;

		let content = std::fs::read(path).map_err(|e| {
			if e.kind() == std::io::ErrorKind::NotFound {
				DecodeError::FileNotFound(path.display().to_string())
			} else {
				DecodeError::IoError(e)
			}
		})?;

		let tables = self.parse_bytes(&content, format)?;
		tracing::debug!(
			path = %path.display(),
			%format,
			tables = tables.len(),
			"parsed fixture file"
		);
		Ok(tables)
	}

	/// Parses multiple fixture files.
	///
	/// Tables are concatenated in file order. Formats may differ per file.
	pub fn parse_files(&self, paths: &[&Path]) -> Result<Tables, DecodeError> {
		let mut all_tables = Tables::new();
		for path in paths {
			all_tables.extend(self.parse_file(path)?);
		}
		Ok(all_tables)
	}

	fn parse_json(&self, bytes: &[u8]) -> Result<Tables, DecodeError> {
		Ok(serde_json::from_slice(bytes)?)
	}

	#[cfg(feature = "yaml")]
	fn parse_yaml(&self, bytes: &[u8]) -> Result<Tables, DecodeError> {
		Ok(serde_yaml::from_slice(bytes)?)
	}

	/// Stub for YAML parsing when the feature is not enabled.
	#[cfg(not(feature = "yaml"))]
	fn parse_yaml(&self, _bytes: &[u8]) -> Result<Tables, DecodeError> {
		Err(DecodeError::UnsupportedFormat(
			"YAML support requires the 'yaml' feature".to_string(),
		))
	}
}
