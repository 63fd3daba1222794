//! Error types for fixture loading and population.
//!
//! Failures fall into three groups: the fixture text could not be decoded
//! ([`DecodeError`]), a row could not be turned into a statement
//! ([`BuildError`]), or the database rejected a statement
//! ([`ExecutorError`]). [`FixtureError`] wraps all of them.

use thiserror::Error;

/// Errors raised while decoding fixture input.
#[derive(Debug, Error)]
pub enum DecodeError {
	/// JSON syntax error or shape mismatch.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	/// YAML syntax error or shape mismatch (when yaml feature is enabled).
	#[cfg(feature = "yaml")]
	#[error("YAML error: {0}")]
	Yaml(#[from] serde_yaml::Error),

	/// Fixture format is not available in this build.
	#[error("Unsupported fixture format: {0}")]
	UnsupportedFormat(String),

	/// Fixture file not found.
	#[error("Fixture file not found: {0}")]
	FileNotFound(String),

	/// Unsupported file extension.
	#[error("Unsupported file extension: {0}")]
	UnsupportedExtension(String),

	/// I/O operation failed.
	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),
}

/// Errors raised while turning a row into a statement.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
	/// The row carries no columns, so no valid insert exists for it.
	#[error("Row {row} of table `{table}` has no columns")]
	EmptyRow {
		/// Table the row belongs to.
		table: String,
		/// Zero-based index of the row within the table.
		row: usize,
	},

	/// A table or column name was rejected by identifier validation.
	#[error("Invalid identifier `{identifier}` in table `{table}`: {reason}")]
	InvalidIdentifier {
		/// Table being built.
		table: String,
		/// The offending identifier.
		identifier: String,
		/// Why it was rejected.
		reason: String,
	},
}

/// Failure reported by an [`Executor`](crate::executor::Executor).
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ExecutorError {
	message: String,
	#[source]
	source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl ExecutorError {
	/// Creates an executor error from a plain message.
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
			source: None,
		}
	}

	/// Wraps an underlying driver error.
	pub fn from_source<E>(source: E) -> Self
	where
		E: std::error::Error + Send + Sync + 'static,
	{
		Self {
			message: source.to_string(),
			source: Some(Box::new(source)),
		}
	}

	/// Returns the error message.
	pub fn message(&self) -> &str {
		&self.message
	}
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for ExecutorError {
	fn from(error: sqlx::Error) -> Self {
		Self::from_source(error)
	}
}

/// Errors that can occur while building or populating a fixture.
#[derive(Debug, Error)]
pub enum FixtureError {
	/// Fixture input could not be decoded.
	#[error(transparent)]
	Decode(#[from] DecodeError),

	/// A row could not be turned into a statement.
	#[error(transparent)]
	Build(#[from] BuildError),

	/// The truncate statement for a table failed.
	#[error("Failed to truncate table `{table}`: {source}")]
	Truncate {
		/// Table being reset.
		table: String,
		/// Statement text that failed.
		statement: String,
		/// Underlying executor failure.
		#[source]
		source: ExecutorError,
	},

	/// The insert statement for a row failed.
	#[error("Failed to insert row {row} into table `{table}`: {source}")]
	Insert {
		/// Table being populated.
		table: String,
		/// Zero-based index of the row within the table.
		row: usize,
		/// Statement text that failed.
		statement: String,
		/// Underlying executor failure.
		#[source]
		source: ExecutorError,
	},
}

impl FixtureError {
	/// Returns the table the failure is attributed to, if any.
	pub fn table(&self) -> Option<&str> {
		match self {
			Self::Decode(_) => None,
			Self::Build(BuildError::EmptyRow { table, .. })
			| Self::Build(BuildError::InvalidIdentifier { table, .. })
			| Self::Truncate { table, .. }
			| Self::Insert { table, .. } => Some(table.as_str()),
		}
	}
}

/// Result type alias for fixture operations.
pub type FixtureResult<T> = Result<T, FixtureError>;
