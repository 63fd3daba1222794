//! Statement construction.
//!
//! Turns a table name into its reset statement and a [`Row`] into a
//! parameterized insert. Identifiers are interpolated into the SQL text;
//! cell values never are, they travel as positional parameters.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::BuildError;
use crate::model::{Cell, Row};

/// Unquoted identifier, optionally schema-qualified (`schema.table`).
static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?$")
		.expect("identifier pattern is valid")
});

/// SQL dialect of the target database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Dialect {
	/// MySQL / MariaDB: `?` placeholders, `truncate`.
	#[default]
	MySql,

	/// PostgreSQL: `$1, $2, ...` placeholders, `truncate`.
	Postgres,

	/// SQLite: `?` placeholders, `delete from` (SQLite has no TRUNCATE).
	Sqlite,
}

impl Dialect {
	/// Returns the placeholder for the 1-based parameter `index`.
	pub fn placeholder(&self, index: usize) -> String {
		match self {
			Self::MySql | Self::Sqlite => "?".to_string(),
			Self::Postgres => format!("${}", index),
		}
	}

	/// Returns the statement that removes every row of `table`.
	pub fn truncate(&self, table: &str) -> String {
		match self {
			Self::MySql | Self::Postgres => format!("truncate {}", table),
			Self::Sqlite => format!("delete from {}", table),
		}
	}
}

impl std::fmt::Display for Dialect {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::MySql => write!(f, "mysql"),
			Self::Postgres => write!(f, "postgres"),
			Self::Sqlite => write!(f, "sqlite"),
		}
	}
}

/// SQL text plus its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
	/// Statement text.
	pub sql: String,

	/// Parameters bound to the placeholders, in placeholder order.
	pub params: Vec<Cell>,
}

impl Statement {
	/// Creates a statement without parameters.
	pub fn new(sql: impl Into<String>) -> Self {
		Self {
			sql: sql.into(),
			params: Vec::new(),
		}
	}
}

/// Builds the reset statement for `table`.
pub fn build_truncate(table: &str, dialect: Dialect) -> Statement {
	Statement::new(dialect.truncate(table))
}

/// Builds `insert into <table> (<columns>) values (<placeholders>)` for one row.
///
/// Columns, placeholders and parameters come out of a single pass over the
/// row, so `params[i]` is always the value of the i-th listed column.
///
/// # Errors
///
/// Returns [`BuildError::EmptyRow`] if the row has no columns.
///
/// # Example
///
/// ```
/// # use sqlfixture::model::Row;
/// # use sqlfixture::statement::{Dialect, build_insert};
/// let row = Row::new().with("id", 1).with("slug", "something");
/// let statement = build_insert("test2", 0, &row, Dialect::Postgres).unwrap();
/// assert_eq!(statement.sql, "insert into test2 (id,slug) values ($1,$2)");
/// assert_eq!(statement.params.len(), 2);
/// ```
pub fn build_insert(
	table: &str,
	row_index: usize,
	row: &Row,
	dialect: Dialect,
) -> Result<Statement, BuildError> {
	if row.is_empty() {
		return Err(BuildError::EmptyRow {
			table: table.to_string(),
			row: row_index,
		});
	}

	let mut columns = Vec::with_capacity(row.len());
	let mut placeholders = Vec::with_capacity(row.len());
	let mut params = Vec::with_capacity(row.len());
	for (position, (column, cell)) in row.iter().enumerate() {
		columns.push(column);
		placeholders.push(dialect.placeholder(position + 1));
		params.push(cell.clone());
	}

	let sql = format!(
		"insert into {} ({}) values ({})",
		table,
		columns.join(","),
		placeholders.join(",")
	);
	Ok(Statement { sql, params })
}

/// Checks that a table and every column of `rows` are plain identifiers.
///
/// # Errors
///
/// Returns [`BuildError::InvalidIdentifier`] for the first name that is
/// empty or contains characters outside `[A-Za-z0-9_]` (plus one `.` for a
/// schema-qualified table).
pub fn validate_identifiers<'a>(
	table: &str,
	rows: impl IntoIterator<Item = &'a Row>,
) -> Result<(), BuildError> {
	validate_identifier(table, table)?;
	for row in rows {
		for column in row.columns() {
			validate_identifier(table, column)?;
		}
	}
	Ok(())
}

fn validate_identifier(table: &str, identifier: &str) -> Result<(), BuildError> {
	if identifier.is_empty() {
		return Err(BuildError::InvalidIdentifier {
			table: table.to_string(),
			identifier: identifier.to_string(),
			reason: "identifier cannot be empty".to_string(),
		});
	}

	if !IDENTIFIER.is_match(identifier) {
		return Err(BuildError::InvalidIdentifier {
			table: table.to_string(),
			identifier: identifier.to_string(),
			reason: "only alphanumeric characters and underscores are allowed, and it cannot start with a number".to_string(),
		});
	}

	Ok(())
}
