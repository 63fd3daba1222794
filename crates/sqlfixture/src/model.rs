//! In-memory representation of fixture data.
//!
//! A fixture is a list of [`Table`]s, each holding the [`Row`]s to insert.
//! Cells are plain [`serde_json::Value`]s and are handed to the executor
//! without any conversion.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single column value within a row.
pub type Cell = Value;

/// An ordered sequence of rows. Order determines insert order.
pub type Rows = Vec<Row>;

/// An ordered sequence of tables. Order determines truncate/insert order.
pub type Tables = Vec<Table>;

/// Column name to cell mapping for one row.
///
/// Iteration follows the order columns were added (or authored, when
/// decoded), and is stable across passes. Equality ignores column order.
///
/// # Example
///
/// ```
/// # use sqlfixture::model::Row;
/// let row = Row::new().with("id", 1).with("name", "something");
/// assert_eq!(row.columns().collect::<Vec<_>>(), vec!["id", "name"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Map<String, Cell>);

impl Row {
	/// Creates an empty row.
	pub fn new() -> Self {
		Self(Map::new())
	}

	/// Adds a column, consuming and returning the row.
	pub fn with(mut self, column: impl Into<String>, value: impl Into<Cell>) -> Self {
		self.insert(column, value);
		self
	}

	/// Sets a column value, returning the previous value if the column existed.
	pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Cell>) -> Option<Cell> {
		self.0.insert(column.into(), value.into())
	}

	/// Returns the value of a column.
	pub fn get(&self, column: &str) -> Option<&Cell> {
		self.0.get(column)
	}

	/// Returns the number of columns.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if the row has no columns.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates over column names.
	pub fn columns(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	/// Iterates over `(column, cell)` pairs.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Cell)> {
		self.0.iter().map(|(column, cell)| (column.as_str(), cell))
	}
}

impl From<Map<String, Cell>> for Row {
	fn from(map: Map<String, Cell>) -> Self {
		Self(map)
	}
}

impl<K, V> FromIterator<(K, V)> for Row
where
	K: Into<String>,
	V: Into<Cell>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(column, value)| (column.into(), value.into()))
				.collect(),
		)
	}
}

impl<'a> IntoIterator for &'a Row {
	type Item = (&'a String, &'a Cell);
	type IntoIter = serde_json::map::Iter<'a>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

/// A target table and the rows to insert into it.
///
/// The name is interpolated verbatim into statement text. It must come from
/// a trusted fixture author; see
/// [`PopulateOptions::with_identifier_validation`](crate::engine::PopulateOptions::with_identifier_validation)
/// for an opt-in check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
	/// Table identifier in the target schema.
	pub name: String,

	/// Rows to insert, in order. A missing or null `rows` key decodes as
	/// no rows; the table is still truncated.
	#[serde(default, deserialize_with = "rows_or_null")]
	pub rows: Rows,
}

fn rows_or_null<'de, D>(deserializer: D) -> Result<Rows, D::Error>
where
	D: serde::Deserializer<'de>,
{
	Ok(Option::<Rows>::deserialize(deserializer)?.unwrap_or_default())
}

impl Table {
	/// Creates a table with no rows.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			rows: Vec::new(),
		}
	}

	/// Appends a row.
	pub fn with_row(mut self, row: Row) -> Self {
		self.rows.push(row);
		self
	}

	/// Appends several rows.
	pub fn with_rows(mut self, rows: impl IntoIterator<Item = Row>) -> Self {
		self.rows.extend(rows);
		self
	}

	/// Returns the number of rows.
	pub fn len(&self) -> usize {
		self.rows.len()
	}

	/// Returns true if the table has no rows.
	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_row_preserves_column_order() {
		let row = Row::new().with("zeta", 1).with("alpha", 2).with("mid", 3);
		let columns: Vec<_> = row.columns().collect();
		assert_eq!(columns, vec!["zeta", "alpha", "mid"]);
	}

	#[rstest]
	fn test_row_equality_ignores_order() {
		let left = Row::new().with("id", 1).with("name", "a");
		let right = Row::new().with("name", "a").with("id", 1);
		assert_eq!(left, right);
	}

	#[rstest]
	fn test_row_insert_overwrites() {
		let mut row = Row::new().with("id", 1);
		let previous = row.insert("id", 2);
		assert_eq!(previous, Some(json!(1)));
		assert_eq!(row.get("id"), Some(&json!(2)));
		assert_eq!(row.len(), 1);
	}

	#[rstest]
	fn test_row_from_iterator() {
		let row: Row = [("id", json!(1)), ("slug", json!("x"))].into_iter().collect();
		assert_eq!(row.len(), 2);
		assert_eq!(row.get("slug"), Some(&json!("x")));
	}

	#[rstest]
	fn test_table_deserialize_without_rows() {
		let table: Table = serde_json::from_value(json!({"name": "empty"})).unwrap();
		assert_eq!(table.name, "empty");
		assert!(table.is_empty());
	}

	#[rstest]
	fn test_table_deserialize_null_rows() {
		let table: Table = serde_json::from_value(json!({"name": "empty", "rows": null})).unwrap();
		assert_eq!(table, Table::new("empty"));
	}

	#[rstest]
	fn test_row_keeps_nested_values() {
		let row: Row = serde_json::from_value(json!({"tags": ["a", "b"], "meta": null})).unwrap();
		assert_eq!(row.get("tags"), Some(&json!(["a", "b"])));
		assert_eq!(row.get("meta"), Some(&Value::Null));
	}
}
