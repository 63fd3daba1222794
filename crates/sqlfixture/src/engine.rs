//! The population engine.
//!
//! A [`Fixture`] binds an [`Executor`] to a set of [`Tables`]. Populating it
//! resets every table and inserts its rows, strictly in order:
//!
//! ```text
//! Idle -> Truncate(t0) -> Insert(t0, r0) -> ... -> Truncate(t1) -> ... -> Done
//! ```
//!
//! The first failing statement ends the run. Nothing is retried and nothing
//! already executed is rolled back.

use std::path::Path;

use crate::error::{BuildError, DecodeError, FixtureError, FixtureResult};
use crate::executor::Executor;
use crate::fixtures::{FixtureFormat, FixtureParser};
use crate::model::Tables;
use crate::statement::{self, Dialect, Statement};

/// Options controlling statement generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopulateOptions {
	/// SQL dialect of the target database.
	pub dialect: Dialect,

	/// Reject table and column names that are not plain identifiers.
	pub validate_identifiers: bool,
}

impl PopulateOptions {
	/// Creates new default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the SQL dialect.
	pub fn with_dialect(mut self, dialect: Dialect) -> Self {
		self.dialect = dialect;
		self
	}

	/// Enables or disables identifier validation.
	///
	/// Table and column names are always interpolated into statement text.
	/// Validation does not make untrusted fixtures safe to load, it only
	/// catches typos and stray punctuation early.
	pub fn with_identifier_validation(mut self, enabled: bool) -> Self {
		self.validate_identifiers = enabled;
		self
	}
}

/// One statement of a population run.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanStep {
	/// Remove every row of `table`.
	Truncate {
		/// Target table.
		table: String,
		/// Reset statement.
		statement: Statement,
	},

	/// Insert row `row` of `table`.
	Insert {
		/// Target table.
		table: String,
		/// Zero-based row index within the table.
		row: usize,
		/// Insert statement with bound parameters.
		statement: Statement,
	},
}

impl PlanStep {
	/// Returns the target table.
	pub fn table(&self) -> &str {
		match self {
			Self::Truncate { table, .. } | Self::Insert { table, .. } => table.as_str(),
		}
	}

	/// Returns the statement to execute.
	pub fn statement(&self) -> &Statement {
		match self {
			Self::Truncate { statement, .. } | Self::Insert { statement, .. } => statement,
		}
	}
}

/// Every statement of a population run, in execution order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopulationPlan {
	/// Steps in execution order.
	pub steps: Vec<PlanStep>,
}

impl PopulationPlan {
	/// Builds the plan for `tables`.
	///
	/// # Errors
	///
	/// Returns the first [`BuildError`] found, in table then row order.
	pub fn build(tables: &Tables, options: PopulateOptions) -> Result<Self, BuildError> {
		let capacity = tables.iter().map(|t| t.rows.len() + 1).sum();
		let mut steps = Vec::with_capacity(capacity);

		for table in tables {
			if options.validate_identifiers {
				statement::validate_identifiers(&table.name, &table.rows)?;
			}

			steps.push(PlanStep::Truncate {
				table: table.name.clone(),
				statement: statement::build_truncate(&table.name, options.dialect),
			});

			for (index, row) in table.rows.iter().enumerate() {
				steps.push(PlanStep::Insert {
					table: table.name.clone(),
					row: index,
					statement: statement::build_insert(&table.name, index, row, options.dialect)?,
				});
			}
		}

		Ok(Self { steps })
	}

	/// Returns the number of steps.
	pub fn len(&self) -> usize {
		self.steps.len()
	}

	/// Returns true if the plan has no steps.
	pub fn is_empty(&self) -> bool {
		self.steps.is_empty()
	}

	/// Returns an iterator over the steps.
	pub fn iter(&self) -> impl Iterator<Item = &PlanStep> {
		self.steps.iter()
	}
}

/// Summary of a successful population run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopulateReport {
	/// Number of tables reset.
	pub tables_truncated: usize,

	/// Number of rows inserted.
	pub rows_inserted: usize,

	/// Sum of rows affected as reported by the executor.
	pub rows_affected: u64,
}

/// Fixture data bound to the executor that will load it.
///
/// # Warning
///
/// Populating truncates every table named in the fixture. Table and column
/// names are written into the SQL text as-is and must come from trusted
/// fixture files.
///
/// # Example
///
/// ```ignore
/// use sqlfixture::prelude::*;
///
/// let mut conn = SqliteConnection::connect("sqlite::memory:").await?;
/// let fixture = Fixture::new(&mut conn, vec![
///     Table::new("test").with_row(Row::new().with("id", 1).with("name", "something")),
/// ])
/// .with_options(PopulateOptions::new().with_dialect(Dialect::Sqlite));
/// let report = fixture.populate().await?;
/// assert_eq!(report.rows_inserted, 1);
/// ```
#[derive(Debug)]
pub struct Fixture<E> {
	executor: E,
	tables: Tables,
	options: PopulateOptions,
}

impl<E: Executor> Fixture<E> {
	/// Creates a fixture from explicit tables.
	pub fn new(executor: E, tables: Tables) -> Self {
		Self {
			executor,
			tables,
			options: PopulateOptions::default(),
		}
	}

	/// Creates a fixture from fixture bytes in the given format.
	///
	/// # Errors
	///
	/// Returns a [`DecodeError`] if the bytes cannot be decoded. No fixture
	/// is returned in that case.
	pub fn from_bytes(executor: E, bytes: &[u8], format: FixtureFormat) -> Result<Self, DecodeError> {
		let tables = FixtureParser::new().parse_bytes(bytes, format)?;
		Ok(Self::new(executor, tables))
	}

	/// Creates a fixture from a JSON document.
	pub fn from_json(executor: E, bytes: &[u8]) -> Result<Self, DecodeError> {
		Self::from_bytes(executor, bytes, FixtureFormat::Json)
	}

	/// Creates a fixture from a YAML document.
	pub fn from_yaml(executor: E, bytes: &[u8]) -> Result<Self, DecodeError> {
		Self::from_bytes(executor, bytes, FixtureFormat::Yaml)
	}

	/// Creates a fixture from a file, detecting the format from its extension.
	pub fn from_path(executor: E, path: impl AsRef<Path>) -> Result<Self, DecodeError> {
		let tables = FixtureParser::new().parse_file(path.as_ref())?;
		Ok(Self::new(executor, tables))
	}

	/// Creates a fixture from several files, concatenating their tables in order.
	pub fn from_paths(executor: E, paths: &[&Path]) -> Result<Self, DecodeError> {
		let tables = FixtureParser::new().parse_files(paths)?;
		Ok(Self::new(executor, tables))
	}

	/// Replaces the population options.
	pub fn with_options(mut self, options: PopulateOptions) -> Self {
		self.options = options;
		self
	}

	/// Returns the tables this fixture will populate.
	pub fn tables(&self) -> &Tables {
		&self.tables
	}

	/// Returns the population options.
	pub fn options(&self) -> &PopulateOptions {
		&self.options
	}

	/// Builds every statement without executing anything.
	pub fn plan(&self) -> Result<PopulationPlan, BuildError> {
		PopulationPlan::build(&self.tables, self.options)
	}

	/// Truncates each table and inserts its rows.
	///
	/// The whole plan is built before the first statement runs, so a
	/// [`BuildError`] leaves the database untouched. After that, the first
	/// executor failure stops the run; earlier tables stay truncated and
	/// populated.
	///
	/// # Errors
	///
	/// Returns [`FixtureError::Build`] for an unbuildable row,
	/// [`FixtureError::Truncate`] or [`FixtureError::Insert`] when the
	/// executor fails.
	pub async fn populate(self) -> FixtureResult<PopulateReport> {
		let plan = self.plan()?;
		let Self {
			mut executor,
			tables,
			options,
		} = self;

		tracing::info!(
			tables = tables.len(),
			statements = plan.len(),
			dialect = %options.dialect,
			"populating fixture"
		);

		let mut report = PopulateReport::default();
		for step in plan.steps {
			match step {
				PlanStep::Truncate { table, statement } => {
					tracing::debug!(table = %table, sql = %statement.sql, "truncating table");
					match executor.execute(&statement.sql, &statement.params).await {
						Ok(affected) => {
							report.tables_truncated += 1;
							report.rows_affected += affected;
						}
						Err(source) => {
							tracing::warn!(table = %table, error = %source, "truncate failed, aborting population");
							return Err(FixtureError::Truncate {
								table,
								statement: statement.sql,
								source,
							});
						}
					}
				}
				PlanStep::Insert {
					table,
					row,
					statement,
				} => {
					tracing::debug!(
						table = %table,
						row,
						params = statement.params.len(),
						"inserting row"
					);
					match executor.execute(&statement.sql, &statement.params).await {
						Ok(affected) => {
							report.rows_inserted += 1;
							report.rows_affected += affected;
						}
						Err(source) => {
							tracing::warn!(table = %table, row, error = %source, "insert failed, aborting population");
							return Err(FixtureError::Insert {
								table,
								row,
								statement: statement.sql,
								source,
							});
						}
					}
				}
			}
		}

		tracing::info!(
			tables = report.tables_truncated,
			rows = report.rows_inserted,
			"fixture populated"
		);
		Ok(report)
	}
}
