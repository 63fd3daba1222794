//! Database fixtures for integration tests.
//!
//! This crate resets tables and fills them with rows described in JSON or
//! YAML, so every test starts from the same known database contents.
//!
//! - **Data model**: [`Table`]s of [`Row`]s, each row a column to value map
//! - **Decoding**: JSON and YAML fixture documents and files
//! - **Population**: per table, one truncate followed by one parameterized
//!   insert per row, executed through a pluggable [`Executor`]
//!
//! # Features
//!
//! - `yaml` - YAML fixture format support (enabled by default)
//! - `sqlx` - [`Executor`] implementations for sqlx connections and pools
//!   (enabled by default)
//! - `full` - All features enabled
//!
//! # Quick Start
//!
//! Create a fixture file (`fixtures/test.yaml`):
//!
//! ```yaml
//! - name: test
//!   rows:
//!     - id: 1
//!       name: something
//! - name: test2
//!   rows:
//!     - id: 1
//!       slug: something
//!     - id: 2
//!       slug: something-else
//! ```
//!
//! Load it before running a test:
//!
//! ```ignore
//! use sqlfixture::prelude::*;
//!
//! let fixture = Fixture::from_path(&mut conn, "fixtures/test.yaml")?;
//! let report = fixture.populate().await?;
//! println!("Inserted {} rows", report.rows_inserted);
//! ```
//!
//! # Warning
//!
//! Every table named in a fixture is truncated. Table and column names are
//! written into the SQL text unescaped; only values are bound as
//! parameters. Fixtures must come from trusted authors.
//!
//! Population is not transactional: if a statement fails, the tables
//! handled before it stay truncated or partially filled.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod engine;
pub mod error;
pub mod executor;
pub mod fixtures;
pub mod model;
pub mod prelude;
pub mod statement;

// Re-export commonly used types at crate root
pub use engine::{Fixture, PlanStep, PopulateOptions, PopulateReport, PopulationPlan};
pub use error::{BuildError, DecodeError, ExecutorError, FixtureError, FixtureResult};
pub use executor::Executor;
pub use fixtures::{FixtureFormat, FixtureParser};
pub use model::{Cell, Row, Rows, Table, Tables};
pub use statement::{Dialect, Statement};
