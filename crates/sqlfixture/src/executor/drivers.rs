//! sqlx-backed executors for MySQL, PostgreSQL and SQLite.
//!
//! Implemented for both single connections and pools. Prefer a connection
//! when the fixture must run on the same session as the test (for example
//! an in-memory SQLite database).
//!
//! Cells bind as follows:
//!
//! | Cell                    | Bound as            |
//! |-------------------------|---------------------|
//! | `null`                  | `NULL` (as `int4`)  |
//! | boolean                 | `bool`              |
//! | integer within `i64`    | `i64`               |
//! | floating point          | `f64`               |
//! | other numbers           | decimal text        |
//! | string                  | `String`            |
//! | array / object          | JSON text           |
//!
//! PostgreSQL types every parameter. A null is sent as a nullable `int4`,
//! which the server assignment-casts into text and numeric columns.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{MySql, MySqlConnection, MySqlPool, PgConnection, PgPool, Postgres, Sqlite};
use sqlx::{SqliteConnection, SqlitePool};

use super::Executor;
use crate::error::ExecutorError;
use crate::model::Cell;

macro_rules! bind_cell {
	($query:ident, $cell:expr) => {
		match $cell {
			Value::Null => $query.bind(None::<i32>),
			Value::Bool(value) => $query.bind(*value),
			Value::Number(number) => {
				if let Some(value) = number.as_i64() {
					$query.bind(value)
				} else if number.is_f64() {
					$query.bind(number.as_f64())
				} else {
					$query.bind(number.to_string())
				}
			}
			Value::String(value) => $query.bind(value.clone()),
			nested @ (Value::Array(_) | Value::Object(_)) => $query.bind(nested.to_string()),
		}
	};
}

macro_rules! impl_connection_executor {
	($connection:ty, $db:ty) => {
		#[async_trait]
		impl Executor for $connection {
			async fn execute(&mut self, sql: &str, params: &[Cell]) -> Result<u64, ExecutorError> {
				let mut query = sqlx::query::<$db>(sql);
				for param in params {
					query = bind_cell!(query, param);
				}
				let result = query.execute(&mut *self).await?;
				Ok(result.rows_affected())
			}
		}
	};
}

macro_rules! impl_pool_executor {
	($pool:ty, $db:ty) => {
		#[async_trait]
		impl Executor for $pool {
			async fn execute(&mut self, sql: &str, params: &[Cell]) -> Result<u64, ExecutorError> {
				let mut query = sqlx::query::<$db>(sql);
				for param in params {
					query = bind_cell!(query, param);
				}
				let result = query.execute(&*self).await?;
				Ok(result.rows_affected())
			}
		}
	};
}

impl_connection_executor!(MySqlConnection, MySql);
impl_connection_executor!(PgConnection, Postgres);
impl_connection_executor!(SqliteConnection, Sqlite);

impl_pool_executor!(MySqlPool, MySql);
impl_pool_executor!(PgPool, Postgres);
impl_pool_executor!(SqlitePool, Sqlite);
