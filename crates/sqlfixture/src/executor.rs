//! The statement executor seam.
//!
//! The engine never talks to a database directly. It hands SQL text and
//! positional parameters to an [`Executor`] and waits for the outcome.

use async_trait::async_trait;

use crate::error::ExecutorError;
use crate::model::Cell;

#[cfg(feature = "sqlx")]
pub mod drivers;

/// Runs statements against the target database.
///
/// Implementations must bind `params` to the placeholders in `sql` by
/// position. An executor is used exclusively by one population run at a
/// time; use one connection per concurrently populated fixture.
///
/// # Example
///
/// ```ignore
/// struct Logging;
///
/// #[async_trait]
/// impl Executor for Logging {
///     async fn execute(&mut self, sql: &str, params: &[Cell]) -> Result<u64, ExecutorError> {
///         println!("{} {:?}", sql, params);
///         Ok(0)
///     }
/// }
/// ```
#[async_trait]
pub trait Executor: Send {
	/// Executes one statement, returning the number of rows affected.
	async fn execute(&mut self, sql: &str, params: &[Cell]) -> Result<u64, ExecutorError>;
}

#[async_trait]
impl<E> Executor for &mut E
where
	E: Executor + ?Sized,
{
	async fn execute(&mut self, sql: &str, params: &[Cell]) -> Result<u64, ExecutorError> {
		(**self).execute(sql, params).await
	}
}

#[async_trait]
impl<E> Executor for Box<E>
where
	E: Executor + ?Sized,
{
	async fn execute(&mut self, sql: &str, params: &[Cell]) -> Result<u64, ExecutorError> {
		(**self).execute(sql, params).await
	}
}
