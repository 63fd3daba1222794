//! Executor double that records every statement it is given.

use async_trait::async_trait;
use sqlfixture::{Cell, Executor, ExecutorError};

/// A statement received by [`RecordingExecutor`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
	/// Statement text.
	pub sql: String,
	/// Bound parameters.
	pub params: Vec<Cell>,
}

/// Records statements and optionally fails one of them.
///
/// The failing statement is recorded before the error is returned, so
/// `calls` always holds every statement the engine issued.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
	/// Statements received, in order.
	pub calls: Vec<RecordedCall>,
	fail_at: Option<usize>,
	fail_on_sql: Option<String>,
}

impl RecordingExecutor {
	/// Creates an executor that accepts every statement.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an executor that fails the call with the given zero-based index.
	pub fn failing_at(index: usize) -> Self {
		Self {
			fail_at: Some(index),
			..Self::default()
		}
	}

	/// Creates an executor that fails the first statement equal to `sql`.
	pub fn failing_on(sql: impl Into<String>) -> Self {
		Self {
			fail_on_sql: Some(sql.into()),
			..Self::default()
		}
	}

	/// Returns the recorded statement texts.
	pub fn statements(&self) -> Vec<&str> {
		self.calls.iter().map(|call| call.sql.as_str()).collect()
	}
}

#[async_trait]
impl Executor for RecordingExecutor {
	async fn execute(&mut self, sql: &str, params: &[Cell]) -> Result<u64, ExecutorError> {
		let index = self.calls.len();
		self.calls.push(RecordedCall {
			sql: sql.to_string(),
			params: params.to_vec(),
		});

		let fails = self.fail_at == Some(index) || self.fail_on_sql.as_deref() == Some(sql);
		if fails {
			return Err(ExecutorError::new(format!("rejected statement #{}", index)));
		}

		Ok(if sql.starts_with("insert") { 1 } else { 0 })
	}
}
