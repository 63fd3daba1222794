//! Test data loader helper.
//!
//! Provides convenient access to the fixture documents under
//! `tests/fixtures/data`.

use std::path::{Path, PathBuf};

/// Test data loader for fixture files.
pub struct TestDataLoader {
	base_path: PathBuf,
}

impl TestDataLoader {
	/// Create a new test data loader rooted at `tests/fixtures/data`.
	pub fn new() -> Self {
		Self {
			base_path: Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/data"),
		}
	}

	/// Load a test data file (with extension) as raw bytes.
	///
	/// # Panics
	///
	/// Panics if the file cannot be read.
	pub fn load(&self, name: &str) -> Vec<u8> {
		let path = self.path(name);
		std::fs::read(&path).unwrap_or_else(|_| panic!("Failed to load test data: {:?}", path))
	}

	/// Get the full path to a test data file.
	pub fn path(&self, name: &str) -> PathBuf {
		self.base_path.join(name)
	}
}

impl Default for TestDataLoader {
	fn default() -> Self {
		Self::new()
	}
}

