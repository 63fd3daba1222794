//! Convenience re-exports for common usage.
//!
//! ```ignore
//! use sqlfixture::prelude::*;
//! ```

// Error types
pub use crate::error::{BuildError, DecodeError, ExecutorError, FixtureError, FixtureResult};

// Data model
pub use crate::model::{Cell, Row, Rows, Table, Tables};

// Decoding
pub use crate::fixtures::{FixtureFormat, FixtureParser};

// Population
pub use crate::engine::{Fixture, PlanStep, PopulateOptions, PopulateReport, PopulationPlan};
pub use crate::executor::Executor;
pub use crate::statement::{Dialect, Statement};
