//! Test helpers for sqlfixture tests.
//!
//! This module provides utility functions for loading test data
//! and an executor that records the statements it receives.

#![allow(dead_code)]

#[path = "helpers/recording_executor.rs"]
pub mod recording_executor;
#[path = "helpers/test_data.rs"]
pub mod test_data;
