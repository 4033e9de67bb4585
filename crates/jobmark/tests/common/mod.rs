//! Shared test utilities for jobmark integration tests.
//!
//! This module provides:
//! - `TestHarness` wiring services over a chosen backend in a temp directory
//! - `RecordingConfirmer` that answers prompts and remembers them

pub mod harness;

pub use harness::{skip_all, RecordingConfirmer, TestHarness, GRACE};
