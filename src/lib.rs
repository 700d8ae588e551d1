//! jobdrift - batch-job telemetry synthesis and upgrade drift analysis
//!
//! This library generates synthetic job-run populations around a system
//! upgrade (the cutover), aggregates run durations into weekly means, and
//! ranks jobs by how the interquartile range of those means changed across
//! the cutover.

pub mod cli;
pub mod comparison;
pub mod config;
pub mod csv_output;
pub mod error;
pub mod ingest;
pub mod job;
pub mod json_output;
pub mod record;
pub mod summary;
pub mod text_output;
pub mod workload;

pub use error::{DriftError, Result};
