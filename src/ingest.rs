//! Import and export of run records as JSON
//!
//! Externally sourced populations use the same schema as generated ones.
//! Every timestamp is optional on the wire so that a missing value surfaces
//! as [`DriftError::MissingTimestamp`] instead of a parse failure.

use crate::error::{DriftError, Result};
use crate::record::{JobRunRecord, RunStatus};
use anyhow::Context;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// A run record as it appears in an input file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRunRecord {
    pub job_name: String,
    #[serde(default)]
    pub request_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub begin_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub end_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub submitter: String,
    pub status: RunStatus,
    #[serde(default)]
    pub run_instance_id: u32,
    #[serde(default)]
    pub control_id: String,
}

impl RawRunRecord {
    /// Convert into a typed record, rejecting missing timestamps
    ///
    /// Causality is not checked here; the aggregator applies its integrity
    /// policy to the converted records.
    pub fn into_record(self, index: usize) -> Result<JobRunRecord> {
        let missing = |field| DriftError::MissingTimestamp { index, field };
        Ok(JobRunRecord {
            request_time: self.request_time.ok_or_else(|| missing("request_time"))?,
            begin_time: self.begin_time.ok_or_else(|| missing("begin_time"))?,
            end_time: self.end_time.ok_or_else(|| missing("end_time"))?,
            job_name: self.job_name,
            submitter: self.submitter,
            status: self.status,
            run_instance_id: self.run_instance_id,
            control_id: self.control_id,
        })
    }
}

/// Parse a JSON array of run records
pub fn parse_records(json: &str) -> Result<Vec<JobRunRecord>> {
    let raw: Vec<RawRunRecord> =
        serde_json::from_str(json).map_err(|e| DriftError::RecordParse(e.to_string()))?;
    convert(raw)
}

fn convert(raw: Vec<RawRunRecord>) -> Result<Vec<JobRunRecord>> {
    raw.into_iter()
        .enumerate()
        .map(|(index, r)| r.into_record(index))
        .collect()
}

/// Load run records from a JSON file
pub fn load_records<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<JobRunRecord>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open records file: {}", path.display()))?;
    let raw: Vec<RawRunRecord> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse records file: {}", path.display()))?;
    let records = convert(raw)?;
    tracing::info!(records = records.len(), path = %path.display(), "loaded run records");
    Ok(records)
}

/// Write run records as a pretty-printed JSON array
pub fn write_records<P: AsRef<Path>>(path: P, records: &[JobRunRecord]) -> anyhow::Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create records file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records).context("Failed to serialize records")?;
    writer.flush()?;
    tracing::info!(records = records.len(), path = %path.display(), "wrote run records");
    Ok(())
}
