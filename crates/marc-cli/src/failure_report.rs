//! JSON list of records that need manual reprocessing.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use marc_model::{RecordFailure, RunReport};

const REPORT_SCHEMA: &str = "marc-normalize.failure-report";
const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
struct FailureReportPayload<'a> {
    schema: &'static str,
    schema_version: u32,
    generated_at: String,
    source: &'a Path,
    records_read: usize,
    written: usize,
    failures: &'a [RecordFailure],
}

/// Write the run's failed records to `path` as pretty-printed JSON.
pub fn write_failure_report(path: &Path, report: &RunReport) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;
    }
    let payload = FailureReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        source: &report.source,
        records_read: report.records_read,
        written: report.written.len(),
        failures: &report.failures,
    };
    let json = serde_json::to_string_pretty(&payload).context("serialize failure report")?;
    std::fs::write(path, format!("{json}\n"))
        .with_context(|| format!("write {}", path.display()))?;
    Ok(path.to_path_buf())
}
