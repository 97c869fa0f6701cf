//! JSON output for API consumption.

use crate::models::DailyReport;
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Write a [`DailyReport`] to `{json_output_dir}/{local_date}.json`.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_report(
    report: &DailyReport,
    json_output_dir: &str,
) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string(report)?;

    fs::create_dir_all(json_output_dir).await?;
    let path = format!("{}/{}.json", json_output_dir, report.local_date);

    info!(path = %path, "Writing JSON report");
    fs::write(&path, json).await?;
    info!(path = %path, groups = report.groups.len(), "Wrote JSON API file");

    Ok(())
}
