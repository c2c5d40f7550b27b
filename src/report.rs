//! JSON report export.

use crate::pipeline::DashboardReport;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn to_json_string(report: &DashboardReport) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Write the report as pretty JSON, creating parent directories as needed.
pub fn write_json(report: &DashboardReport, path: &Path) -> Result<(), ReportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, to_json_string(report)?)?;
    info!(path = %path.display(), "wrote dashboard report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::yearly;
    use crate::data::YearRange;
    use crate::pipeline::build_report;

    #[test]
    fn test_json_shape() {
        let report = build_report(&yearly(&[100.0, 150.0, 90.0]), YearRange::all(), 24).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&to_json_string(&report).unwrap()).unwrap();

        assert_eq!(json["summary"]["total_generated"]["value"], 340.0);
        assert_eq!(json["summary"]["total_generated"]["display"], "340 ton");
        assert_eq!(json["preview"][0]["period"], "2020-01-01");
        assert_eq!(json["series"]["scenario"]["traces"].as_array().unwrap().len(), 3);
        assert!(json["year_from"].is_null());
    }

    #[test]
    fn test_write_json_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");
        let report = build_report(&yearly(&[1.0]), YearRange::all(), 24).unwrap();

        write_json(&report, &path).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("\"insights\""));
    }
}
