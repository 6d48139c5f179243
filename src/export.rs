use crate::error::{Error, Result};
use crate::store::SavedResult;
use crate::utils::report_file_name;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Producer recorded in every exported report
pub const EXPORT_SOURCE: &str = "page-compare CLI";

#[derive(Debug, Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    saved: &'a SavedResult,
    export_date: DateTime<Utc>,
    export_source: &'static str,
}

/// Render a saved result as a pretty-printed JSON report
pub fn render_report(saved: &SavedResult, exported_at: DateTime<Utc>) -> Result<String> {
    let report = Report {
        saved,
        export_date: exported_at,
        export_source: EXPORT_SOURCE,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Write the report to `path`, or to `page-compare-report-YYYY-MM-DD.json` in `dir`
pub fn export_report(
    saved: &SavedResult,
    path: Option<&Path>,
    dir: &Path,
    exported_at: DateTime<Utc>,
) -> Result<PathBuf> {
    let target = match path {
        Some(path) => path.to_path_buf(),
        None => dir.join(report_file_name(exported_at.date_naive())),
    };

    let contents = render_report(saved, exported_at)?;
    std::fs::write(&target, contents).map_err(|e| Error::io(&target, e))?;
    ::log::info!("Exported report to {}", target.display());
    Ok(target)
}
