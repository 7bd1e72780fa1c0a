use serde::Serialize;
use std::path::{Path, PathBuf};
use urlmon_common::{CheckResult, Result, Summary, UrlMonError};

use crate::config::{REPORT_FILE_NAME, RESULTS_FILE_NAME};
use crate::pipeline::MonitorRun;

/// Shape of `results.json`.
#[derive(Debug, Serialize)]
pub struct ResultsDocument<'a> {
    pub source: &'a str,
    pub summary: &'a Summary,
    pub results: &'a [CheckResult],
}

/// Files written by [`save_outputs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub report: PathBuf,
    pub results: PathBuf,
}

fn io_error(path: &Path, e: std::io::Error) -> UrlMonError {
    UrlMonError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

/// Pretty-printed (2-space) JSON document for a run.
pub fn results_json(source: &str, run: &MonitorRun) -> Result<String> {
    let doc = ResultsDocument {
        source,
        summary: &run.summary,
        results: &run.results,
    };
    serde_json::to_string_pretty(&doc).map_err(|e| UrlMonError::Serialization(e.to_string()))
}

/// Write `results.json` and `report.md` into `out_dir`, creating it if needed.
pub fn save_outputs(out_dir: &Path, source: &str, run: &MonitorRun) -> Result<OutputPaths> {
    std::fs::create_dir_all(out_dir).map_err(|e| io_error(out_dir, e))?;

    let paths = OutputPaths {
        report: out_dir.join(REPORT_FILE_NAME),
        results: out_dir.join(RESULTS_FILE_NAME),
    };

    let json = results_json(source, run)?;
    std::fs::write(&paths.results, json).map_err(|e| io_error(&paths.results, e))?;
    write_report(&paths.report, &run.report)?;

    Ok(paths)
}

/// Write a rendered report to `path`.
pub fn write_report(path: &Path, report: &str) -> Result<()> {
    std::fs::write(path, report).map_err(|e| io_error(path, e))
}
