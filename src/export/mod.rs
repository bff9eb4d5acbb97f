// DIT Bridge - Export Module
// Serializes matched pairs into the relink document, the CSV summary and the
// narrative report. Every exporter refuses an empty pair list and writes
// through a temporary sibling file so a failed write never leaves a partial
// artifact at the destination.

pub mod relink;
pub mod summary;
pub mod report;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::clip::MatchedPair;
use crate::constants::{
    DEFAULT_EVENT_NAME, DEFAULT_PROJECT_NAME, FCPXML_VERSION, RELINK_FILENAME, REPORT_FILENAME,
    SUMMARY_FILENAME, TEMP_FILE_SUFFIX,
};
use crate::error::{BridgeError, Result};

pub use relink::{export_relink_document, render_relink_document};
pub use summary::{export_summary, render_summary};
pub use report::{export_report, render_report};

/// Artifact kinds the bridge can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Timeline relink document (FCPXML)
    Fcpxml,
    /// CSV summary table
    Csv,
    /// Human-readable match report
    Report,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Fcpxml, ExportFormat::Csv, ExportFormat::Report];

    /// File name used when exporting into a directory
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Fcpxml => RELINK_FILENAME,
            ExportFormat::Csv => SUMMARY_FILENAME,
            ExportFormat::Report => REPORT_FILENAME,
        }
    }
}

/// Export settings (names written into the relink document, formats for export_all)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportConfig {
    pub formats: Vec<ExportFormat>,
    pub event_name: String,
    pub project_name: String,
    pub fcpxml_version: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            formats: ExportFormat::ALL.to_vec(),
            event_name: DEFAULT_EVENT_NAME.to_string(),
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            fcpxml_version: FCPXML_VERSION.to_string(),
        }
    }
}

/// Fail with NoMatches instead of producing an empty artifact
pub fn ensure_not_empty(pairs: &[MatchedPair]) -> Result<()> {
    if pairs.is_empty() {
        return Err(BridgeError::NoMatches);
    }
    Ok(())
}

/// Write bytes to a temp sibling, then rename into place
pub(crate) fn write_artifact(dest: &Path, contents: &[u8]) -> io::Result<PathBuf> {
    let file_name = dest
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, format!("Not a file path: {}", dest.display())))?;
    let tmp_path = dest.with_file_name(format!("{}.{}", file_name, TEMP_FILE_SUFFIX));

    if let Err(e) = fs::write(&tmp_path, contents) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    fs::rename(&tmp_path, dest).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        e
    })?;

    Ok(dest.to_path_buf())
}

/// Write the configured artifacts into `out_dir`, returning their paths in format order
pub fn export_all(pairs: &[MatchedPair], out_dir: &Path, config: &ExportConfig) -> Result<Vec<PathBuf>> {
    ensure_not_empty(pairs)?;
    fs::create_dir_all(out_dir)?;

    let mut written = Vec::new();
    for format in &config.formats {
        let dest = out_dir.join(format.file_name());
        let path = match format {
            ExportFormat::Fcpxml => export_relink_document(pairs, &dest, config)?,
            ExportFormat::Csv => export_summary(pairs, &dest)?,
            ExportFormat::Report => export_report(pairs, &dest)?,
        };
        written.push(path);
    }

    Ok(written)
}
