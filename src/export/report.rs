// Narrative report exporter
// Plain-text block per pair listing every populated field, monitor side first.

use std::path::{Path, PathBuf};
use chrono::{DateTime, Utc};

use crate::clip::{ClipRecord, MatchedPair};
use crate::error::Result;
use super::{ensure_not_empty, write_artifact};

/// Field lines for one record. Extracted text is only listed for the monitor side.
fn record_lines(label: &str, record: &ClipRecord, include_text: bool) -> Vec<String> {
    let mut lines = vec![format!("{}: {}", label, record.filename)];
    lines.push(format!("  Path: {}", record.path));

    if let Some(tc) = record.timecode() {
        lines.push(format!("  Timecode: {}", tc));
    }
    if let Some(name) = record.clip_name() {
        lines.push(format!("  Clip Name: {}", name));
    }
    if let Some(duration) = record.duration {
        lines.push(format!("  Duration: {:.2}s", duration));
    }
    if let Some(fps) = record.frame_rate {
        lines.push(format!("  Frame Rate: {} fps", fps));
    }
    if let Some(ref resolution) = record.resolution {
        lines.push(format!("  Resolution: {}", resolution));
    }
    if include_text && !record.extracted_text.is_empty() {
        lines.push(format!("  Extracted Text: {}", record.extracted_text.join(" | ")));
    }

    lines
}

/// Render the report with an explicit generation time
pub fn render_report(pairs: &[MatchedPair], generated_at: DateTime<Utc>) -> Result<String> {
    ensure_not_empty(pairs)?;

    let mut lines = vec![
        "DIT Bridge Match Report".to_string(),
        format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S UTC")),
        format!("Matched pairs: {}", pairs.len()),
    ];

    for (i, pair) in pairs.iter().enumerate() {
        lines.push(String::new());
        lines.push(format!("=== Match {} of {} ===", i + 1, pairs.len()));
        lines.extend(record_lines("Monitor File", &pair.monitor_file, true));
        lines.extend(record_lines("DIT File", &pair.dit_file, false));
        lines.push(format!("Match Confidence: {:.0}%", pair.match_confidence * 100.0));
    }

    let mut report = lines.join("\n");
    report.push('\n');
    Ok(report)
}

/// Write the report, stamped with the current time, to `dest`
pub fn export_report(pairs: &[MatchedPair], dest: &Path) -> Result<PathBuf> {
    let report = render_report(pairs, Utc::now())?;
    let path = write_artifact(dest, report.as_bytes())?;

    log::info!("Wrote match report to {}", path.display());
    Ok(path)
}
