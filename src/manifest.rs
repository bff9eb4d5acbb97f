// Clip manifest loading
// Extraction tools deliver clip records as JSON manifests: either a bare array
// of records or an object with a "clips" array. A path may be a single file or
// a directory that is walked for *.json manifests.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::clip::clip_name::fill_clip_name;
use crate::clip::ClipRecord;
use crate::constants::MANIFEST_EXTENSION;
use crate::error::{BridgeError, Result};

/// Both sides of a matching run, loaded together
#[derive(Debug, Clone, Default)]
pub struct ClipSets {
    pub monitor: Vec<ClipRecord>,
    pub dit: Vec<ClipRecord>,
}

fn is_manifest_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case(MANIFEST_EXTENSION))
}

/// Resolve a file or directory into manifest files, sorted by path
pub fn discover_manifests(source_path: &Path) -> Result<Vec<PathBuf>> {
    if source_path.is_file() {
        return Ok(vec![source_path.to_path_buf()]);
    }
    if !source_path.is_dir() {
        return Err(BridgeError::FileNotFound(source_path.display().to_string()));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(source_path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_manifest_file(p))
        .collect();

    // Sort by path for consistent ordering
    files.sort();
    Ok(files)
}

/// Clean up one record as it comes out of a manifest
fn normalize_record(mut record: ClipRecord, source: &Path) -> Result<ClipRecord> {
    if record.path.trim().is_empty() {
        return Err(BridgeError::Manifest(format!(
            "{}: clip '{}' has no path",
            source.display(),
            record.filename
        )));
    }

    if record.filename.is_empty() {
        record.filename = Path::new(&record.path)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| record.path.clone());
    }

    // Unusable measurements degrade to absent
    if record.duration.map_or(false, |d| !d.is_finite() || d < 0.0) {
        log::warn!("{}: ignoring invalid duration for {}", source.display(), record.filename);
        record.duration = None;
    }
    if record.frame_rate.map_or(false, |f| !f.is_finite() || f <= 0.0) {
        log::warn!("{}: ignoring invalid frame rate for {}", source.display(), record.filename);
        record.frame_rate = None;
    }

    fill_clip_name(&mut record);
    Ok(record)
}

/// Parse manifest JSON. `source` is only used in error messages.
pub fn parse_manifest(json: &str, source: &Path) -> Result<Vec<ClipRecord>> {
    let value: serde_json::Value = serde_json::from_str(json)?;

    let clips = match value {
        serde_json::Value::Array(items) => serde_json::Value::Array(items),
        serde_json::Value::Object(mut obj) => obj.remove("clips").ok_or_else(|| {
            BridgeError::Manifest(format!("{}: expected a \"clips\" array", source.display()))
        })?,
        _ => {
            return Err(BridgeError::Manifest(format!(
                "{}: expected an array of clips or an object with \"clips\"",
                source.display()
            )))
        }
    };

    let records: Vec<ClipRecord> = serde_json::from_value(clips)?;
    records.into_iter().map(|r| normalize_record(r, source)).collect()
}

/// Load one manifest file
pub fn load_manifest(path: &Path) -> Result<Vec<ClipRecord>> {
    let json = fs::read_to_string(path)?;
    let records = parse_manifest(&json, path)?;
    log::debug!("Loaded {} clips from {}", records.len(), path.display());
    Ok(records)
}

/// Load and concatenate every manifest under `paths`, in order.
/// Ids must be unique across the result.
pub fn load_records(paths: &[PathBuf]) -> Result<Vec<ClipRecord>> {
    let mut records = Vec::new();
    for path in paths {
        for manifest in discover_manifests(path)? {
            records.extend(load_manifest(&manifest)?);
        }
    }

    let mut seen = HashSet::new();
    for record in &records {
        if !seen.insert(record.id.as_str()) {
            return Err(BridgeError::Manifest(format!("Duplicate clip id: {}", record.id)));
        }
    }

    Ok(records)
}

/// Load monitor and DIT manifests concurrently; returns once both are done
pub fn load_sets(monitor_paths: &[PathBuf], dit_paths: &[PathBuf]) -> Result<ClipSets> {
    std::thread::scope(|s| {
        let monitor = s.spawn(|| load_records(monitor_paths));
        let dit = s.spawn(|| load_records(dit_paths));

        let monitor = monitor
            .join()
            .map_err(|_| BridgeError::Other("Monitor manifest loader panicked".to_string()))??;
        let dit = dit
            .join()
            .map_err(|_| BridgeError::Other("DIT manifest loader panicked".to_string()))??;

        log::info!("Loaded {} monitor clips and {} DIT clips", monitor.len(), dit.len());
        Ok(ClipSets { monitor, dit })
    })
}
