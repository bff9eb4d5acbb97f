// Relink document (FCPXML) exporter
// Each pair contributes a monitor asset, a DIT asset and one spine clip that
// names the monitor asset as original and the DIT asset as replacement.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::clip::{ClipRecord, MatchedPair};
use crate::constants::{DEFAULT_CLIP_DURATION_SECS, DIT_ASSET_PREFIX, FILE_URL_SCHEME, MONITOR_ASSET_PREFIX};
use crate::error::{BridgeError, Result};
use super::{ensure_not_empty, write_artifact, ExportConfig};

/// Resource id for a monitor record, stable across runs
pub fn monitor_asset_id(record: &ClipRecord) -> String {
    format!("{}{}", MONITOR_ASSET_PREFIX, record.id)
}

/// Resource id for a DIT record, stable across runs
pub fn dit_asset_id(record: &ClipRecord) -> String {
    format!("{}{}", DIT_ASSET_PREFIX, record.id)
}

/// `file://` locator for an asset; locators that already carry the scheme pass through
fn file_url(path: &str) -> String {
    if path.starts_with(FILE_URL_SCHEME) {
        path.to_string()
    } else {
        format!("{}{}", FILE_URL_SCHEME, path)
    }
}

/// Timeline duration of a pair: the monitor clip's when usable, else the default
fn clip_duration(pair: &MatchedPair) -> String {
    let secs = pair
        .monitor_file
        .duration
        .filter(|d| d.is_finite() && *d >= 0.0)
        .unwrap_or(DEFAULT_CLIP_DURATION_SECS);
    format!("{}s", secs)
}

fn asset_element<'a>(id: &'a str, record: &'a ClipRecord, src: &'a str) -> BytesStart<'a> {
    let mut asset = BytesStart::new("asset");
    asset.push_attribute(("id", id));
    asset.push_attribute(("name", record.filename.as_str()));
    asset.push_attribute(("src", src));
    asset
}

fn named_start<'a>(tag: &'a str, name: &'a str) -> BytesStart<'a> {
    let mut start = BytesStart::new(tag);
    start.push_attribute(("name", name));
    start
}

/// Render the relink document
pub fn render_relink_document(pairs: &[MatchedPair], config: &ExportConfig) -> Result<String> {
    ensure_not_empty(pairs)?;

    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::DocType(BytesText::from_escaped("fcpxml")))?;

    let mut root = BytesStart::new("fcpxml");
    root.push_attribute(("version", config.fcpxml_version.as_str()));
    writer.write_event(Event::Start(root))?;

    // Resources: two assets per pair
    writer.write_event(Event::Start(BytesStart::new("resources")))?;
    for pair in pairs {
        let monitor_id = monitor_asset_id(&pair.monitor_file);
        let monitor_src = file_url(&pair.monitor_file.path);
        writer.write_event(Event::Empty(asset_element(&monitor_id, &pair.monitor_file, &monitor_src)))?;

        let dit_id = dit_asset_id(&pair.dit_file);
        let dit_src = file_url(&pair.dit_file.path);
        writer.write_event(Event::Empty(asset_element(&dit_id, &pair.dit_file, &dit_src)))?;
    }
    writer.write_event(Event::End(BytesEnd::new("resources")))?;

    // library > event > project > sequence > spine
    writer.write_event(Event::Start(BytesStart::new("library")))?;
    writer.write_event(Event::Start(named_start("event", &config.event_name)))?;
    writer.write_event(Event::Start(named_start("project", &config.project_name)))?;
    writer.write_event(Event::Start(BytesStart::new("sequence")))?;
    writer.write_event(Event::Start(BytesStart::new("spine")))?;

    for pair in pairs {
        let original_id = monitor_asset_id(&pair.monitor_file);
        let new_id = dit_asset_id(&pair.dit_file);
        let duration = clip_duration(pair);

        let mut clip = BytesStart::new("clip");
        clip.push_attribute(("name", pair.monitor_file.filename.as_str()));
        clip.push_attribute(("offset", "0s"));
        clip.push_attribute(("duration", duration.as_str()));
        clip.push_attribute(("originalAssetID", original_id.as_str()));
        clip.push_attribute(("newAssetID", new_id.as_str()));
        writer.write_event(Event::Empty(clip))?;
    }

    for tag in ["spine", "sequence", "project", "event", "library", "fcpxml"] {
        writer.write_event(Event::End(BytesEnd::new(tag)))?;
    }

    let bytes = writer.into_inner().into_inner();
    let mut xml = String::from_utf8(bytes)
        .map_err(|e| BridgeError::ExportFailed(format!("Relink document is not UTF-8: {}", e)))?;
    xml.push('\n');
    Ok(xml)
}

/// Write the relink document to `dest`
pub fn export_relink_document(pairs: &[MatchedPair], dest: &Path, config: &ExportConfig) -> Result<PathBuf> {
    let xml = render_relink_document(pairs, config)?;

    let path = write_artifact(dest, xml.as_bytes())
        .map_err(|e| BridgeError::ExportFailed(format!("Cannot write {}: {}", dest.display(), e)))?;

    log::info!("Wrote relink document with {} clips to {}", pairs.len(), path.display());
    Ok(path)
}
