// Clip-name derivation from on-screen text
// Monitor overlays and slates usually carry "Clip: A001C003" or "Scene: 12A".

use std::sync::OnceLock;
use regex::Regex;

use super::ClipRecord;

fn marker_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(?:clip|scene)\s*:\s*([A-Za-z0-9][A-Za-z0-9_.\-]*)").ok()
    })
    .as_ref()
}

/// Find the first "Clip:" or "Scene:" marker in extraction order
pub fn derive_clip_name<S: AsRef<str>>(extracted_text: &[S]) -> Option<String> {
    let re = marker_regex()?;
    extracted_text.iter().find_map(|fragment| {
        re.captures(fragment.as_ref())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    })
}

/// Fill `clip_name` from extracted text when extraction left it empty
pub fn fill_clip_name(record: &mut ClipRecord) {
    if record.clip_name().is_none() {
        if let Some(name) = derive_clip_name(&record.extracted_text) {
            record.clip_name = Some(name);
        }
    }
}
