// Clip record model
// One media file's metadata as delivered by extraction, plus the matcher's
// output unit. Identity is the `id` alone: two records with identical fields
// but different ids are distinct.

pub mod clip_name;

use std::hash::{Hash, Hasher};
use serde::{Deserialize, Serialize};

/// Generate a fresh opaque identifier
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Metadata for one monitor or DIT media file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipRecord {
    #[serde(default = "new_id")]
    pub id: String,
    #[serde(default)]
    pub filename: String,
    pub path: String,
    pub timecode: Option<String>,
    pub clip_name: Option<String>,
    /// Seconds
    pub duration: Option<f64>,
    pub frame_rate: Option<f64>,
    /// "<width>x<height>"
    pub resolution: Option<String>,
    #[serde(default)]
    pub extracted_text: Vec<String>,
}

impl ClipRecord {
    /// Create a record with a fresh id and no extracted metadata
    pub fn new(filename: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            filename: filename.into(),
            path: path.into(),
            timecode: None,
            clip_name: None,
            duration: None,
            frame_rate: None,
            resolution: None,
            extracted_text: Vec::new(),
        }
    }

    pub fn with_timecode(mut self, timecode: impl Into<String>) -> Self {
        self.timecode = Some(timecode.into());
        self
    }

    pub fn with_clip_name(mut self, clip_name: impl Into<String>) -> Self {
        self.clip_name = Some(clip_name.into());
        self
    }

    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn with_frame_rate(mut self, fps: f64) -> Self {
        self.frame_rate = Some(fps);
        self
    }

    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.resolution = Some(format!("{}x{}", width, height));
        self
    }

    pub fn with_extracted_text<I, S>(mut self, text: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extracted_text = text.into_iter().map(Into::into).collect();
        self
    }

    /// Timecode, treating an empty string as absent
    pub fn timecode(&self) -> Option<&str> {
        non_empty(self.timecode.as_deref())
    }

    /// Clip name, treating an empty string as absent
    pub fn clip_name(&self) -> Option<&str> {
        non_empty(self.clip_name.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

impl PartialEq for ClipRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ClipRecord {}

impl Hash for ClipRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A monitor record paired with its best DIT candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedPair {
    pub id: String,
    pub monitor_file: ClipRecord,
    pub dit_file: ClipRecord,
    /// Always within [0.0, 1.0]
    pub match_confidence: f64,
}

impl MatchedPair {
    pub fn new(monitor_file: ClipRecord, dit_file: ClipRecord, match_confidence: f64) -> Self {
        Self {
            id: new_id(),
            monitor_file,
            dit_file,
            match_confidence: match_confidence.clamp(0.0, 1.0),
        }
    }
}

impl PartialEq for MatchedPair {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MatchedPair {}

impl Hash for MatchedPair {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
