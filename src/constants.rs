// DIT Bridge Constants
// Matching weights and cutoffs are part of the compatibility contract with
// earlier bridge output. Change them only together with the matcher tests.

// ----- Matching -----

// Duration signal bands (seconds, strict `<` comparison)
pub const DURATION_CLOSE_SECS: f64 = 1.0;
pub const DURATION_NEAR_SECS: f64 = 5.0;
pub const WEIGHT_DURATION_CLOSE: f64 = 0.4;
pub const WEIGHT_DURATION_NEAR: f64 = 0.2;

// Timecode signal (exact string equality)
pub const WEIGHT_TIMECODE: f64 = 0.3;

// Clip-name signal
pub const WEIGHT_CLIP_NAME_EXACT: f64 = 0.3;
pub const WEIGHT_CLIP_NAME_PARTIAL: f64 = 0.2;

// Extracted-text signal (first fragment found in the DIT filename)
pub const WEIGHT_EXTRACTED_TEXT: f64 = 0.1;

// A pair is a candidate only when its score is strictly above this.
// Scores are rounded to SCORE_DECIMALS first, so duration-close plus timecode
// (0.4 + 0.3) lands exactly on 0.7 and is rejected, where an unrounded float
// sum (0.7000000000000001) would accept it.
pub const MATCH_THRESHOLD: f64 = 0.7;
pub const MAX_CONFIDENCE: f64 = 1.0;

// Scores are rounded to this many decimal places before comparison
pub const SCORE_DECIMALS: i32 = 6;

// Stable signal tokens for score breakdowns
pub const S_DURATION_CLOSE: &str = "duration_close";
pub const S_DURATION_NEAR: &str = "duration_near";
pub const S_TIMECODE: &str = "timecode";
pub const S_CLIP_NAME_EXACT: &str = "clip_name_exact";
pub const S_CLIP_NAME_PARTIAL: &str = "clip_name_partial";
pub const S_EXTRACTED_TEXT: &str = "extracted_text";

// ----- Export -----

pub const DEFAULT_CLIP_DURATION_SECS: f64 = 10.0;
pub const FCPXML_VERSION: &str = "1.9";
pub const DEFAULT_EVENT_NAME: &str = "DIT Bridge";
pub const DEFAULT_PROJECT_NAME: &str = "Relinked Timeline";
pub const MONITOR_ASSET_PREFIX: &str = "monitor_";
pub const DIT_ASSET_PREFIX: &str = "dit_";
pub const FILE_URL_SCHEME: &str = "file://";

pub const CSV_HEADER: [&str; 3] = ["Monitor File", "DIT File", "Match Confidence"];

// Artifact file names used by export_all
pub const RELINK_FILENAME: &str = "relink.fcpxml";
pub const SUMMARY_FILENAME: &str = "matches.csv";
pub const REPORT_FILENAME: &str = "match_report.txt";
pub const TEMP_FILE_SUFFIX: &str = "partial";

// ----- Input / config -----

pub const MANIFEST_EXTENSION: &str = "json";
pub const CONFIG_ENV_VAR: &str = "DITBRIDGE_CONFIG";
pub const CONFIG_FILENAME: &str = "config.json";
pub const APP_QUALIFIER: &str = "com";
pub const APP_ORGANIZATION: &str = "DIT Bridge";
pub const APP_NAME: &str = "dit-bridge";
