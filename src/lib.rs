// DIT Bridge - Library Entry Point
// Matches monitor proxy clips to DIT camera originals and exports a relink
// bridge (FCPXML), a CSV summary and a narrative report.

pub mod constants;
pub mod error;
pub mod clip;
pub mod matching;
pub mod export;
pub mod manifest;
pub mod config;
pub mod logging;

pub use clip::{ClipRecord, MatchedPair};
pub use error::{BridgeError, Result};
pub use export::{export_all, ExportConfig, ExportFormat};
pub use matching::{match_clips, AssignmentStrategy, MatchConfig, Matcher};
