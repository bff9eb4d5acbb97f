// Monitor-to-DIT clip matching
// Every monitor record is scored against every DIT record with independent
// weak signals (duration, timecode, clip name, extracted text). The best
// candidate strictly above the threshold wins; records without one are skipped.

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

use crate::clip::{ClipRecord, MatchedPair};
use crate::constants::{
    DURATION_CLOSE_SECS, DURATION_NEAR_SECS, MATCH_THRESHOLD, MAX_CONFIDENCE, SCORE_DECIMALS,
    S_CLIP_NAME_EXACT, S_CLIP_NAME_PARTIAL, S_DURATION_CLOSE, S_DURATION_NEAR, S_EXTRACTED_TEXT,
    S_TIMECODE, WEIGHT_CLIP_NAME_EXACT, WEIGHT_CLIP_NAME_PARTIAL, WEIGHT_DURATION_CLOSE,
    WEIGHT_DURATION_NEAR, WEIGHT_EXTRACTED_TEXT, WEIGHT_TIMECODE,
};
use crate::error::{BridgeError, Result};

/// How candidates are turned into pairs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssignmentStrategy {
    /// Independent best match per monitor record. A DIT record may be the
    /// best match for several monitor records.
    #[default]
    BestPerMonitor,
    /// Greedy by descending score with each DIT record used at most once.
    Exclusive,
}

/// Signal weights, duration bands and threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchConfig {
    pub duration_close_secs: f64,
    pub duration_near_secs: f64,
    pub duration_close_weight: f64,
    pub duration_near_weight: f64,
    pub timecode_weight: f64,
    pub clip_name_exact_weight: f64,
    pub clip_name_partial_weight: f64,
    pub extracted_text_weight: f64,
    pub threshold: f64,
    pub strategy: AssignmentStrategy,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            duration_close_secs: DURATION_CLOSE_SECS,
            duration_near_secs: DURATION_NEAR_SECS,
            duration_close_weight: WEIGHT_DURATION_CLOSE,
            duration_near_weight: WEIGHT_DURATION_NEAR,
            timecode_weight: WEIGHT_TIMECODE,
            clip_name_exact_weight: WEIGHT_CLIP_NAME_EXACT,
            clip_name_partial_weight: WEIGHT_CLIP_NAME_PARTIAL,
            extracted_text_weight: WEIGHT_EXTRACTED_TEXT,
            threshold: MATCH_THRESHOLD,
            strategy: AssignmentStrategy::BestPerMonitor,
        }
    }
}

impl MatchConfig {
    /// Reject weights and bands that would break the [0, 1] score contract
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("durationCloseWeight", self.duration_close_weight),
            ("durationNearWeight", self.duration_near_weight),
            ("timecodeWeight", self.timecode_weight),
            ("clipNameExactWeight", self.clip_name_exact_weight),
            ("clipNamePartialWeight", self.clip_name_partial_weight),
            ("extractedTextWeight", self.extracted_text_weight),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(BridgeError::Config(format!("{} must be a non-negative number, got {}", name, value)));
            }
        }
        if !(0.0..=MAX_CONFIDENCE).contains(&self.threshold) {
            return Err(BridgeError::Config(format!("threshold must be within [0, 1], got {}", self.threshold)));
        }
        if !(self.duration_close_secs > 0.0) || !(self.duration_near_secs >= self.duration_close_secs) {
            return Err(BridgeError::Config(format!(
                "duration bands must satisfy 0 < close ({}) <= near ({})",
                self.duration_close_secs, self.duration_near_secs
            )));
        }
        Ok(())
    }
}

/// Per-signal contributions for one (monitor, dit) pair
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub duration: f64,
    pub timecode: f64,
    pub clip_name: f64,
    pub extracted_text: f64,
    /// Rounded sum, capped at 1.0
    pub total: f64,
    pub signals: Vec<String>,
}

/// One scored DIT record for a given monitor record (audit view)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCandidate {
    pub dit_index: usize,
    pub dit_id: String,
    pub dit_filename: String,
    pub breakdown: ScoreBreakdown,
    pub above_threshold: bool,
}

/// Round away float noise so 0.4 + 0.3 compares equal to 0.7
pub(crate) fn round_score(value: f64) -> f64 {
    let factor = 10f64.powi(SCORE_DECIMALS);
    (value * factor).round() / factor
}

/// Score a (monitor, dit) pair signal by signal
pub fn score_pair(config: &MatchConfig, monitor: &ClipRecord, dit: &ClipRecord) -> ScoreBreakdown {
    let mut breakdown = ScoreBreakdown::default();

    // Duration: strict `<` on both bands
    if let (Some(a), Some(b)) = (monitor.duration, dit.duration) {
        let diff = (a - b).abs();
        if diff < config.duration_close_secs {
            breakdown.duration = config.duration_close_weight;
            breakdown.signals.push(S_DURATION_CLOSE.to_string());
        } else if diff < config.duration_near_secs {
            breakdown.duration = config.duration_near_weight;
            breakdown.signals.push(S_DURATION_NEAR.to_string());
        }
    }

    // Timecode: opaque, case-sensitive equality
    if let (Some(a), Some(b)) = (monitor.timecode(), dit.timecode()) {
        if a == b {
            breakdown.timecode = config.timecode_weight;
            breakdown.signals.push(S_TIMECODE.to_string());
        }
    }

    // Clip name: exact, else containment either way
    if let (Some(a), Some(b)) = (monitor.clip_name(), dit.clip_name()) {
        if a == b {
            breakdown.clip_name = config.clip_name_exact_weight;
            breakdown.signals.push(S_CLIP_NAME_EXACT.to_string());
        } else if a.contains(b) || b.contains(a) {
            breakdown.clip_name = config.clip_name_partial_weight;
            breakdown.signals.push(S_CLIP_NAME_PARTIAL.to_string());
        }
    }

    // Extracted text: first monitor fragment found in the DIT filename
    if monitor
        .extracted_text
        .iter()
        .any(|text| !text.is_empty() && dit.filename.contains(text.as_str()))
    {
        breakdown.extracted_text = config.extracted_text_weight;
        breakdown.signals.push(S_EXTRACTED_TEXT.to_string());
    }

    let sum = breakdown.duration + breakdown.timecode + breakdown.clip_name + breakdown.extracted_text;
    breakdown.total = round_score(sum).min(MAX_CONFIDENCE);
    breakdown
}

/// Confidence for a pair under the default weights
pub fn confidence(monitor: &ClipRecord, dit: &ClipRecord) -> f64 {
    score_pair(&MatchConfig::default(), monitor, dit).total
}

/// Matching engine. Holds only configuration; every call is pure.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    config: MatchConfig,
}

impl Matcher {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    fn qualifies(&self, score: f64) -> bool {
        score > self.config.threshold
    }

    /// Score every DIT record against one monitor record, in DIT order
    pub fn candidates(&self, monitor: &ClipRecord, dits: &[ClipRecord]) -> Vec<MatchCandidate> {
        dits.iter()
            .enumerate()
            .map(|(dit_index, dit)| {
                let breakdown = score_pair(&self.config, monitor, dit);
                let above_threshold = self.qualifies(breakdown.total);
                MatchCandidate {
                    dit_index,
                    dit_id: dit.id.clone(),
                    dit_filename: dit.filename.clone(),
                    breakdown,
                    above_threshold,
                }
            })
            .collect()
    }

    /// Best qualifying DIT for one monitor record. Ties keep the earliest DIT.
    pub fn best_candidate(&self, monitor: &ClipRecord, dits: &[ClipRecord]) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;

        for (index, dit) in dits.iter().enumerate() {
            let score = score_pair(&self.config, monitor, dit).total;
            log::debug!("score {} vs {} = {:.3}", monitor.filename, dit.filename, score);

            if !self.qualifies(score) {
                continue;
            }
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((index, score));
            }
        }

        best
    }

    /// Pair monitor records with DIT records. Output follows monitor order.
    pub fn match_clips(&self, monitors: &[ClipRecord], dits: &[ClipRecord]) -> Vec<MatchedPair> {
        let pairs = match self.config.strategy {
            AssignmentStrategy::BestPerMonitor => self.match_best_per_monitor(monitors, dits),
            AssignmentStrategy::Exclusive => self.match_exclusive(monitors, dits),
        };

        log::info!(
            "Matched {} of {} monitor clips against {} DIT clips ({:?})",
            pairs.len(),
            monitors.len(),
            dits.len(),
            self.config.strategy
        );
        pairs
    }

    fn match_best_per_monitor(&self, monitors: &[ClipRecord], dits: &[ClipRecord]) -> Vec<MatchedPair> {
        monitors
            .iter()
            .filter_map(|monitor| {
                let found = self.best_candidate(monitor, dits);
                if found.is_none() {
                    log::debug!("No DIT match above threshold for {}", monitor.filename);
                }
                found.map(|(index, score)| MatchedPair::new(monitor.clone(), dits[index].clone(), score))
            })
            .collect()
    }

    fn match_exclusive(&self, monitors: &[ClipRecord], dits: &[ClipRecord]) -> Vec<MatchedPair> {
        // (monitor index, dit index, score) for every qualifying pair
        let mut scored: Vec<(usize, usize, f64)> = Vec::new();
        for (mi, monitor) in monitors.iter().enumerate() {
            for (di, dit) in dits.iter().enumerate() {
                let score = score_pair(&self.config, monitor, dit).total;
                if self.qualifies(score) {
                    scored.push((mi, di, score));
                }
            }
        }

        // Stable sort keeps (monitor, dit) scan order among equal scores
        scored.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));

        let mut monitor_taken = vec![None; monitors.len()];
        let mut dit_taken = vec![false; dits.len()];
        for (mi, di, score) in scored {
            if monitor_taken[mi].is_some() || dit_taken[di] {
                continue;
            }
            monitor_taken[mi] = Some((di, score));
            dit_taken[di] = true;
        }

        monitor_taken
            .into_iter()
            .enumerate()
            .filter_map(|(mi, slot)| {
                slot.map(|(di, score)| MatchedPair::new(monitors[mi].clone(), dits[di].clone(), score))
            })
            .collect()
    }
}

/// Match with the default weights and per-monitor best-match assignment
pub fn match_clips(monitors: &[ClipRecord], dits: &[ClipRecord]) -> Vec<MatchedPair> {
    Matcher::default().match_clips(monitors, dits)
}
