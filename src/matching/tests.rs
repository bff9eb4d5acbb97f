// Matcher tests: signal bands, threshold edges, tie-breaking, strategies

use super::*;
use crate::clip::ClipRecord;

fn monitor(name: &str) -> ClipRecord {
    ClipRecord::new(format!("{}_monitor.mov", name), format!("/monitor/{}_monitor.mov", name))
}

fn dit(name: &str) -> ClipRecord {
    ClipRecord::new(format!("{}.mxf", name), format!("/dit/{}.mxf", name))
}

fn ids(pairs: &[MatchedPair]) -> Vec<(String, String, f64)> {
    pairs
        .iter()
        .map(|p| (p.monitor_file.id.clone(), p.dit_file.id.clone(), p.match_confidence))
        .collect()
}

#[test]
fn test_all_signals_cap_at_one() {
    let m = monitor("A001")
        .with_duration(10.0)
        .with_timecode("01:00:00:00")
        .with_clip_name("A001")
        .with_extracted_text(["A001"]);
    let d = dit("A001")
        .with_duration(10.2)
        .with_timecode("01:00:00:00")
        .with_clip_name("A001");

    let breakdown = score_pair(&MatchConfig::default(), &m, &d);
    assert_eq!(breakdown.duration, 0.4);
    assert_eq!(breakdown.timecode, 0.3);
    assert_eq!(breakdown.clip_name, 0.3);
    assert_eq!(breakdown.extracted_text, 0.1);
    assert_eq!(breakdown.total, 1.0);
    assert_eq!(breakdown.signals.len(), 4);
}

#[test]
fn test_duration_timecode_name_pair_is_emitted() {
    let m = monitor("m").with_duration(10.0).with_timecode("01:00:00:00").with_clip_name("A001");
    let d = dit("d").with_duration(10.5).with_timecode("01:00:00:00").with_clip_name("A001");

    assert_eq!(confidence(&m, &d), 1.0);
    let pairs = match_clips(&[m.clone()], &[d.clone()]);
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].monitor_file, m);
    assert_eq!(pairs[0].dit_file, d);
    assert_eq!(pairs[0].match_confidence, 1.0);
}

#[test]
fn test_near_duration_alone_is_below_threshold() {
    let m = monitor("m").with_duration(10.0);
    let d = dit("d").with_duration(13.0);

    assert_eq!(confidence(&m, &d), 0.2);
    assert!(match_clips(&[m], &[d]).is_empty());
}

#[test]
fn test_duration_band_edges_are_strict() {
    let m = monitor("m").with_duration(20.0);

    // exactly 1.0s apart falls into the lower band
    assert_eq!(confidence(&m, &dit("d").with_duration(21.0)), 0.2);
    assert_eq!(confidence(&m, &dit("d").with_duration(20.999)), 0.4);
    // exactly 5.0s apart contributes nothing
    assert_eq!(confidence(&m, &dit("d").with_duration(25.0)), 0.0);
    assert_eq!(confidence(&m, &dit("d").with_duration(15.5)), 0.2);
}

#[test]
fn test_missing_durations_contribute_nothing() {
    let m = monitor("m").with_duration(10.0);
    assert_eq!(confidence(&m, &dit("d")), 0.0);
    assert_eq!(confidence(&monitor("m"), &dit("d").with_duration(10.0)), 0.0);
    assert_eq!(confidence(&monitor("m"), &dit("d")), 0.0);
}

#[test]
fn test_score_exactly_at_threshold_is_not_a_candidate() {
    // 0.4 + 0.3 sums to 0.7000000000000001 in f64; rounding keeps it at 0.7
    let m = monitor("m").with_duration(8.0).with_timecode("10:00:00:00");
    let d = dit("d").with_duration(8.0).with_timecode("10:00:00:00");
    assert_eq!(confidence(&m, &d), 0.7);
    assert!(match_clips(&[m], &[d]).is_empty());

    // 0.2 + 0.3 + 0.2 is also exactly the threshold
    let m = monitor("m").with_duration(8.0).with_timecode("TC").with_clip_name("A001");
    let d = dit("d").with_duration(10.0).with_timecode("TC").with_clip_name("A001C003");
    assert_eq!(confidence(&m, &d), 0.7);
    assert!(match_clips(&[m], &[d]).is_empty());
}

#[test]
fn test_just_above_threshold_is_emitted() {
    let m = monitor("m")
        .with_duration(8.0)
        .with_clip_name("A002")
        .with_extracted_text(["A002"]);
    let d = dit("A002C001").with_duration(8.3).with_clip_name("A002");

    let pairs = match_clips(&[m], &[d]);
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].match_confidence, 0.8);
}

#[test]
fn test_timecode_is_case_sensitive_and_exact() {
    let m = monitor("m").with_timecode("01:00:00;00");
    assert_eq!(confidence(&m, &dit("d").with_timecode("01:00:00;00")), 0.3);
    assert_eq!(confidence(&m, &dit("d").with_timecode("01:00:00:00")), 0.0);

    let m = monitor("m").with_timecode("tc-a");
    assert_eq!(confidence(&m, &dit("d").with_timecode("TC-A")), 0.0);
}

#[test]
fn test_clip_name_partial_either_direction() {
    let m = monitor("m").with_clip_name("A001");
    assert_eq!(confidence(&m, &dit("d").with_clip_name("A001C003")), 0.2);

    let m = monitor("m").with_clip_name("A001C003_230512");
    assert_eq!(confidence(&m, &dit("d").with_clip_name("A001C003")), 0.2);

    let m = monitor("m").with_clip_name("A001");
    assert_eq!(confidence(&m, &dit("d").with_clip_name("a001")), 0.0);
}

#[test]
fn test_empty_strings_do_not_score() {
    let m = monitor("m").with_timecode("").with_clip_name("").with_extracted_text([""]);
    let d = dit("d").with_timecode("").with_clip_name("A001");
    assert_eq!(confidence(&m, &d), 0.0);
}

#[test]
fn test_extracted_text_counts_once() {
    let m = monitor("m").with_extracted_text(["B", "001", "B001"]);
    let d = dit("B001");
    let breakdown = score_pair(&MatchConfig::default(), &m, &d);
    assert_eq!(breakdown.extracted_text, 0.1);
    assert_eq!(breakdown.total, 0.1);

    let m = monitor("m").with_extracted_text(["REC", "ISO 800"]);
    assert_eq!(confidence(&m, &dit("B001")), 0.0);
}

#[test]
fn test_confidence_stays_in_unit_interval() {
    let durations = [None, Some(0.0), Some(4.0), Some(100.0)];
    let names = [None, Some("A"), Some("AB")];
    let timecodes = [None, Some("X"), Some("Y")];

    for md in durations {
        for dd in durations {
            for mn in names {
                for dn in names {
                    for tc in timecodes {
                        let mut m = monitor("m").with_extracted_text(["d"]);
                        let mut d = dit("d");
                        m.duration = md;
                        d.duration = dd;
                        m.clip_name = mn.map(String::from);
                        d.clip_name = dn.map(String::from);
                        m.timecode = tc.map(String::from);
                        d.timecode = Some("X".to_string());
                        let c = confidence(&m, &d);
                        assert!((0.0..=1.0).contains(&c), "confidence {} out of range", c);
                    }
                }
            }
        }
    }
}

#[test]
fn test_strictly_higher_candidate_wins_regardless_of_order() {
    let m = monitor("m").with_duration(30.0).with_timecode("TC1").with_clip_name("A003");
    let weaker = dit("weaker").with_duration(32.0).with_timecode("TC1").with_clip_name("A003");
    let stronger = dit("stronger").with_duration(30.1).with_timecode("TC1").with_clip_name("A003");

    let pairs = match_clips(&[m], &[weaker, stronger.clone()]);
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].dit_file, stronger);
    assert_eq!(pairs[0].match_confidence, 1.0);
}

#[test]
fn test_equal_scores_keep_first_dit() {
    let m = monitor("m").with_duration(30.0).with_timecode("TC1").with_clip_name("A003");
    let first = dit("first").with_duration(30.2).with_timecode("TC1").with_clip_name("A003");
    let second = dit("second").with_duration(29.9).with_timecode("TC1").with_clip_name("A003");

    let pairs = match_clips(&[m.clone()], &[first.clone(), second.clone()]);
    assert_eq!(pairs[0].dit_file, first);

    let pairs = match_clips(&[m], &[second.clone(), first]);
    assert_eq!(pairs[0].dit_file, second);
}

#[test]
fn test_unmatched_monitors_are_skipped_in_order() {
    let m1 = monitor("m1").with_duration(10.0).with_timecode("T1").with_clip_name("A001");
    let m2 = monitor("m2").with_duration(99.0);
    let m3 = monitor("m3").with_duration(20.0).with_timecode("T3").with_clip_name("A003");
    let d1 = dit("d1").with_duration(10.0).with_timecode("T1").with_clip_name("A001");
    let d3 = dit("d3").with_duration(20.0).with_timecode("T3").with_clip_name("A003");

    let pairs = match_clips(&[m1.clone(), m2, m3.clone()], &[d3.clone(), d1.clone()]);
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].monitor_file, m1);
    assert_eq!(pairs[0].dit_file, d1);
    assert_eq!(pairs[1].monitor_file, m3);
    assert_eq!(pairs[1].dit_file, d3);
}

#[test]
fn test_empty_inputs_produce_no_pairs() {
    assert!(match_clips(&[], &[dit("d")]).is_empty());
    assert!(match_clips(&[monitor("m")], &[]).is_empty());
}

#[test]
fn test_matching_is_idempotent() {
    let monitors = vec![
        monitor("m1").with_duration(10.0).with_timecode("T1").with_clip_name("A001"),
        monitor("m2").with_duration(20.0).with_clip_name("A002").with_extracted_text(["A002"]),
    ];
    let dits = vec![
        dit("A002C001").with_duration(20.4).with_clip_name("A002"),
        dit("d1").with_duration(10.3).with_timecode("T1").with_clip_name("A001"),
    ];

    let first = match_clips(&monitors, &dits);
    let second = match_clips(&monitors, &dits);
    assert_eq!(first.len(), 2);
    assert_eq!(ids(&first), ids(&second));
}

#[test]
fn test_best_per_monitor_allows_shared_dit() {
    let m1 = monitor("m1").with_duration(10.0).with_clip_name("A001").with_extracted_text(["A001"]);
    let m2 = monitor("m2").with_duration(10.0).with_timecode("T").with_clip_name("A001");
    let d = dit("A001").with_duration(10.0).with_timecode("T").with_clip_name("A001");

    let pairs = match_clips(&[m1, m2], &[d.clone()]);
    assert_eq!(pairs.len(), 2);
    assert!(pairs.iter().all(|p| p.dit_file == d));
}

#[test]
fn test_exclusive_strategy_gives_dit_to_highest_score() {
    let m1 = monitor("m1").with_duration(10.0).with_clip_name("A001").with_extracted_text(["A001"]);
    let m2 = monitor("m2").with_duration(10.0).with_timecode("T").with_clip_name("A001");
    let shared = dit("A001").with_duration(10.0).with_timecode("T").with_clip_name("A001");
    let fallback = dit("A001_alt").with_duration(10.5).with_clip_name("A001");

    let matcher = Matcher::new(MatchConfig {
        strategy: AssignmentStrategy::Exclusive,
        ..MatchConfig::default()
    });
    let pairs = matcher.match_clips(&[m1.clone(), m2.clone()], &[shared.clone(), fallback.clone()]);

    assert_eq!(pairs.len(), 2);
    // output still follows monitor order
    assert_eq!(pairs[0].monitor_file, m1);
    assert_eq!(pairs[0].dit_file, fallback);
    assert_eq!(pairs[0].match_confidence, 0.8);
    assert_eq!(pairs[1].monitor_file, m2);
    assert_eq!(pairs[1].dit_file, shared);
    assert_eq!(pairs[1].match_confidence, 1.0);
}

#[test]
fn test_exclusive_strategy_drops_monitor_without_free_dit() {
    let m1 = monitor("m1").with_duration(10.0).with_timecode("T").with_clip_name("A001");
    let m2 = monitor("m2").with_duration(10.0).with_timecode("T").with_clip_name("A001");
    let d = dit("d").with_duration(10.0).with_timecode("T").with_clip_name("A001");

    let matcher = Matcher::new(MatchConfig {
        strategy: AssignmentStrategy::Exclusive,
        ..MatchConfig::default()
    });
    let pairs = matcher.match_clips(&[m1.clone(), m2], &[d]);
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].monitor_file, m1);
}

#[test]
fn test_candidates_report_every_dit() {
    let m = monitor("m").with_duration(10.0).with_timecode("T").with_clip_name("A001");
    let dits = [
        dit("a").with_duration(10.0).with_timecode("T").with_clip_name("A001"),
        dit("b").with_duration(12.0),
    ];

    let candidates = Matcher::default().candidates(&m, &dits);
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].dit_index, 0);
    assert!(candidates[0].above_threshold);
    assert_eq!(candidates[1].breakdown.total, 0.2);
    assert!(!candidates[1].above_threshold);
    assert_eq!(candidates[1].breakdown.signals, vec![S_DURATION_NEAR.to_string()]);
}

#[test]
fn test_custom_threshold_is_respected() {
    let m = monitor("m").with_duration(10.0).with_timecode("T");
    let d = dit("d").with_duration(10.0).with_timecode("T");

    let lenient = Matcher::new(MatchConfig { threshold: 0.5, ..MatchConfig::default() });
    assert_eq!(lenient.match_clips(&[m.clone()], &[d.clone()]).len(), 1);
    assert!(Matcher::default().match_clips(&[m], &[d]).is_empty());
}

#[test]
fn test_config_validation() {
    assert!(MatchConfig::default().validate().is_ok());

    let bad = MatchConfig { timecode_weight: -0.1, ..MatchConfig::default() };
    assert!(matches!(bad.validate(), Err(BridgeError::Config(_))));

    let bad = MatchConfig { threshold: 1.5, ..MatchConfig::default() };
    assert!(bad.validate().is_err());

    let bad = MatchConfig { duration_close_secs: 6.0, ..MatchConfig::default() };
    assert!(bad.validate().is_err());
}

#[test]
fn test_round_score_removes_float_noise() {
    assert_eq!(round_score(0.4 + 0.3), 0.7);
    assert_eq!(round_score(0.4 + 0.3 + 0.1), 0.8);
    assert_eq!(round_score(0.2 + 0.3 + 0.3), 0.8);
}
