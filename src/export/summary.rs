// CSV summary exporter
// Header row, then one row per pair: monitor filename, DIT filename, confidence.

use std::path::{Path, PathBuf};
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::clip::MatchedPair;
use crate::constants::CSV_HEADER;
use crate::error::{BridgeError, Result};
use super::{ensure_not_empty, write_artifact};

/// Render the summary table. Filenames are quoted, confidence is a bare decimal.
pub fn render_summary(pairs: &[MatchedPair]) -> Result<String> {
    ensure_not_empty(pairs)?;

    let mut out: Vec<u8> = Vec::new();

    {
        let mut header = WriterBuilder::new()
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(&mut out);
        header.write_record(CSV_HEADER)?;
        header.flush()?;
    }

    for pair in pairs {
        // Filenames always quoted; the ',' terminator leaves room for the bare confidence
        {
            let mut names = WriterBuilder::new()
                .quote_style(QuoteStyle::Always)
                .terminator(Terminator::Any(b','))
                .from_writer(&mut out);
            names.write_record([
                pair.monitor_file.filename.as_str(),
                pair.dit_file.filename.as_str(),
            ])?;
            names.flush()?;
        }
        out.extend_from_slice(format!("{}\n", pair.match_confidence).as_bytes());
    }

    String::from_utf8(out).map_err(|e| BridgeError::Other(format!("Summary is not UTF-8: {}", e)))
}

/// Write the summary table to `dest`
pub fn export_summary(pairs: &[MatchedPair], dest: &Path) -> Result<PathBuf> {
    let table = render_summary(pairs)?;
    let path = write_artifact(dest, table.as_bytes())?;

    log::info!("Wrote summary of {} pairs to {}", pairs.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use crate::clip::ClipRecord;
    use crate::export::test_support::sample_pairs;

    #[test]
    fn test_header_and_rows() {
        let table = render_summary(&sample_pairs()).unwrap();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Monitor File,DIT File,Match Confidence");
        assert_eq!(lines[1], "\"A001_monitor.mov\",\"A001C003.mxf\",1");
        assert_eq!(lines[2], "\"B002_monitor.mov\",\"B002C001.mxf\",0.8");
    }

    #[test]
    fn test_comma_filename_round_trips() {
        let monitor = ClipRecord::new("Day 1, Take 2.mov", "/monitor/day1.mov");
        let dit = ClipRecord::new("A003C001.mxf", "/dit/A003C001.mxf");
        let pairs = vec![MatchedPair::new(monitor, dit, 0.9)];

        let table = render_summary(&pairs).unwrap();
        assert!(table.contains("\"Day 1, Take 2.mov\""));

        let mut reader = csv::Reader::from_reader(table.as_bytes());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers, vec!["Monitor File", "DIT File", "Match Confidence"]);

        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(&records[0][0], "Day 1, Take 2.mov");
        assert_eq!(&records[0][1], "A003C001.mxf");
        assert_eq!(records[0][2].parse::<f64>().unwrap(), 0.9);
    }

    #[test]
    fn test_numeric_filenames_are_quoted() {
        let monitor = ClipRecord::new("0042", "/monitor/0042");
        let dit = ClipRecord::new("20240512.0931", "/dit/20240512.0931");
        let table = render_summary(&[MatchedPair::new(monitor, dit, 0.9)]).unwrap();

        assert_eq!(table.lines().nth(1), Some("\"0042\",\"20240512.0931\",0.9"));

        let mut reader = csv::Reader::from_reader(table.as_bytes());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[0], "0042");
        assert_eq!(&record[1], "20240512.0931");
    }

    #[test]
    fn test_quote_in_filename_round_trips() {
        let monitor = ClipRecord::new("The \"Good\" Take.mov", "/m.mov");
        let dit = ClipRecord::new("d.mxf", "/d.mxf");
        let table = render_summary(&[MatchedPair::new(monitor, dit, 0.75)]).unwrap();

        let mut reader = csv::Reader::from_reader(table.as_bytes());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[0], "The \"Good\" Take.mov");
    }

    #[test]
    fn test_empty_pairs_is_no_matches() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("matches.csv");

        let err = export_summary(&[], &dest).unwrap_err();
        assert!(matches!(err, BridgeError::NoMatches));
        assert!(!dest.exists());
    }

    #[test]
    fn test_write_error_is_io() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("missing").join("matches.csv");

        let err = export_summary(&sample_pairs(), &dest).unwrap_err();
        assert!(matches!(err, BridgeError::Io(_)));
    }
}
