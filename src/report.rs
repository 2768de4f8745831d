//! JSON reporting for the CLI. Not part of the detection core, but shipped
//! as real code, the way `models::output` ships its own JSON envelope
//! around the scanner core.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::license_detection::LicenseMatch;

/// Output format version, bumped whenever the JSON shape changes in a way
/// that would break a consumer parsing it structurally.
pub const OUTPUT_FORMAT_VERSION: &str = "1.0.0";

/// One scanned file's worth of detections.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub matches: Vec<MatchReport>,
}

/// A single `LicenseMatch`, flattened to the fields worth reporting.
#[derive(Debug, Serialize)]
pub struct MatchReport {
    pub identifier: String,
    pub confidence: f32,
    pub start: usize,
    pub end: usize,
}

impl From<&LicenseMatch> for MatchReport {
    fn from(m: &LicenseMatch) -> MatchReport {
        MatchReport {
            identifier: m.identifier.clone(),
            confidence: m.confidence,
            start: m.start,
            end: m.end,
        }
    }
}

/// Top-level envelope emitted by the CLI: one header plus one entry per
/// scanned file.
#[derive(Debug, Serialize)]
pub struct Report {
    pub header: ReportHeader,
    pub files: Vec<FileReport>,
}

#[derive(Debug, Serialize)]
pub struct ReportHeader {
    pub start_timestamp: String,
    pub end_timestamp: String,
    pub duration_seconds: f64,
    pub output_format_version: String,
    pub threshold: f32,
    pub corpus_size: usize,
}

impl ReportHeader {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, threshold: f32, corpus_size: usize) -> ReportHeader {
        let duration_seconds = (end - start).num_nanoseconds().unwrap_or(0) as f64 / 1_000_000_000.0;
        ReportHeader {
            start_timestamp: start.to_rfc3339(),
            end_timestamp: end.to_rfc3339(),
            duration_seconds,
            output_format_version: OUTPUT_FORMAT_VERSION.to_string(),
            threshold,
            corpus_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_report_copies_identifier_confidence_and_span() {
        let m = LicenseMatch {
            identifier: "MIT".to_string(),
            tokens: Vec::new(),
            confidence: 0.97,
            diffs: Vec::new(),
            diff_range: 0..0,
            tokens_claimed: 10,
            token_range: 0..10,
            start: 5,
            end: 120,
        };
        let report = MatchReport::from(&m);
        assert_eq!(report.identifier, "MIT");
        assert_eq!(report.start, 5);
        assert_eq!(report.end, 120);
    }

    #[test]
    fn report_serialises_to_json() {
        let header = ReportHeader::new(Utc::now(), Utc::now(), 0.9, 3);
        let report = Report {
            header,
            files: vec![FileReport {
                path: PathBuf::from("LICENSE"),
                matches: Vec::new(),
            }],
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"output_format_version\""));
        assert!(json.contains("LICENSE"));
    }
}
