//! # Verification Reports
//!
//! Renders verification results for humans (one status line per file) and
//! machines (`--json`). Every per-file status is always reported; the
//! aggregate pass/fail decision is made by the caller from the same data.

use std::path::PathBuf;

use serde::Serialize;

use sello_protocol::manifest::FileOutcome;
use sello_protocol::verify::Verified;

/// One manifest entry's status.
#[derive(Debug, Serialize)]
pub struct FileReport {
    /// Root-relative path as listed in the manifest.
    pub path: String,
    /// `"ok"`, `"mismatch"`, or `"unreadable"`.
    pub status: &'static str,
    /// Failure detail, if any (I/O error text for unreadable files).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// The full verification report.
#[derive(Debug, Serialize)]
pub struct VerifyReport {
    /// Always `"valid"` when a report exists — an invalid signature never
    /// gets this far.
    pub signature: &'static str,
    /// Hex key number of the key that validated the signature.
    pub key: String,
    /// Source label of that key (file path or caller-chosen).
    pub source: String,
    /// Per-file outcomes, manifest order. Empty outside checksum mode.
    pub files: Vec<FileReport>,
    /// True when every listed file matched.
    pub ok: bool,
}

impl VerifyReport {
    /// Build a report from the engine's results.
    pub fn new(verified: &Verified, outcomes: &[(PathBuf, FileOutcome)]) -> Self {
        let files: Vec<FileReport> = outcomes
            .iter()
            .map(|(path, outcome)| FileReport {
                path: path.display().to_string(),
                status: match outcome {
                    FileOutcome::Match => "ok",
                    FileOutcome::Mismatch => "mismatch",
                    FileOutcome::Unreadable(_) => "unreadable",
                },
                detail: match outcome {
                    FileOutcome::Unreadable(reason) => Some(reason.clone()),
                    _ => None,
                },
            })
            .collect();
        let ok = outcomes.iter().all(|(_, o)| o.is_match());
        Self {
            signature: "valid",
            key: verified.keynum.clone(),
            source: verified.source.clone(),
            files,
            ok,
        }
    }

    /// Number of files that did not match.
    pub fn failed_count(&self) -> usize {
        self.files.iter().filter(|f| f.status != "ok").count()
    }

    /// Human-readable rendering, one line per file.
    pub fn render_text(&self) -> String {
        let mut out = format!("signature ok: key {} ({})\n", self.key, self.source);
        for file in &self.files {
            if file.status == "ok" {
                out.push_str(&format!("{}: OK\n", file.path));
            } else if let Some(detail) = &file.detail {
                out.push_str(&format!("{}: FAIL ({detail})\n", file.path));
            } else {
                out.push_str(&format!("{}: FAIL (checksum mismatch)\n", file.path));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verified() -> Verified {
        Verified {
            source: "alice.pub".into(),
            keynum: "00112233aabbccdd".into(),
        }
    }

    #[test]
    fn all_matching_is_ok() {
        let outcomes = vec![
            (PathBuf::from("f1"), FileOutcome::Match),
            (PathBuf::from("f2"), FileOutcome::Match),
        ];
        let report = VerifyReport::new(&verified(), &outcomes);
        assert!(report.ok);
        assert_eq!(report.failed_count(), 0);
        let text = report.render_text();
        assert!(text.contains("f1: OK"));
        assert!(text.contains("f2: OK"));
    }

    #[test]
    fn failures_are_counted_and_detailed() {
        let outcomes = vec![
            (PathBuf::from("f1"), FileOutcome::Mismatch),
            (
                PathBuf::from("f2"),
                FileOutcome::Unreadable("No such file or directory".into()),
            ),
        ];
        let report = VerifyReport::new(&verified(), &outcomes);
        assert!(!report.ok);
        assert_eq!(report.failed_count(), 2);
        let text = report.render_text();
        assert!(text.contains("f1: FAIL (checksum mismatch)"));
        assert!(text.contains("f2: FAIL (No such file or directory)"));
    }

    #[test]
    fn json_report_shape() {
        let outcomes = vec![(PathBuf::from("f1"), FileOutcome::Match)];
        let report = VerifyReport::new(&verified(), &outcomes);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["signature"], "valid");
        assert_eq!(json["ok"], true);
        assert_eq!(json["files"][0]["path"], "f1");
        assert_eq!(json["files"][0]["status"], "ok");
        // No detail key for clean entries.
        assert!(json["files"][0].get("detail").is_none());
    }
}
