/// Conversion log
///
/// Every file handled in a batch is recorded with:
/// - Timestamp
/// - Source path
/// - Outcome (converted / failed / not attempted)
/// - Files written
/// - Notices or the error that stopped the conversion
///
/// The log can be exported as human-readable text or JSON.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

/// What happened to one input file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Converted,
    Failed,
    NotAttempted,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Converted => write!(f, "converted"),
            Outcome::Failed => write!(f, "FAILED"),
            Outcome::NotAttempted => write!(f, "not attempted"),
        }
    }
}

/// A single log entry representing one input file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Sequential number (1-based, input order)
    pub sequence: usize,
    pub timestamp: DateTime<Local>,
    pub source: String,
    pub outcome: Outcome,
    /// Output files written for this source
    pub outputs: Vec<String>,
    /// Skip notices on success, the error message on failure
    pub detail: String,
}

impl LogEntry {
    /// Format as human-readable text lines
    pub fn to_text(&self) -> String {
        let mut out = format!(
            "[{:03}] {} | {} | {}",
            self.sequence,
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.outcome,
            self.source
        );
        for o in &self.outputs {
            out.push_str(&format!("\n      -> {}", o));
        }
        if !self.detail.is_empty() {
            out.push_str(&format!("\n      {}", self.detail));
        }
        out
    }
}

/// The conversion log of one batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionLog {
    pub session_id: String,
    pub session_start: DateTime<Local>,
    pub software_version: String,
    pub entries: Vec<LogEntry>,
}

impl ConversionLog {
    pub fn new() -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            session_start: Local::now(),
            software_version: env!("CARGO_PKG_VERSION").to_string(),
            entries: Vec::new(),
        }
    }

    /// Add one file to the log
    pub fn record(&mut self, source: &Path, outcome: Outcome, outputs: &[String], detail: &str) {
        let seq = self.entries.len() + 1;
        self.entries.push(LogEntry {
            sequence: seq,
            timestamp: Local::now(),
            source: source.display().to_string(),
            outcome,
            outputs: outputs.to_vec(),
            detail: detail.to_string(),
        });
        log::debug!("[LOG {:03}] {} {}", seq, outcome, source.display());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries with the given outcome
    pub fn count(&self, outcome: Outcome) -> usize {
        self.entries.iter().filter(|e| e.outcome == outcome).count()
    }

    /// Export as human-readable text
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("═══════════════════════════════════════════════════════════════\n");
        out.push_str("  VNA Trace Conversion Log\n");
        out.push_str("═══════════════════════════════════════════════════════════════\n");
        out.push_str(&format!("  Session ID:  {}\n", self.session_id));
        out.push_str(&format!(
            "  Started:     {}\n",
            self.session_start.format("%Y-%m-%d %H:%M:%S")
        ));
        out.push_str(&format!("  Software:    vna-trace v{}\n", self.software_version));
        out.push_str(&format!(
            "  Files:       {} ({} converted, {} failed, {} not attempted)\n",
            self.entries.len(),
            self.count(Outcome::Converted),
            self.count(Outcome::Failed),
            self.count(Outcome::NotAttempted)
        ));
        out.push_str("───────────────────────────────────────────────────────────────\n\n");

        for entry in &self.entries {
            out.push_str(&entry.to_text());
            out.push_str("\n\n");
        }
        out
    }

    /// Export as JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("JSON error: {}", e))
    }

    /// Save as JSON when `path` ends in `.json`, as text otherwise
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let is_json = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json {
            std::fs::write(path, self.to_json())
        } else {
            std::fs::write(path, self.to_text())
        }
    }
}

impl Default for ConversionLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_creation_and_entries() {
        let mut log = ConversionLog::new();
        assert!(log.is_empty());

        log.record(Path::new("a.trs"), Outcome::Converted, &["a.csv".into()], "");
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries[0].sequence, 1);

        log.record(Path::new("b.trs"), Outcome::Failed, &[], "line 3: bad");
        assert_eq!(log.entries[1].sequence, 2);
        assert_eq!(log.count(Outcome::Failed), 1);
    }

    #[test]
    fn test_text_export() {
        let mut log = ConversionLog::new();
        log.record(Path::new("a.trs"), Outcome::Converted, &["out/a.csv".into()], "");
        log.record(Path::new("b.trs"), Outcome::Failed, &[], "line 3: bad");
        let text = log.to_text();
        assert!(text.contains("1 converted, 1 failed"));
        assert!(text.contains("-> out/a.csv"));
        assert!(text.contains("FAILED | b.trs"));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut log = ConversionLog::new();
        log.record(Path::new("a.trs"), Outcome::NotAttempted, &[], "");
        let parsed: ConversionLog = serde_json::from_str(&log.to_json()).unwrap();
        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(parsed.entries[0].outcome, Outcome::NotAttempted);
        assert_eq!(parsed.session_id, log.session_id);
    }

    #[test]
    fn test_save_picks_format() {
        let dir = tempfile::tempdir().unwrap();
        let log = ConversionLog::new();
        log.save(&dir.path().join("run.json")).unwrap();
        log.save(&dir.path().join("run.txt")).unwrap();
        let json = std::fs::read_to_string(dir.path().join("run.json")).unwrap();
        assert!(json.trim_start().starts_with('{'));
        let text = std::fs::read_to_string(dir.path().join("run.txt")).unwrap();
        assert!(text.contains("Conversion Log"));
    }
}
