//! History storage and export.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::record::DivinationRecord;
use crate::error::SessionResult;

/// A chronological log of divinations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    records: Vec<DivinationRecord>,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a history file. A missing file is an empty history.
    pub fn load(path: &Path) -> SessionResult<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write the history to a file, creating parent directories.
    ///
    /// The file is replaced through a temporary sibling and a rename, so
    /// an interrupted save leaves the previous history intact.
    pub fn save(&self, path: &Path) -> SessionResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(self)?)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Append a record.
    pub fn append(&mut self, record: DivinationRecord) {
        self.records.push(record);
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[DivinationRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Export the history as markdown.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Divination History\n\n");
        for record in &self.records {
            out.push_str(&format!(
                "## {}: {}\n\n",
                record.date.format("%Y-%m-%d %H:%M"),
                record.question
            ));
            out.push_str(&format!("**Hexagram**: {}\n", record.summary()));
            out.push_str(&format!("**Lines**: {}\n", record.casting.sum_signature()));
            let moving = record.casting.moving_lines_description();
            if !moving.is_empty() {
                out.push_str(&format!("**Moving lines**: {moving}\n"));
            }
            if let Some(reading) = &record.interpretation {
                out.push_str(&format!("\n> {}\n", reading.concrete_strategy));
                out.push_str(&format!("\n{}\n", reading.master_quotes.summary));
            }
            out.push('\n');
        }
        out
    }

    /// Export the history as plain text.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Divination History\n==================\n\n");
        for record in &self.records {
            out.push_str(&format!(
                "[{}] {}\n",
                record.date.format("%Y-%m-%d %H:%M"),
                record.question
            ));
            out.push_str(&format!("  Hexagram: {}\n", record.summary()));
            out.push_str(&format!("  Lines: {}\n", record.casting.sum_signature()));
            if let Some(reading) = &record.interpretation {
                out.push_str(&format!("  Strategy: {}\n", reading.concrete_strategy));
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;
    use uuid::Uuid;
    use yj_core::Casting;
    use yj_core::LineValue::{OldYang, OldYin, YoungYang, YoungYin};

    use crate::error::SessionError;
    use crate::interpretation::{Interpretation, StructuredReply};

    fn sample(interpretation: Option<Interpretation>) -> DivinationRecord {
        DivinationRecord {
            id: Uuid::new_v4(),
            date: Utc::now(),
            question: "近期事业发展".into(),
            casting: Casting::from_values([YoungYang, YoungYin, OldYang, YoungYang, YoungYin, OldYin]),
            primary: 51,
            relating: Some(30),
            interpretation,
        }
    }

    #[test]
    fn empty_history() {
        let h = History::new();
        assert!(h.is_empty());
        assert_eq!(h.len(), 0);
    }

    #[test]
    fn export_markdown_divination() {
        let mut h = History::new();
        h.append(sample(Some(Interpretation::fallback())));
        let md = h.export_markdown();
        assert!(md.starts_with("# Divination History"));
        assert!(md.contains("近期事业发展"));
        assert!(md.contains("**Hexagram**: #51 震 → #30 离"));
        assert!(md.contains("**Lines**: 789786"));
        assert!(md.contains("**Moving lines**: 三爻动 (老阳)，上爻动 (老阴)"));
        assert!(md.contains(&Interpretation::fallback().concrete_strategy));
    }

    #[test]
    fn export_text_without_interpretation() {
        let mut h = History::new();
        h.append(sample(None));
        let text = h.export_text();
        assert!(text.contains("Hexagram: #51 震 → #30 离"));
        assert!(!text.contains("Strategy:"));
    }

    #[test]
    fn save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        let mut h = History::new();
        h.append(sample(None));
        h.save(&path).unwrap();

        let loaded = History::load(&path).unwrap();
        assert_eq!(loaded.records(), h.records());
    }

    #[test]
    fn save_replaces_previous_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        let mut h = History::new();
        h.append(sample(None));
        h.save(&path).unwrap();
        h.append(sample(None));
        h.save(&path).unwrap();

        assert_eq!(History::load(&path).unwrap().len(), 2);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn load_damaged_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, r#"{"records": ["#).unwrap();
        assert!(matches!(History::load(&path), Err(SessionError::Format(_))));
    }

    #[test]
    fn load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let loaded = History::load(&dir.path().join("nope.json")).unwrap();
        assert!(loaded.is_empty());
    }
}
