use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Key the best score is stored under.
pub(crate) const HIGH_SCORE_KEY: &str = "blockfit.high_score";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub(crate) struct HighScoreRecord {
    pub(crate) score: usize,
    pub(crate) recorded_at: DateTime<Utc>,
}

/// JSON key-value file holding the best score between runs.
///
/// Other keys in the file are left untouched when the score is saved.
#[derive(Debug, Clone)]
pub(crate) struct HighScoreStore {
    path: PathBuf,
}

type Entries = BTreeMap<String, serde_json::Value>;

impl HighScoreStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored best score, or 0 if none was saved yet.
    pub(crate) fn load(&self) -> anyhow::Result<usize> {
        let entries = self.read_entries()?;
        let Some(value) = entries.get(HIGH_SCORE_KEY) else {
            return Ok(0);
        };
        let record: HighScoreRecord = serde_json::from_value(value.clone()).with_context(|| {
            format!(
                "Failed to parse {HIGH_SCORE_KEY} in {}",
                self.path.display()
            )
        })?;
        Ok(record.score)
    }

    pub(crate) fn save(&self, score: usize) -> anyhow::Result<()> {
        let mut entries = self.read_entries()?;
        let record = HighScoreRecord {
            score,
            recorded_at: Utc::now(),
        };
        entries.insert(
            HIGH_SCORE_KEY.to_owned(),
            serde_json::to_value(record).context("Failed to serialize high score")?,
        );

        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
        let file = File::create(&self.path)
            .with_context(|| format!("Failed to create {}", self.path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &entries)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        writeln!(writer)
            .and_then(|()| writer.flush())
            .with_context(|| format!("Failed to flush {}", self.path.display()))?;
        log::info!("saved high score {score} to {}", self.path.display());
        Ok(())
    }

    fn read_entries(&self) -> anyhow::Result<Entries> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to open {}", self.path.display()));
            }
        };
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("blockfit-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_missing_file_is_zero() {
        let store = HighScoreStore::new(temp_path("missing.json"));
        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("saved.json");
        let store = HighScoreStore::new(&path);
        store.save(1500).unwrap();
        assert_eq!(store.load().unwrap(), 1500);
        store.save(2100).unwrap();
        assert_eq!(store.load().unwrap(), 2100);

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"blockfit.high_score\""));
        assert!(text.contains("\"recorded_at\""));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_other_keys_are_kept() {
        let path = temp_path("shared.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"settings.volume": 3}"#).unwrap();

        let store = HighScoreStore::new(&path);
        assert_eq!(store.load().unwrap(), 0);
        store.save(300).unwrap();

        let entries: Entries = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(entries["settings.volume"], serde_json::json!(3));
        assert_eq!(entries[HIGH_SCORE_KEY]["score"], serde_json::json!(300));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_broken_file_is_an_error() {
        let path = temp_path("broken.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();
        let err = HighScoreStore::new(&path).load().unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
        fs::remove_file(path).unwrap();
    }
}
