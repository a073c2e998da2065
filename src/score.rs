use chrono::{DateTime, Local};
use directories::ProjectDirs;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreEntry {
    pub best: u32,
    pub recorded_at: DateTime<Local>,
}

/// Best score per player name. Only improvements are ever written.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HighScores {
    pub entries: HashMap<String, ScoreEntry>,
}

impl HighScores {
    pub fn best(&self, name: &str) -> Option<u32> {
        self.entries.get(name).map(|entry| entry.best)
    }

    /// Applies a finished game's score. Returns true when the entry was
    /// created or improved.
    pub fn apply(&mut self, name: &str, score: u32) -> bool {
        match self.entries.get(name) {
            Some(entry) if entry.best >= score => false,
            _ => {
                self.entries.insert(
                    name.to_string(),
                    ScoreEntry {
                        best: score,
                        recorded_at: Local::now(),
                    },
                );
                true
            }
        }
    }

    /// The top `n` entries, highest score first, ties broken by name.
    pub fn top(&self, n: usize) -> Vec<(String, u32)> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.clone(), entry.best))
            .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
            .take(n)
            .collect()
    }
}

/// JSON-backed score persistence, written through on every improvement.
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "kelime") {
            pd.data_local_dir().join("scores.json")
        } else {
            PathBuf::from("kelime_scores.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    /// Missing or corrupt storage is a first run, never an error.
    pub fn load(&self) -> HighScores {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(scores) = serde_json::from_slice::<HighScores>(&bytes) {
                return scores;
            }
        }
        HighScores::default()
    }

    pub fn save(&self, scores: &HighScores) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(scores).unwrap_or_default();
        fs::write(&self.path, data)
    }

    /// Updates `scores` with a finished game and persists when improved.
    pub fn record(
        &self,
        scores: &mut HighScores,
        name: &str,
        score: u32,
    ) -> std::io::Result<bool> {
        if scores.apply(name, score) {
            self.save(scores)?;
            return Ok(true);
        }
        Ok(false)
    }
}

impl Default for JsonScoreStore {
    fn default() -> Self {
        Self::new()
    }
}
