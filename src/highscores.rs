//! High score ledger
//!
//! Host-side only: the engine never reads or writes it. Persisted to
//! LocalStorage in the browser, kept in memory natively. Tracks the best
//! score plus the top 10 runs.

use serde::{Deserialize, Serialize};

/// Maximum number of runs to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    /// Sorted descending by score
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "runnerx-highscore";

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Best score so far (0 when empty)
    pub fn best(&self) -> u32 {
        self.entries.first().map(|e| e.score).unwrap_or(0)
    }

    /// Would this score beat the current best?
    pub fn is_new_record(&self, score: u32) -> bool {
        score > self.best()
    }

    /// Check if a score qualifies for the ledger
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Record a finished run. Returns the rank achieved (1-indexed) or None
    /// if it didn't qualify.
    pub fn add_score(&mut self, score: u32, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry { score, timestamp };
        let rank = match self.entries.iter().position(|e| score > e.score) {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse a stored ledger. A bare integer (the best score alone) is
    /// accepted too.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        if let Ok(best) = json.trim().parse::<u32>() {
            let mut scores = Self::new();
            scores.add_score(best, 0.0);
            return Ok(scores);
        }
        serde_json::from_str(json)
    }

    /// Load from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(scores) => {
                        log::info!("Loaded high scores (best {})", scores.best());
                        return scores;
                    }
                    Err(e) => log::warn!("Discarding unreadable high scores: {e}"),
                }
            }
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    /// Save to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("High scores saved ({} entries)", self.entries.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

/// Zero-padded score readout, e.g. `00042`
pub fn format_score(score: u32) -> String {
    format!("{score:05}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_descending() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(50, 1.0), Some(1));
        assert_eq!(scores.add_score(80, 2.0), Some(1));
        assert_eq!(scores.add_score(60, 3.0), Some(2));
        assert_eq!(scores.best(), 80);
        let ordered: Vec<u32> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(ordered, vec![80, 60, 50]);
    }

    #[test]
    fn test_zero_never_qualifies() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(0, 1.0), None);
        assert!(scores.is_empty());
        assert!(!scores.is_new_record(0));
    }

    #[test]
    fn test_ledger_caps_at_ten() {
        let mut scores = HighScores::new();
        for s in 1..=15 {
            scores.add_score(s, s as f64);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(6));
        assert!(!scores.qualifies(3));
    }

    #[test]
    fn test_reads_bare_best_score() {
        let scores = HighScores::from_json("123").unwrap();
        assert_eq!(scores.best(), 123);

        let json = scores.to_json().unwrap();
        assert_eq!(HighScores::from_json(&json).unwrap().best(), 123);
    }

    #[test]
    fn test_format_score_pads() {
        assert_eq!(format_score(42), "00042");
        assert_eq!(format_score(123456), "123456");
    }
}
