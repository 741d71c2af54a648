//! High score leaderboard system
//!
//! Persisted as a JSON array through a [`PersistentStore`], tracks the top 20
//! sessions. Storage failures never reach the caller: an unreadable list
//! loads as empty and a failed write is logged and dropped.

use std::cmp::Reverse;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::consts::{HIGHSCORE_CAPACITY, MAX_NAME_LEN, PLACEHOLDER_NAME};
use crate::persistence::PersistentStore;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player name, uppercase, at most 8 characters
    pub name: String,
    pub score: u64,
    /// Unix timestamp (ms) when achieved
    pub timestamp: u64,
}

/// High score leaderboard
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
    capacity: usize,
    store: Box<dyn PersistentStore>,
}

impl std::fmt::Debug for HighScores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighScores")
            .field("entries", &self.entries)
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl HighScores {
    /// Load the leaderboard from `store`
    pub fn load(store: Box<dyn PersistentStore>) -> Self {
        Self::load_with_capacity(store, HIGHSCORE_CAPACITY)
    }

    pub fn load_with_capacity(store: Box<dyn PersistentStore>, capacity: usize) -> Self {
        let entries = read_entries(store.as_ref(), capacity).unwrap_or_default();
        log::info!("Loaded {} high scores", entries.len());
        Self {
            entries,
            capacity,
            store,
        }
    }

    /// Entries, best first
    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Check if a score would make the list
    pub fn qualifies(&self, score: u64) -> bool {
        self.potential_rank(score).is_some()
    }

    /// Rank a score would get if saved now (1-indexed). Ties rank below
    /// existing entries with the same score.
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        let rank = self.entries.iter().filter(|e| e.score >= score).count() + 1;
        (rank <= self.capacity).then_some(rank)
    }

    /// Record a finished session and persist the list.
    /// Returns the rank achieved (1-indexed) or `None` if it fell off the list.
    pub fn save(&mut self, name: &str, score: u64) -> Option<usize> {
        self.save_at(name, score, now_millis())
    }

    /// [`save`](Self::save) with an explicit timestamp
    pub fn save_at(&mut self, name: &str, score: u64, timestamp: u64) -> Option<usize> {
        // Another session may have written since we loaded
        if let Some(entries) = read_entries(self.store.as_ref(), self.capacity) {
            self.entries = entries;
        }
        let rank = self.entries.iter().filter(|e| e.score >= score).count() + 1;

        self.entries.push(HighScoreEntry {
            name: sanitize_name(name),
            score,
            timestamp,
        });
        // Stable: equal scores keep their previous relative order
        self.entries.sort_by_key(|e| Reverse(e.score));
        self.entries.truncate(self.capacity);

        self.persist();
        (rank <= self.capacity).then_some(rank)
    }

    fn persist(&mut self) {
        let bytes = match serde_json::to_vec(&self.entries) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Failed to encode high scores: {}", e);
                return;
            }
        };
        match self.store.write_all(&bytes) {
            Ok(()) => log::info!("High scores saved ({} entries)", self.entries.len()),
            Err(e) => log::warn!("Failed to save high scores: {}", e),
        }
    }
}

/// Stored list, best first and capped. `None` if nothing usable is stored.
fn read_entries(store: &dyn PersistentStore, capacity: usize) -> Option<Vec<HighScoreEntry>> {
    let Some(bytes) = store.read_all() else {
        log::debug!("No high scores stored");
        return None;
    };
    let mut entries = match serde_json::from_slice::<Vec<HighScoreEntry>>(&bytes) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Unreadable high score list ({}), starting fresh", e);
            return None;
        }
    };
    log::debug!("Read {} high scores", entries.len());

    // A hand-edited file may be unsorted or too long
    entries.sort_by_key(|e| Reverse(e.score));
    entries.truncate(capacity);
    Some(entries)
}

/// Uppercase, trim and cap a player name; empty names become the placeholder
pub fn sanitize_name(name: &str) -> String {
    let name: String = name.trim().to_uppercase().chars().take(MAX_NAME_LEN).collect();
    if name.is_empty() {
        PLACEHOLDER_NAME.to_string()
    } else {
        name
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Format a timestamp as a relative date string
pub fn format_age(timestamp: u64, now: u64) -> String {
    let diff_mins = now.saturating_sub(timestamp) / 60_000;
    let diff_hours = diff_mins / 60;
    let diff_days = diff_hours / 24;

    match (diff_days, diff_hours, diff_mins) {
        (1, _, _) => "Yesterday".to_string(),
        (d, _, _) if d > 1 => format!("{} days ago", d),
        (_, 1, _) => "1 hour ago".to_string(),
        (_, h, _) if h > 1 => format!("{} hours ago", h),
        (_, _, 1) => "1 min ago".to_string(),
        (_, _, m) if m > 1 => format!("{} mins ago", m),
        _ => "Just now".to_string(),
    }
}

/// Age of an entry relative to the wall clock
pub fn format_date(timestamp: u64) -> String {
    format_age(timestamp, now_millis())
}
