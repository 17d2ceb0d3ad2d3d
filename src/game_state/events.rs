//! In-memory event feed for front-ends.
//!
//! Every entry is also forwarded to the `log` facade so headless runs can
//! follow a game with `RUST_LOG=info`.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEvent {
    pub at: DateTime<Utc>,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: Vec<GameEvent>,
}

impl EventLog {
    pub fn record(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::info!("{message}");
        self.entries.push(GameEvent {
            at: Utc::now(),
            message,
        });
    }

    /// Entries oldest first.
    pub fn entries(&self) -> &[GameEvent] {
        &self.entries
    }

    /// Up to `count` entries, newest first.
    pub fn latest(&self, count: usize) -> impl Iterator<Item = &GameEvent> {
        self.entries.iter().rev().take(count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
