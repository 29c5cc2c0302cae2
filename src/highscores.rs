//! Persisted high score
//!
//! A single integer under `highScore`. Storage trouble is never fatal: the
//! in-memory value stays authoritative for the session and a warning is
//! logged. A stored value that could not be read is never overwritten
//! blindly; the store is read again before the next write.

use crate::consts::HIGH_SCORE_KEY;
use crate::error::{Error, Result};
use crate::persistence::KeyValueStore;

pub struct HighScore {
    value: u32,
    store: Box<dyn KeyValueStore>,
    /// `value` is known to be at least what the store holds
    synced: bool,
}

impl HighScore {
    /// Read the stored high score, initializing it to 0 when absent
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let mut high_score = Self {
            value: 0,
            store,
            synced: false,
        };

        match read(&*high_score.store) {
            Ok(Some(value)) => {
                log::info!("Loaded high score {value}");
                high_score.value = value;
                high_score.synced = true;
            }
            Ok(None) => {
                log::info!("No high score found, starting at 0");
                high_score.synced = true;
                high_score.persist();
            }
            Err(e @ Error::NotAnInteger { .. }) => {
                log::warn!("Discarding stored high score, using 0: {e}");
                high_score.synced = true;
            }
            Err(e) => log::warn!("Could not read high score, using 0: {e}"),
        }

        high_score
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Record `goal_count` if it beats the current high score.
    /// Returns whether the high score changed, including when a stored value
    /// that was unreadable at load time turns out to be higher.
    pub fn submit(&mut self, goal_count: u32) -> bool {
        let before = self.value;
        if !self.synced {
            self.resync();
        }
        if goal_count > self.value {
            self.value = goal_count;
            if self.synced {
                self.persist();
            } else {
                log::warn!("High score {goal_count} kept in memory only, stored value unknown");
            }
        }
        self.value != before
    }

    /// Retry a failed load, keeping whichever value is higher
    fn resync(&mut self) {
        let stored = match read(&*self.store) {
            Ok(stored) => stored.unwrap_or(0),
            Err(Error::NotAnInteger { .. }) => 0,
            Err(e) => {
                log::warn!("High score store still unreadable: {e}");
                return;
            }
        };
        self.synced = true;
        if stored > self.value {
            log::info!("Recovered stored high score {stored}");
            self.value = stored;
        } else if self.value > stored {
            // Goals scored while the store was unreadable
            self.persist();
        }
    }

    fn persist(&mut self) {
        match self.store.set(HIGH_SCORE_KEY, &self.value.to_string()) {
            Ok(()) => log::debug!("High score {} saved", self.value),
            Err(e) => log::warn!("Could not save high score {}: {e}", self.value),
        }
    }
}

fn read(store: &dyn KeyValueStore) -> Result<Option<u32>> {
    let Some(raw) = store.get(HIGH_SCORE_KEY)? else {
        return Ok(None);
    };
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|_| Error::NotAnInteger {
            key: HIGH_SCORE_KEY.to_string(),
            value: raw,
        })
}
