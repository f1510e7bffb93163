use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// The best score achieved this session. Only ever goes up, until reset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BestScore(f32);

impl BestScore {
    pub fn new(initial: f32) -> Self {
        if initial.is_finite() && initial > 0. {
            BestScore(initial)
        } else {
            BestScore(0.)
        }
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    /// Keep `score` if it beats the current best; returns true if it did.
    pub fn offer(&mut self, score: f32) -> bool {
        if score > self.0 {
            self.0 = score;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.0 = 0.;
    }
}

/// Values are stored with two decimals, as shown to the player.
pub fn round_for_storage(value: f32) -> f32 {
    (value * 100.).round() / 100.
}

/// Where the session's best score is kept between reads.
pub trait BestScoreStore {
    fn load(&self) -> Result<Option<f32>>;
    fn persist(&mut self, value: f32) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

/// Lives exactly as long as the process.
#[derive(Debug, Default)]
pub struct SessionStore {
    value: Option<f32>,
}

impl SessionStore {
    pub fn new() -> Self {
        SessionStore::default()
    }
}

impl BestScoreStore for SessionStore {
    fn load(&self) -> Result<Option<f32>> {
        Ok(self.value)
    }

    fn persist(&mut self, value: f32) -> Result<()> {
        self.value = Some(round_for_storage(value));
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.value = None;
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct StoredBestScore {
    best_score: f32,
}

/// Keeps the best score in a small JSON file so it survives a restart; the
/// owner clears it when the session ends.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        JsonFileStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BestScoreStore for JsonFileStore {
    fn load(&self) -> Result<Option<f32>> {
        match fs::read_to_string(&self.path) {
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No session file at {:?} yet", self.path);
                Ok(None)
            }
            Err(e) => Err(anyhow!("Failed to read session file {:?}: {}", self.path, e)),
            Ok(s) => match serde_json::from_str::<StoredBestScore>(&s) {
                Ok(stored) => Ok(Some(stored.best_score)),
                Err(e) => Err(anyhow!("Failed to parse session file: {}", e)),
            },
        }
    }

    fn persist(&mut self, value: f32) -> Result<()> {
        let text = serde_json::to_string(&StoredBestScore {
            best_score: round_for_storage(value),
        })?;
        fs::write(&self.path, text)?;
        debug!("Wrote best score {:.2} to {:?}", value, self.path);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Session ended; removed {:?}", self.path);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow!("Failed to remove session file: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_score_is_the_running_maximum() {
        let mut best = BestScore::new(40.);
        let accepted = [12.5, 71.2, 55., 71.2, 93.7, 0.];
        for v in accepted {
            best.offer(v);
        }
        let expected = accepted.iter().cloned().fold(40., f32::max);
        assert_eq!(best.value(), expected);
    }

    #[test]
    fn offer_reports_new_best_only() {
        let mut best = BestScore::default();
        assert!(best.offer(50.));
        assert!(!best.offer(50.));
        assert!(!best.offer(49.));
        assert!(best.offer(50.5));
        best.reset();
        assert_eq!(best.value(), 0.);
    }

    #[test]
    fn invalid_initial_values_start_at_zero() {
        assert_eq!(BestScore::new(-3.).value(), 0.);
        assert_eq!(BestScore::new(f32::NAN).value(), 0.);
    }

    #[test]
    fn session_store_round_trip() {
        let mut store = SessionStore::new();
        assert_eq!(store.load().unwrap(), None);
        store.persist(87.4567).unwrap();
        assert_eq!(store.load().unwrap(), Some(87.46));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn json_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best.json");
        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.path(), path.as_path());
        assert_eq!(store.load().unwrap(), None);

        store.persist(91.234).unwrap();
        assert_eq!(JsonFileStore::new(&path).load().unwrap(), Some(91.23));

        store.clear().unwrap();
        assert!(!path.exists());
        store.clear().unwrap();
    }

    #[test]
    fn json_file_store_reports_unreadable_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best.json");
        fs::write(&path, "best score: lots").unwrap();
        assert!(JsonFileStore::new(&path).load().is_err());
    }
}
