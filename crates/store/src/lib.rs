//! File-backed high score.
//!
//! The file holds one decimal integer; surrounding whitespace is tolerated.
//! A missing or unreadable file reads as 0 and a failed write is logged and
//! dropped, so persistence problems never reach the game.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, warn};

use blockfall_core::HighScoreStore;

pub const DEFAULT_FILE_NAME: &str = "highscore.txt";

#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Strict read: `Ok(None)` when the file does not exist.
    pub fn read(&self) -> Result<Option<u32>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| format!("read {}", self.path.display()))
            }
        };
        let score = text
            .trim()
            .parse::<u32>()
            .with_context(|| format!("parse high score from {}", self.path.display()))?;
        Ok(Some(score))
    }

    /// Strict write of `score`, replacing the file.
    pub fn write(&self, score: u32) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        }
        fs::write(&self.path, score.to_string())
            .with_context(|| format!("write {}", self.path.display()))
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&mut self) -> u32 {
        match self.read() {
            Ok(Some(score)) => {
                debug!("high score {} from {}", score, self.path.display());
                score
            }
            Ok(None) => {
                debug!("no high score file at {}", self.path.display());
                0
            }
            Err(err) => {
                warn!("ignoring high score file: {:#}", err);
                0
            }
        }
    }

    fn save(&mut self, score: u32) {
        if let Err(err) = self.write(score) {
            warn!("high score {} not saved: {:#}", score, err);
        }
    }
}
