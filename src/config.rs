//! Runtime configuration from environment variables.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `BLOCKFALL_HIGHSCORE_PATH` | high score file | `highscore.txt` beside the executable |
//! | `BLOCKFALL_SEED` | piece stream seed (`u64`) | derived from the clock |
//! | `BLOCKFALL_MUTE` | `1`/`true`/`yes`/`on` silences the bell | off |
//!
//! Unparseable values fall back to the default with a warning.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use log::warn;

use crate::store::DEFAULT_FILE_NAME;

pub const HIGHSCORE_PATH_ENV: &str = "BLOCKFALL_HIGHSCORE_PATH";
pub const SEED_ENV: &str = "BLOCKFALL_SEED";
pub const MUTE_ENV: &str = "BLOCKFALL_MUTE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub highscore_path: PathBuf,
    pub seed: u64,
    pub muted: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), clock_seed)
    }

    /// Build from an arbitrary key lookup; `fallback_seed` runs only when no
    /// usable seed is configured.
    pub fn from_lookup<F, S>(mut lookup: F, fallback_seed: S) -> Self
    where
        F: FnMut(&str) -> Option<String>,
        S: FnOnce() -> u64,
    {
        let highscore_path = lookup(HIGHSCORE_PATH_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_highscore_path);

        let seed = match lookup(SEED_ENV) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(seed) => seed,
                Err(_) => {
                    warn!("{}={:?} is not a u64; using a clock seed", SEED_ENV, raw);
                    fallback_seed()
                }
            },
            None => fallback_seed(),
        };

        let muted = lookup(MUTE_ENV).map(|v| parse_flag(&v)).unwrap_or(false);

        Self {
            highscore_path,
            seed,
            muted,
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// `highscore.txt` next to the executable, or in the working directory when
/// the executable path is unknown.
pub fn default_highscore_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_FILE_NAME)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE_NAME))
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}
