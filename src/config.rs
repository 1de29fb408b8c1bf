// File: src/config.rs
use std::path::PathBuf;

pub const DEFAULT_TOPICS_FILE: &str = "topics.json";
pub const DEFAULT_LOG_FILE: &str = "imposter_game.log";

/// Where the game keeps its files and how it seeds its draws.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub topics_path: PathBuf,
    pub log_path: PathBuf,
    /// `None` seeds from OS entropy; a fixed seed replays the same rounds.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            topics_path: PathBuf::from(DEFAULT_TOPICS_FILE),
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
            seed: None,
        }
    }
}
