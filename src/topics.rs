// File: src/topics.rs
use crate::error::{GameError, GameResult};
use crate::persistence::{load_from_disk, save_to_disk};
use log::{info, warn};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Word -> hint for a single topic.
pub type WordMap = BTreeMap<String, String>;

/// Topic name -> words. This is exactly the shape of the topic file.
pub type TopicMap = BTreeMap<String, WordMap>;

/// The library of topics, words and hints rounds are drawn from.
///
/// Every mutation is written through to `path` when one is set. If the write
/// fails the in-memory change is kept and the error is returned, so the next
/// successful save still carries it.
pub struct TopicStore {
    topics: TopicMap,
    path: Option<PathBuf>,
}

impl TopicStore {
    /// A store that never touches the disk.
    pub fn in_memory() -> Self {
        Self { topics: TopicMap::new(), path: None }
    }

    pub fn from_map(topics: TopicMap) -> Self {
        Self { topics, path: None }
    }

    /// Loads `path` (missing file means an empty library) and saves back to it.
    pub fn open(path: impl AsRef<Path>) -> GameResult<Self> {
        let path = path.as_ref().to_path_buf();
        let topics = load_from_disk(&path)?;
        info!("loaded {} topics from {}", topics.len(), path.display());
        Ok(Self { topics, path: Some(path) })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Adds or overwrites `word` under `topic`, creating the topic on demand.
    pub fn add_word(&mut self, topic: &str, word: &str, hint: &str) -> GameResult<()> {
        let (topic, word, hint) = (topic.trim(), word.trim(), hint.trim());
        if topic.is_empty() || word.is_empty() || hint.is_empty() {
            return Err(GameError::EmptyEntry);
        }

        let previous = self
            .topics
            .entry(topic.to_string())
            .or_default()
            .insert(word.to_string(), hint.to_string());
        if previous.is_some() {
            info!("replaced hint for '{}' in topic '{}'", word, topic);
        } else {
            info!("added '{}' to topic '{}'", word, topic);
        }
        self.save()
    }

    /// Removes `word` from `topic`. Returns `Ok(false)` when there was nothing to remove.
    /// The topic stays in the store even if it ends up empty.
    pub fn remove_word(&mut self, topic: &str, word: &str) -> GameResult<bool> {
        let removed = self
            .topics
            .get_mut(topic.trim())
            .and_then(|words| words.remove(word.trim()))
            .is_some();
        if !removed {
            return Ok(false);
        }
        info!("removed '{}' from topic '{}'", word.trim(), topic.trim());
        self.save()?;
        Ok(true)
    }

    pub fn list_topics(&self) -> impl Iterator<Item = &str> {
        self.topics.keys().map(String::as_str)
    }

    pub fn words_of(&self, topic: &str) -> GameResult<&WordMap> {
        self.topics
            .get(topic)
            .ok_or_else(|| GameError::UnknownTopicOrWord(topic.to_string()))
    }

    /// Topics that have at least one word, in name order.
    pub fn playable_topics(&self) -> Vec<(&str, &WordMap)> {
        self.topics
            .iter()
            .filter(|(_, words)| !words.is_empty())
            .map(|(name, words)| (name.as_str(), words))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn as_map(&self) -> &TopicMap {
        &self.topics
    }

    fn save(&self) -> GameResult<()> {
        if let Some(path) = &self.path {
            if let Err(e) = save_to_disk(&self.topics, path) {
                warn!("could not save topics to {}: {}", path.display(), e);
                return Err(e.into());
            }
        }
        Ok(())
    }
}
