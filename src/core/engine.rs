use crate::config::GameConfig;
use crate::core::round::{Round, RoundManager};
use crate::core::types::{Player, Reveal, RoundStage, Settings};
use crate::error::GameResult;
use crate::topics::TopicStore;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// The game session: one roster, one topic library, one generator.
// The front end talks only to this; nothing here is global.
pub struct GameEngine {
    pub topics: TopicStore,
    rounds: RoundManager,
    rng: ChaCha8Rng,
}

impl GameEngine {
    pub fn new(topics: TopicStore) -> Self {
        Self {
            topics,
            rounds: RoundManager::new(),
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Same as `new`, but every draw is reproducible.
    pub fn with_seed(topics: TopicStore, seed: u64) -> Self {
        Self {
            topics,
            rounds: RoundManager::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_config(config: &GameConfig) -> GameResult<Self> {
        let topics = TopicStore::open(&config.topics_path)?;
        Ok(match config.seed {
            Some(seed) => Self::with_seed(topics, seed),
            None => Self::new(topics),
        })
    }

    pub fn players(&self) -> &[Player] {
        self.rounds.players()
    }

    pub fn add_player(&mut self, name: &str) -> GameResult<()> {
        self.rounds.add_player(name)
    }

    pub fn remove_player(&mut self, name: &str) -> GameResult<()> {
        self.rounds.remove_player(name)
    }

    pub fn settings(&self) -> Settings {
        self.rounds.settings()
    }

    pub fn toggle_show_topic(&mut self) -> bool {
        self.rounds.toggle_show_topic()
    }

    pub fn toggle_show_hint_to_imposter(&mut self) -> bool {
        self.rounds.toggle_show_hint_to_imposter()
    }

    pub fn add_word(&mut self, topic: &str, word: &str, hint: &str) -> GameResult<()> {
        self.topics.add_word(topic, word, hint)
    }

    pub fn remove_word(&mut self, topic: &str, word: &str) -> GameResult<bool> {
        self.topics.remove_word(topic, word)
    }

    pub fn start_round(&mut self, imposter_count: usize) -> GameResult<()> {
        self.rounds.start_round(&self.topics, imposter_count, &mut self.rng)
    }

    pub fn reveal_role(&mut self, name: &str) -> GameResult<Option<Reveal>> {
        self.rounds.reveal_role(name)
    }

    pub fn round(&self) -> Option<&Round> {
        self.rounds.round()
    }

    pub fn stage(&self) -> RoundStage {
        self.rounds.stage()
    }

    pub fn has_viewed(&self, name: &str) -> bool {
        self.rounds.has_viewed(name)
    }
}
