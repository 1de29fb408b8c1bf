// File: src/core/round.rs
use crate::core::types::{DiscussionStart, Player, Reveal, Role, RoleView, RoundStage, Settings};
use crate::error::{GameError, GameResult};
use crate::topics::TopicStore;
use log::{debug, info};
use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;
use std::collections::{HashMap, HashSet};

pub const MIN_PLAYERS: usize = 3;

/// One drawn assignment of topic, word, hint and roles.
#[derive(Debug, Clone)]
pub struct Round {
    topic: String,
    word: String,
    hint: String,
    roles: HashMap<String, Role>,
    starter: String,
    starter_announced: bool,
}

impl Round {
    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn hint(&self) -> &str {
        &self.hint
    }

    pub fn starter(&self) -> &str {
        &self.starter
    }

    pub fn starter_announced(&self) -> bool {
        self.starter_announced
    }

    pub fn role_of(&self, player: &str) -> Option<Role> {
        self.roles.get(player).copied()
    }

    pub fn imposter_count(&self) -> usize {
        self.roles.values().filter(|r| **r == Role::Imposter).count()
    }

    fn view_for(&self, role: Role, settings: &Settings) -> RoleView {
        let topic = settings.show_topic_to_all.then(|| self.topic.clone());
        match role {
            Role::Crewmate => RoleView::Crewmate { topic, word: self.word.clone() },
            Role::Imposter => {
                let hint = settings.show_hint_to_imposter.then(|| self.hint.clone());
                if topic.is_none() && hint.is_none() {
                    RoleView::ImposterNoInfo
                } else {
                    RoleView::Imposter { topic, hint }
                }
            }
        }
    }
}

/// Roster, session settings and the current round.
///
/// `start_round` builds the whole new round before replacing the old one, so a
/// rejected start leaves everything as it was.
#[derive(Debug, Default)]
pub struct RoundManager {
    players: Vec<Player>,
    settings: Settings,
    round: Option<Round>,
}

impl RoundManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn has_viewed(&self, name: &str) -> bool {
        self.players.iter().any(|p| p.name == name && p.viewed)
    }

    pub fn stage(&self) -> RoundStage {
        if self.round.is_none() {
            return RoundStage::NotStarted;
        }
        let total = self.players.len();
        let viewed = self.players.iter().filter(|p| p.viewed).count();
        if viewed == total {
            RoundStage::AllRevealed
        } else {
            RoundStage::InProgress { viewed, total }
        }
    }

    pub fn add_player(&mut self, name: &str) -> GameResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::EmptyName);
        }
        if self.players.iter().any(|p| p.name == name) {
            return Err(GameError::DuplicatePlayerName(name.to_string()));
        }
        self.players.push(Player::new(name));
        info!("player '{}' joined ({} total)", name, self.players.len());
        self.discard_round();
        Ok(())
    }

    pub fn remove_player(&mut self, name: &str) -> GameResult<()> {
        let name = name.trim();
        let idx = self
            .players
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| GameError::UnknownPlayer(name.to_string()))?;
        self.players.remove(idx);
        info!("player '{}' left ({} total)", name, self.players.len());
        self.discard_round();
        Ok(())
    }

    pub fn toggle_show_topic(&mut self) -> bool {
        self.settings.show_topic_to_all = !self.settings.show_topic_to_all;
        self.settings.show_topic_to_all
    }

    pub fn toggle_show_hint_to_imposter(&mut self) -> bool {
        self.settings.show_hint_to_imposter = !self.settings.show_hint_to_imposter;
        self.settings.show_hint_to_imposter
    }

    /// Draws a topic, a word, the imposters and the starter, and resets reveal progress.
    pub fn start_round<R: Rng + ?Sized>(
        &mut self,
        store: &TopicStore,
        imposter_count: usize,
        rng: &mut R,
    ) -> GameResult<()> {
        let total = self.players.len();
        if total < MIN_PLAYERS {
            return Err(GameError::InsufficientPlayers { have: total });
        }
        let playable = store.playable_topics();
        if playable.is_empty() {
            return Err(GameError::NoTopics);
        }
        let max = total - 1;
        if imposter_count == 0 || imposter_count > max {
            return Err(GameError::InvalidImposterCount { requested: imposter_count, max });
        }

        let (topic, words) = playable.choose(rng).copied().ok_or(GameError::NoTopics)?;
        let (word, hint) = words.iter().choose(rng).ok_or(GameError::NoTopics)?;

        let imposters: HashSet<&str> = self
            .players
            .choose_multiple(rng, imposter_count)
            .map(|p| p.name.as_str())
            .collect();
        let roles: HashMap<String, Role> = self
            .players
            .iter()
            .map(|p| {
                let role = if imposters.contains(p.name.as_str()) {
                    Role::Imposter
                } else {
                    Role::Crewmate
                };
                (p.name.clone(), role)
            })
            .collect();
        let starter = self
            .players
            .choose(rng)
            .map(|p| p.name.clone())
            .ok_or(GameError::InsufficientPlayers { have: total })?;

        let round = Round {
            topic: topic.to_string(),
            word: word.clone(),
            hint: hint.clone(),
            roles,
            starter,
            starter_announced: false,
        };
        debug!("round drawn: topic '{}', word '{}'", round.topic, round.word);

        for player in self.players.iter_mut() {
            player.viewed = false;
        }
        self.round = Some(round);
        info!("round started with {} players and {} imposter(s)", total, imposter_count);
        Ok(())
    }

    /// Shows `name` their role. Returns `Ok(None)` if they already saw it this round.
    pub fn reveal_role(&mut self, name: &str) -> GameResult<Option<Reveal>> {
        let idx = self
            .players
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| GameError::UnknownPlayer(name.to_string()))?;
        let settings = self.settings;
        let round = self.round.as_mut().ok_or(GameError::NoActiveRound)?;

        if self.players[idx].viewed {
            debug!("'{}' already viewed their role", name);
            return Ok(None);
        }
        let role = round
            .role_of(name)
            .ok_or_else(|| GameError::UnknownPlayer(name.to_string()))?;
        let view = round.view_for(role, &settings);
        self.players[idx].viewed = true;

        let everyone_viewed = self.players.iter().all(|p| p.viewed);
        let discussion = if everyone_viewed && !round.starter_announced {
            round.starter_announced = true;
            info!("all roles revealed, '{}' starts the discussion", round.starter);
            Some(DiscussionStart { starter: round.starter.clone() })
        } else {
            None
        };

        Ok(Some(Reveal { player: name.to_string(), view, discussion }))
    }

    fn discard_round(&mut self) {
        if self.round.take().is_some() {
            info!("roster changed, current round discarded");
        }
        for player in self.players.iter_mut() {
            player.viewed = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn manager(names: &[&str]) -> RoundManager {
        let mut manager = RoundManager::new();
        for name in names {
            manager.add_player(name).unwrap();
        }
        manager
    }

    fn dog_store() -> TopicStore {
        let mut store = TopicStore::in_memory();
        store.add_word("Animals", "Dog", "Man's best friend").unwrap();
        store
    }

    #[test]
    fn start_assigns_exact_imposter_count() {
        let names = ["A", "B", "C", "D", "E", "F"];
        let store = dog_store();
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for k in 1..names.len() {
                let mut m = manager(&names);
                m.start_round(&store, k, &mut rng).unwrap();
                let round = m.round().unwrap();
                assert_eq!(round.imposter_count(), k);
                assert!(names.iter().all(|n| round.role_of(n).is_some()));
                assert!(m.players().iter().all(|p| !p.viewed));
            }
        }
    }

    #[test]
    fn start_rejects_bad_input_in_order() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let empty = TopicStore::in_memory();

        let mut two = manager(&["A", "B"]);
        assert!(matches!(
            two.start_round(&empty, 1, &mut rng),
            Err(GameError::InsufficientPlayers { have: 2 })
        ));

        let mut four = manager(&["A", "B", "C", "D"]);
        assert!(matches!(four.start_round(&empty, 9, &mut rng), Err(GameError::NoTopics)));

        let store = dog_store();
        assert!(matches!(
            four.start_round(&store, 4, &mut rng),
            Err(GameError::InvalidImposterCount { requested: 4, max: 3 })
        ));
        assert!(matches!(
            four.start_round(&store, 0, &mut rng),
            Err(GameError::InvalidImposterCount { requested: 0, max: 3 })
        ));
        assert_eq!(four.stage(), RoundStage::NotStarted);
    }

    #[test]
    fn store_with_only_empty_topics_has_no_topics() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut store = dog_store();
        store.remove_word("Animals", "Dog").unwrap();
        let mut m = manager(&["A", "B", "C"]);
        assert!(matches!(m.start_round(&store, 1, &mut rng), Err(GameError::NoTopics)));
    }

    #[test]
    fn failed_start_keeps_previous_round() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let store = dog_store();
        let mut m = manager(&["A", "B", "C"]);
        m.start_round(&store, 1, &mut rng).unwrap();
        m.reveal_role("A").unwrap();
        let starter = m.round().unwrap().starter().to_string();

        assert!(m.start_round(&store, 3, &mut rng).is_err());
        assert_eq!(m.round().unwrap().starter(), starter);
        assert!(m.has_viewed("A"));
        assert_eq!(m.stage(), RoundStage::InProgress { viewed: 1, total: 3 });
    }

    #[test]
    fn reveal_is_idempotent_and_announces_once() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let store = dog_store();
        let mut m = manager(&["A", "B", "C"]);
        m.start_round(&store, 1, &mut rng).unwrap();

        let first = m.reveal_role("B").unwrap().unwrap();
        assert!(first.discussion.is_none());
        assert!(m.reveal_role("B").unwrap().is_none());
        assert!(m.reveal_role("A").unwrap().unwrap().discussion.is_none());

        let last = m.reveal_role("C").unwrap().unwrap();
        let starter = m.round().unwrap().starter().to_string();
        assert_eq!(last.discussion, Some(DiscussionStart { starter }));
        assert_eq!(m.stage(), RoundStage::AllRevealed);
        assert!(m.round().unwrap().starter_announced());

        assert!(m.reveal_role("C").unwrap().is_none());
    }

    #[test]
    fn reveal_requires_round_and_known_player() {
        let mut m = manager(&["A", "B", "C"]);
        assert!(matches!(m.reveal_role("A"), Err(GameError::NoActiveRound)));
        assert!(matches!(m.reveal_role("Z"), Err(GameError::UnknownPlayer(n)) if n == "Z"));
    }

    #[test]
    fn views_follow_settings() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let store = dog_store();
        let names = ["A", "B", "C"];
        let mut m = manager(&names);

        let cases = [
            (true, true),
            (false, true),
            (true, false),
            (false, false),
        ];
        for (show_topic, show_hint) in cases {
            if m.settings().show_topic_to_all != show_topic {
                m.toggle_show_topic();
            }
            if m.settings().show_hint_to_imposter != show_hint {
                m.toggle_show_hint_to_imposter();
            }
            m.start_round(&store, 1, &mut rng).unwrap();

            for name in names {
                let role = m.round().unwrap().role_of(name).unwrap();
                let view = m.reveal_role(name).unwrap().unwrap().view;
                assert_eq!(view.role(), role);
                let topic = show_topic.then(|| "Animals".to_string());
                let expected = match role {
                    Role::Crewmate => RoleView::Crewmate { topic, word: "Dog".to_string() },
                    Role::Imposter if !show_topic && !show_hint => RoleView::ImposterNoInfo,
                    Role::Imposter => RoleView::Imposter {
                        topic,
                        hint: show_hint.then(|| "Man's best friend".to_string()),
                    },
                };
                assert_eq!(view, expected);
            }
        }
    }

    #[test]
    fn roster_rules() {
        let mut m = manager(&["A"]);
        assert!(matches!(m.add_player("A"), Err(GameError::DuplicatePlayerName(_))));
        assert!(matches!(m.add_player(" A "), Err(GameError::DuplicatePlayerName(_))));
        assert!(matches!(m.add_player("   "), Err(GameError::EmptyName)));
        assert!(matches!(m.remove_player("B"), Err(GameError::UnknownPlayer(_))));
        m.remove_player("A").unwrap();
        assert!(m.players().is_empty());
    }

    #[test]
    fn roster_change_discards_round() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let store = dog_store();
        let mut m = manager(&["A", "B", "C"]);
        m.start_round(&store, 1, &mut rng).unwrap();
        m.reveal_role("A").unwrap();

        m.add_player("D").unwrap();
        assert_eq!(m.stage(), RoundStage::NotStarted);
        assert!(!m.has_viewed("A"));
        assert!(matches!(m.reveal_role("D"), Err(GameError::NoActiveRound)));
    }

    #[test]
    fn new_round_resets_progress() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let store = dog_store();
        let mut m = manager(&["A", "B", "C"]);
        m.start_round(&store, 2, &mut rng).unwrap();
        for name in ["A", "B", "C"] {
            m.reveal_role(name).unwrap();
        }
        assert_eq!(m.stage(), RoundStage::AllRevealed);

        m.start_round(&store, 1, &mut rng).unwrap();
        assert_eq!(m.stage(), RoundStage::InProgress { viewed: 0, total: 3 });
        assert!(!m.round().unwrap().starter_announced());
    }
}
