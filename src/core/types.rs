// src/core/types.rs
use std::fmt;

/// The secret part a player gets for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Crewmate,
    Imposter,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Crewmate => write!(f, "crewmate"),
            Role::Imposter => write!(f, "imposter"),
        }
    }
}

/// A seat at the table. Names are unique within a roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    /// Has seen their role in the current round.
    pub viewed: bool,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), viewed: false }
    }
}

/// Session-wide switches for what the reveal screen shows. Never saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Everyone, imposters included, sees the topic name.
    pub show_topic_to_all: bool,
    /// Imposters see the vague hint for the word.
    pub show_hint_to_imposter: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { show_topic_to_all: true, show_hint_to_imposter: true }
    }
}

/// What one player is allowed to see on their private reveal screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleView {
    Crewmate { topic: Option<String>, word: String },
    Imposter { topic: Option<String>, hint: Option<String> },
    /// Imposter with both topic and hint hidden.
    ImposterNoInfo,
}

impl RoleView {
    pub fn role(&self) -> Role {
        match self {
            RoleView::Crewmate { .. } => Role::Crewmate,
            RoleView::Imposter { .. } | RoleView::ImposterNoInfo => Role::Imposter,
        }
    }
}

/// Fired once per round when the last player has seen their role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscussionStart {
    pub starter: String,
}

/// Result of a first-time reveal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    pub player: String,
    pub view: RoleView,
    pub discussion: Option<DiscussionStart>,
}

/// Where the current round is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStage {
    NotStarted,
    InProgress { viewed: usize, total: usize },
    AllRevealed,
}
