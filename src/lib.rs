// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod persistence;
pub mod topics;

pub use crate::config::GameConfig;
pub use crate::core::engine::GameEngine;
pub use crate::core::types::{DiscussionStart, Player, Reveal, Role, RoleView, RoundStage, Settings};
pub use crate::error::{GameError, GameResult, PersistenceError};
pub use crate::topics::TopicStore;
