// File: src/error.rs

/// Failures while reading or writing the topic file.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("could not access topic file: {0}")]
    Io(#[from] std::io::Error),
    #[error("topic file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not replace topic file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Everything the game can refuse to do. All of these are recoverable:
/// the caller tells the user and the previous state stays in place.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("at least 3 players required (have {have})")]
    InsufficientPlayers { have: usize },
    #[error("imposter count must be between 1 and {max} (got {requested})")]
    InvalidImposterCount { requested: usize, max: usize },
    #[error("no topics with words available")]
    NoTopics,
    #[error("player '{0}' is already in the game")]
    DuplicatePlayerName(String),
    #[error("player '{0}' is not in the game")]
    UnknownPlayer(String),
    #[error("unknown topic or word: '{0}'")]
    UnknownTopicOrWord(String),
    #[error("player name must not be empty")]
    EmptyName,
    #[error("topic, word and hint must not be empty")]
    EmptyEntry,
    #[error("no round has been started")]
    NoActiveRound,
    #[error(transparent)]
    Storage(#[from] PersistenceError),
}

pub type GameResult<T> = Result<T, GameError>;
