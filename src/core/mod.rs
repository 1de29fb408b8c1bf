pub mod engine;
pub mod round;
pub mod types;
