/// Database model definitions.
pub mod models;
/// Question-bank storage and retrieval operations.
pub mod question_bank;
/// Storage abstraction layer for database operations.
pub mod storage;
/// Upstream trivia question providers.
pub mod trivia_source;
