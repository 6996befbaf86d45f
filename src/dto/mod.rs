//! Request and response payloads of the HTTP API.

pub mod health;
pub mod question_bank;
pub mod trivia;
pub mod validation;
