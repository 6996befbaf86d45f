/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Image question bank operations.
pub mod question_bank_service;
/// Question-bank connection supervisor with degraded-mode tracking.
pub mod storage_supervisor;
/// Proxy to the external trivia service.
pub mod trivia_service;
