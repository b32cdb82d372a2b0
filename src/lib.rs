//! # Liora Client
//!
//! Client library and CLI for the Liora mental-health support backend:
//! self-assessment questionnaires (PHQ-9, GAD-7), mood-history trends, a
//! support chatbot, a peer community feed, counselling booking, and a
//! private journal.
//!
//! All substantive data lives behind the backend's HTTP/JSON API; the client
//! keeps only ephemeral session state plus one persisted user identifier.
//! The independently testable core is the assessment session state machine
//! ([`assessment::AssessmentSession`]) and the mood trend estimator
//! ([`trend::estimate`]).
//!
//! ## Architecture
//!
//! ```text
//! CLI → AssessmentSession / TrendSummary → LioraClient (HTTP) → Liora backend
//!                                              ↑
//!                                    UserId (file-persisted)
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use liora_client::api::LioraClient;
//! use liora_client::assessment::{AssessmentSession, Choice, TestKind};
//! use liora_client::identity::UserId;
//! use liora_client::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let user_id = UserId::load_or_create(&config.identity.path)?;
//!     let client = LioraClient::new(&config.api, user_id, config.request.clone())?;
//!
//!     let mut session = AssessmentSession::start(client, TestKind::Phq9).await?;
//!     session.record_answer(Choice::SeveralDays);
//!     session.advance().await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

/// Liora backend API client and wire types.
pub mod api;
/// Assessment session state machine and questionnaire types.
pub mod assessment;
/// CLI argument parsing and command execution.
pub mod cli;
/// Configuration management loaded from the environment.
pub mod config;
/// Error types and result aliases for the application.
pub mod error;
/// Persistent user identity.
pub mod identity;
/// Mood trend estimation over scored history.
pub mod trend;

pub use config::Config;
pub use error::{AppError, AppResult};
