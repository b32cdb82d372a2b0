use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::assessment::TestKind;

/// Question set for one assessment kind, as returned by `/get-questions`
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionSet {
    pub questions: Vec<String>,
}

/// Request body for `/submit-answers`
#[derive(Debug, Clone, Serialize)]
pub struct SubmitRequest {
    pub test_type: TestKind,
    pub answers: Vec<u8>,
}

/// Scored assessment result returned by `/submit-answers`.
///
/// The scoring algorithm is the backend's concern; both fields are displayed
/// verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: f64,
    pub category: String,
}

/// One scored session in the user's mood history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    /// ISO date (YYYY-MM-DD) the assessment was taken
    pub date: NaiveDate,
    pub score: f64,
    pub category: String,
    pub test_type: TestKind,
}

/// Request body for `/chat`
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub text: String,
}

/// Companion reply returned by `/chat`
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub bot: String,
}

/// Reaction counters on a community post
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Reactions {
    pub heart: u32,
    pub hug: u32,
    pub flower: u32,
}

/// One anonymised post in the community feed
#[derive(Debug, Clone, Deserialize)]
pub struct CommunityPost {
    pub id: String,
    /// Backend-assigned anonymous display name
    pub name: String,
    pub message: String,
    pub reactions: Reactions,
    pub date: NaiveDate,
}

/// Request body for `/community-post`
#[derive(Debug, Clone, Serialize)]
pub struct CommunityPostRequest {
    pub message: String,
}

/// Reaction kinds accepted by `/react`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    /// A heart
    Heart,
    /// A hug
    Hug,
    /// A flower
    Flower,
}

impl std::fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReactionKind::Heart => write!(f, "heart"),
            ReactionKind::Hug => write!(f, "hug"),
            ReactionKind::Flower => write!(f, "flower"),
        }
    }
}

impl std::str::FromStr for ReactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "heart" => Ok(ReactionKind::Heart),
            "hug" => Ok(ReactionKind::Hug),
            "flower" => Ok(ReactionKind::Flower),
            _ => Err(format!("Unknown reaction: {}", s)),
        }
    }
}

/// Request body for `/react`
#[derive(Debug, Clone, Serialize)]
pub struct ReactRequest {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ReactionKind,
}

/// Status acknowledgement returned by community and journal writes
#[derive(Debug, Clone, Deserialize)]
pub struct StatusReply {
    pub status: String,
}

/// Request body for `/book-counselling`
#[derive(Debug, Clone, Serialize)]
pub struct BookingRequest {
    pub name: String,
    pub email: String,
    pub counsellor_type: String,
    pub date: String,
    pub time: String,
}

/// Acknowledgement returned by `/book-counselling`
#[derive(Debug, Clone, Deserialize)]
pub struct BookingReply {
    pub success: bool,
}

/// Request body for `POST /journal`
#[derive(Debug, Clone, Serialize)]
pub struct JournalRequest {
    pub text: String,
}

/// One saved journal entry from `GET /journal`
#[derive(Debug, Clone, Deserialize)]
pub struct JournalEntry {
    pub text: String,
    pub date: NaiveDate,
}

/// Response from `/health`
#[derive(Debug, Clone, Deserialize)]
pub struct HealthReply {
    pub ok: bool,
}

impl BookingRequest {
    /// Create a booking with the default on-campus counsellor type
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            counsellor_type: "on-campus".to_string(),
            date: date.into(),
            time: time.into(),
        }
    }

    /// Set the counsellor type (e.g. "on-campus", "external")
    pub fn with_counsellor_type(mut self, counsellor_type: impl Into<String>) -> Self {
        self.counsellor_type = counsellor_type.into();
        self
    }
}
