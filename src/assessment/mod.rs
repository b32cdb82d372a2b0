//! Self-assessment questionnaires.
//!
//! This module provides the assessment session state machine that drives a
//! user through a PHQ-9 or GAD-7 question set one question at a time,
//! recording one answer per question and handing the completed answer set to
//! the backend scorer.

mod session;

pub use session::{AssessmentBackend, AssessmentSession, Phase, Progress};

use serde::{Deserialize, Serialize};

/// Supported questionnaire kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestKind {
    /// PHQ-9 depression screening (9 questions)
    Phq9,
    /// GAD-7 anxiety screening (7 questions)
    Gad7,
}

impl TestKind {
    /// Parse a wire tag, returning `None` for unrecognized values.
    ///
    /// Callers treat `None` as a no-op rather than an error, matching the
    /// observed behavior of the assessment flow.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "phq9" => Some(TestKind::Phq9),
            "gad7" => Some(TestKind::Gad7),
            _ => None,
        }
    }

    /// Human-readable test title
    pub fn title(&self) -> &'static str {
        match self {
            TestKind::Phq9 => "Depression Test",
            TestKind::Gad7 => "Anxiety Test",
        }
    }
}

impl std::fmt::Display for TestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestKind::Phq9 => write!(f, "phq9"),
            TestKind::Gad7 => write!(f, "gad7"),
        }
    }
}

/// The four fixed Likert frequency options shared by PHQ-9 and GAD-7.
///
/// The option set is fixed, so a recorded answer can never be out of bounds.
/// On the wire only the numeric value travels (see [`Choice::value`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Choice {
    /// "Not at all" (0)
    NotAtAll = 0,
    /// "Several days" (1)
    SeveralDays = 1,
    /// "More than half the days" (2)
    MoreThanHalf = 2,
    /// "Nearly every day" (3)
    NearlyEveryDay = 3,
}

impl Choice {
    /// All options in presentation order
    pub const ALL: [Choice; 4] = [
        Choice::NotAtAll,
        Choice::SeveralDays,
        Choice::MoreThanHalf,
        Choice::NearlyEveryDay,
    ];

    /// Map an option index in `{0,1,2,3}` to its choice.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Choice::NotAtAll),
            1 => Some(Choice::SeveralDays),
            2 => Some(Choice::MoreThanHalf),
            3 => Some(Choice::NearlyEveryDay),
            _ => None,
        }
    }

    /// Numeric value submitted to the scorer
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Label shown to the user
    pub fn label(&self) -> &'static str {
        match self {
            Choice::NotAtAll => "Not at all",
            Choice::SeveralDays => "Several days",
            Choice::MoreThanHalf => "More than half the days",
            Choice::NearlyEveryDay => "Nearly every day",
        }
    }
}
