use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::api::ScoreResult;
use crate::error::{ApiResult, SessionError, SessionResult};

use super::{Choice, TestKind};

/// Question provider and scorer the session delegates to.
///
/// Implemented by [`LioraClient`](crate::api::LioraClient); the seam exists so
/// the state machine can be unit-tested without a network.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssessmentBackend {
    /// Fetch the ordered question set for a test kind.
    async fn fetch_questions(&self, kind: TestKind) -> ApiResult<Vec<String>>;

    /// Submit a complete answer set for scoring.
    async fn submit(&self, kind: TestKind, answers: Vec<u8>) -> ApiResult<ScoreResult>;
}

/// Lifecycle phase of an assessment session.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// Question set not yet available
    Loading,
    /// Cursor within the question set, answers accumulating
    InProgress,
    /// Terminal: holds the scored result
    Completed(ScoreResult),
}

/// Outcome of a successful [`AssessmentSession::advance`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    /// Cursor moved to this question index
    Moved(usize),
    /// The final answer set was submitted and scored
    Completed(ScoreResult),
}

/// Drives a user through one question set, one question at a time.
///
/// All mutating operations take `&mut self`, so user actions are serialized
/// by construction: no navigation or test-kind switch can overlap a pending
/// submission, which is what makes a stale scorer reply unrepresentable.
/// Switching test kind discards all recorded answers and any prior result.
pub struct AssessmentSession<B> {
    backend: B,
    kind: TestKind,
    questions: Vec<String>,
    cursor: usize,
    answers: Vec<Option<Choice>>,
    phase: Phase,
}

impl<B: AssessmentBackend> AssessmentSession<B> {
    /// Create a session and load the question set for `kind`.
    pub async fn start(backend: B, kind: TestKind) -> ApiResult<Self> {
        let mut session = Self {
            backend,
            kind,
            questions: Vec::new(),
            cursor: 0,
            answers: Vec::new(),
            phase: Phase::Loading,
        };
        session.load(kind).await?;
        Ok(session)
    }

    /// Switch to a different test kind.
    ///
    /// Resets the cursor, clears all recorded answers and any prior result,
    /// and fetches a fresh question set. An unrecognized kind is a silent
    /// no-op: the current session state is left untouched.
    pub async fn select_test_kind(&mut self, kind: &str) -> ApiResult<()> {
        let Some(kind) = TestKind::parse(kind) else {
            debug!(kind, "Ignoring unrecognized test kind");
            return Ok(());
        };
        self.load(kind).await
    }

    async fn load(&mut self, kind: TestKind) -> ApiResult<()> {
        self.kind = kind;
        self.phase = Phase::Loading;
        self.cursor = 0;
        self.questions.clear();
        self.answers.clear();

        let questions = self.backend.fetch_questions(kind).await?;
        info!(kind = %kind, questions = questions.len(), "Question set loaded");

        self.answers = vec![None; questions.len()];
        self.questions = questions;
        self.phase = Phase::InProgress;
        Ok(())
    }

    /// Record the choice for the current question, overwriting any prior one.
    pub fn record_answer(&mut self, choice: Choice) {
        if self.phase != Phase::InProgress {
            debug!(phase = ?self.phase, "Ignoring answer outside an active session");
            return;
        }
        if let Some(slot) = self.answers.get_mut(self.cursor) {
            *slot = Some(choice);
        }
    }

    /// Move to the next question, or submit when the last one is answered.
    ///
    /// Fails with [`SessionError::AnswerRequired`] if the current question has
    /// no recorded answer; the cursor does not move. At the last index the
    /// full answer set is submitted to the scorer: on success the session
    /// becomes terminal, on failure it stays exactly where it was so the call
    /// can be retried.
    pub async fn advance(&mut self) -> SessionResult<Progress> {
        match &self.phase {
            Phase::Loading => return Err(SessionError::NotLoaded),
            Phase::Completed(result) => return Ok(Progress::Completed(result.clone())),
            Phase::InProgress => {}
        }

        if self.current_answer().is_none() {
            return Err(SessionError::AnswerRequired {
                question: self.cursor + 1,
            });
        }

        if self.cursor + 1 < self.questions.len() {
            self.cursor += 1;
            return Ok(Progress::Moved(self.cursor));
        }

        self.submit().await
    }

    async fn submit(&mut self) -> SessionResult<Progress> {
        let mut answers = Vec::with_capacity(self.questions.len());
        for (i, slot) in self.answers.iter().enumerate() {
            match slot {
                Some(choice) => answers.push(choice.value()),
                None => return Err(SessionError::AnswerRequired { question: i + 1 }),
            }
        }

        debug!(kind = %self.kind, answers = answers.len(), "Submitting answer set");

        match self.backend.submit(self.kind, answers).await {
            Ok(result) => {
                info!(
                    kind = %self.kind,
                    score = result.score,
                    category = %result.category,
                    "Assessment completed"
                );
                self.phase = Phase::Completed(result.clone());
                Ok(Progress::Completed(result))
            }
            Err(e) => {
                warn!(kind = %self.kind, error = %e, "Submission failed, session kept for retry");
                Err(SessionError::Submission(e))
            }
        }
    }

    /// Move back one question; a no-op at the first question.
    ///
    /// Never clears the answer recorded at the position left behind.
    pub fn retreat(&mut self) {
        if self.phase == Phase::InProgress && self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// The active test kind
    pub fn kind(&self) -> TestKind {
        self.kind
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Current question index
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of questions in the loaded set
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether no question set is loaded
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Text of the question at the cursor
    pub fn current_question(&self) -> Option<&str> {
        self.questions.get(self.cursor).map(String::as_str)
    }

    /// Recorded answer for the question at the cursor
    pub fn current_answer(&self) -> Option<Choice> {
        self.answers.get(self.cursor).copied().flatten()
    }

    /// The scored result once the session is complete
    pub fn result(&self) -> Option<&ScoreResult> {
        match &self.phase {
            Phase::Completed(result) => Some(result),
            _ => None,
        }
    }
}
