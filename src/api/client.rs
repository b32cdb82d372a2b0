use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::types::{
    BookingReply, BookingRequest, ChatReply, ChatRequest, CommunityPost, CommunityPostRequest,
    HealthReply, JournalEntry, JournalRequest, MoodEntry, QuestionSet, ReactRequest, ReactionKind,
    ScoreResult, StatusReply, SubmitRequest,
};
use crate::assessment::{AssessmentBackend, TestKind};
use crate::config::{ApiConfig, RequestConfig};
use crate::error::{ApiError, ApiResult};
use crate::identity::UserId;

/// Client for the Liora backend API.
///
/// Every request carries the user identity in the `X-User-ID` header, which is
/// how the backend scopes chat history, mood results, and journal entries.
#[derive(Clone)]
pub struct LioraClient {
    client: Client,
    base_url: String,
    user_id: UserId,
    request_config: RequestConfig,
}

impl LioraClient {
    /// Create a new client for the configured backend
    pub fn new(
        config: &ApiConfig,
        user_id: UserId,
        request_config: RequestConfig,
    ) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(request_config.timeout_ms))
            .build()
            .map_err(ApiError::Http)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_id,
            request_config,
        })
    }

    /// Check backend liveness
    pub async fn health(&self) -> ApiResult<HealthReply> {
        self.execute_get("/health").await
    }

    /// Fetch the ordered question set for a test kind
    pub async fn get_questions(&self, kind: TestKind) -> ApiResult<QuestionSet> {
        self.get_with_retries(&format!("/get-questions?test_type={kind}"))
            .await
    }

    /// Submit a complete answer set for scoring.
    ///
    /// Single-shot: the assessment session owns retry semantics, so a failed
    /// submission is surfaced immediately rather than retried here.
    pub async fn submit_answers(&self, kind: TestKind, answers: Vec<u8>) -> ApiResult<ScoreResult> {
        let request = SubmitRequest {
            test_type: kind,
            answers,
        };
        let result: ScoreResult = self.execute_post("/submit-answers", &request).await?;
        info!(
            test_type = %kind,
            score = result.score,
            category = %result.category,
            "Answers scored"
        );
        Ok(result)
    }

    /// Fetch the user's scored sessions, ordered by date ascending
    pub async fn mood_history(&self) -> ApiResult<Vec<MoodEntry>> {
        let mut history: Vec<MoodEntry> = self.get_with_retries("/mood-history").await?;
        // Display order invariant: ascending by date
        history.sort_by_key(|entry| entry.date);
        Ok(history)
    }

    /// Send a message to the support companion
    pub async fn chat(&self, text: impl Into<String>) -> ApiResult<ChatReply> {
        let request = ChatRequest { text: text.into() };
        self.execute_post("/chat", &request).await
    }

    /// Fetch the community feed, newest first
    pub async fn community_feed(&self) -> ApiResult<Vec<CommunityPost>> {
        self.get_with_retries("/community-feed").await
    }

    /// Publish an anonymised post to the community feed
    pub async fn post_to_community(&self, message: impl Into<String>) -> ApiResult<StatusReply> {
        let request = CommunityPostRequest {
            message: message.into(),
        };
        self.execute_post("/community-post", &request).await
    }

    /// React to a community post
    pub async fn react(&self, post_id: impl Into<String>, kind: ReactionKind) -> ApiResult<StatusReply> {
        let request = ReactRequest {
            id: post_id.into(),
            kind,
        };
        self.execute_post("/react", &request).await
    }

    /// Book a counselling appointment
    pub async fn book_counselling(&self, booking: &BookingRequest) -> ApiResult<BookingReply> {
        self.execute_post("/book-counselling", booking).await
    }

    /// Save a journal entry
    pub async fn write_journal(&self, text: impl Into<String>) -> ApiResult<StatusReply> {
        let request = JournalRequest { text: text.into() };
        self.execute_post("/journal", &request).await
    }

    /// Fetch past journal entries, newest first
    pub async fn journal_history(&self) -> ApiResult<Vec<JournalEntry>> {
        self.get_with_retries("/journal").await
    }

    /// Get the base URL (for testing)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET an idempotent endpoint with exponential-backoff retries
    async fn get_with_retries<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let mut last_error = None;
        let mut retries = 0;

        while retries <= self.request_config.max_retries {
            if retries > 0 {
                let delay = Duration::from_millis(
                    self.request_config.retry_delay_ms * (2_u64.pow(retries - 1)),
                );
                warn!(
                    path = %path,
                    retry = retries,
                    delay_ms = delay.as_millis(),
                    "Retrying backend request"
                );
                tokio::time::sleep(delay).await;
            }

            let start = Instant::now();

            match self.execute_get(path).await {
                Ok(value) => {
                    let latency = start.elapsed();
                    debug!(
                        path = %path,
                        latency_ms = latency.as_millis(),
                        "Backend request succeeded"
                    );
                    return Ok(value);
                }
                Err(e) => {
                    let latency = start.elapsed();
                    error!(
                        path = %path,
                        error = %e,
                        latency_ms = latency.as_millis(),
                        retry = retries,
                        "Backend request failed"
                    );
                    last_error = Some(e);
                    retries += 1;
                }
            }
        }

        Err(ApiError::Unavailable {
            message: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "Unknown error".to_string()),
            retries,
        })
    }

    /// Execute a single GET request (internal)
    async fn execute_get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .header("X-User-ID", self.user_id.to_string())
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        self.parse_response(response).await
    }

    /// Execute a single POST request (internal)
    async fn execute_post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .header("X-User-ID", self.user_id.to_string())
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        self.parse_response(response).await
    }

    fn map_send_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout {
                timeout_ms: self.request_config.timeout_ms,
            }
        } else {
            ApiError::Http(e)
        }
    }

    async fn parse_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: error_body,
            });
        }

        response.json().await.map_err(|e| ApiError::InvalidResponse {
            message: format!("Failed to parse response: {}", e),
        })
    }
}

#[async_trait]
impl AssessmentBackend for LioraClient {
    async fn fetch_questions(&self, kind: TestKind) -> ApiResult<Vec<String>> {
        Ok(self.get_questions(kind).await?.questions)
    }

    async fn submit(&self, kind: TestKind, answers: Vec<u8>) -> ApiResult<ScoreResult> {
        self.submit_answers(kind, answers).await
    }
}
