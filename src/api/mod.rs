//! Liora backend API client and wire types.
//!
//! The backend is consumed as an opaque JSON request/response collaborator:
//! question sets, scoring, mood history, chat replies, community posts,
//! bookings, and journal entries all live behind it.

mod client;
mod types;

pub use client::LioraClient;
pub use types::{
    BookingReply, BookingRequest, ChatReply, ChatRequest, CommunityPost, CommunityPostRequest,
    HealthReply, JournalEntry, JournalRequest, MoodEntry, QuestionSet, ReactRequest, ReactionKind,
    Reactions, ScoreResult, StatusReply, SubmitRequest,
};
