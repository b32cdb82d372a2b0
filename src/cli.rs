//! CLI commands for the Liora client.
//!
//! Each subcommand maps to one backend surface: assessments, mood history,
//! chat, the community feed, counselling booking, and the journal.

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::api::{BookingRequest, LioraClient, ReactionKind};
use crate::assessment::{AssessmentSession, Choice, Progress, TestKind};
use crate::error::SessionError;
use crate::trend::TrendSummary;

/// Liora command-line client
#[derive(Parser, Debug)]
#[command(name = "liora", version, about = "Client for the Liora mental-health support backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Take a self-assessment questionnaire
    Assess {
        /// Test kind: phq9 (depression) or gad7 (anxiety)
        #[arg(long, default_value = "phq9")]
        test: String,
    },

    /// Show mood history with the current trend
    History,

    /// Talk to the support companion (interactive when no message is given)
    Chat {
        /// Single message to send
        message: Option<String>,
    },

    /// Show the community feed
    Feed,

    /// Post anonymously to the community
    Post {
        /// Message text
        message: String,
    },

    /// React to a community post
    React {
        /// Post id from the feed
        id: String,

        /// Reaction: heart, hug, or flower
        kind: String,
    },

    /// Book a counselling appointment
    Book {
        /// Your name
        #[arg(long)]
        name: String,

        /// Contact email
        #[arg(long)]
        email: String,

        /// Counsellor type (e.g. on-campus)
        #[arg(long, default_value = "on-campus")]
        counsellor_type: String,

        /// Appointment date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Appointment time (HH:MM)
        #[arg(long)]
        time: String,
    },

    /// Write a journal entry, or list past entries when no text is given
    Journal {
        /// Entry text
        text: Option<String>,
    },

    /// Check backend liveness
    Health,
}

/// Result of CLI command execution.
pub struct CliResult {
    /// Exit code (0 = success)
    pub exit_code: i32,
    /// Output message
    pub message: String,
}

impl CliResult {
    /// Create a success result with the given message.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            exit_code: 0,
            message: message.into(),
        }
    }

    /// Create an error result with the given message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            exit_code: 1,
            message: message.into(),
        }
    }
}

/// Execute a CLI command against the backend.
pub async fn execute_command(command: Commands, client: &LioraClient) -> CliResult {
    match command {
        Commands::Assess { test } => execute_assess(client, &test).await,
        Commands::History => execute_history(client).await,
        Commands::Chat { message } => execute_chat(client, message).await,
        Commands::Feed => execute_feed(client).await,
        Commands::Post { message } => execute_post(client, message).await,
        Commands::React { id, kind } => execute_react(client, id, &kind).await,
        Commands::Book {
            name,
            email,
            counsellor_type,
            date,
            time,
        } => execute_book(client, name, email, counsellor_type, date, time).await,
        Commands::Journal { text } => execute_journal(client, text).await,
        Commands::Health => execute_health(client).await,
    }
}

async fn execute_assess(client: &LioraClient, test: &str) -> CliResult {
    let Some(kind) = TestKind::parse(test) else {
        return CliResult::error(format!(
            "Unknown test kind '{}': expected phq9 or gad7",
            test
        ));
    };

    let mut session = match AssessmentSession::start(client.clone(), kind).await {
        Ok(s) => s,
        Err(e) => return CliResult::error(format!("Failed to load questions: {}", e)),
    };

    println!("{} ({} questions)", kind.title(), session.len());
    println!("Answer with 0-3, 'p' to go back, 'q' to quit.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        println!(
            "Question {} of {}: {}",
            session.cursor() + 1,
            session.len(),
            session.current_question().unwrap_or_default()
        );
        for choice in Choice::ALL {
            let marker = if session.current_answer() == Some(choice) {
                "*"
            } else {
                " "
            };
            println!("  {}[{}] {}", marker, choice.value(), choice.label());
        }

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => return CliResult::success("Assessment abandoned"),
            Err(e) => return CliResult::error(format!("Failed to read input: {}", e)),
        };

        match line.trim() {
            "q" => return CliResult::success("Assessment abandoned"),
            "p" => {
                session.retreat();
                continue;
            }
            input => {
                let Some(choice) = input.parse::<u8>().ok().and_then(Choice::from_index) else {
                    println!("Please enter 0-3, 'p', or 'q'.\n");
                    continue;
                };
                session.record_answer(choice);
            }
        }

        loop {
            match session.advance().await {
                Ok(Progress::Moved(_)) => break,
                Ok(Progress::Completed(result)) => {
                    return CliResult::success(format!(
                        "\nAssessment complete: score {} ({})",
                        result.score, result.category
                    ));
                }
                Err(SessionError::Submission(e)) => {
                    println!("Submission failed: {}. Press Enter to retry or 'q' to quit.", e);
                    match lines.next_line().await {
                        Ok(Some(line)) if line.trim() == "q" => {
                            return CliResult::success("Assessment abandoned")
                        }
                        Ok(Some(_)) => continue,
                        _ => return CliResult::success("Assessment abandoned"),
                    }
                }
                Err(e) => {
                    println!("{}\n", e);
                    break;
                }
            }
        }
    }
}

async fn execute_history(client: &LioraClient) -> CliResult {
    let history = match client.mood_history().await {
        Ok(h) => h,
        Err(e) => return CliResult::error(format!("Failed to fetch mood history: {}", e)),
    };

    if history.is_empty() {
        return CliResult::success(
            "No mood history yet. Take your first assessment with 'liora assess'.",
        );
    }

    let summary = TrendSummary::from_history(&history);

    let mut out = String::new();
    for entry in &history {
        out.push_str(&format!(
            "{}  {:>5}  {:<17} {}\n",
            entry.date,
            entry.score,
            entry.category,
            entry.test_type.title()
        ));
    }
    out.push_str(&format!(
        "\nTotal tests: {}  Trend: {}",
        summary.total_tests,
        summary.trend.label()
    ));
    if let Some(latest) = summary.latest {
        out.push_str(&format!("  Latest: {}", latest.category));
    }

    CliResult::success(out)
}

async fn execute_chat(client: &LioraClient, message: Option<String>) -> CliResult {
    if let Some(text) = message {
        return match client.chat(text).await {
            Ok(reply) => CliResult::success(reply.bot),
            Err(e) => CliResult::error(format!("Chat failed: {}", e)),
        };
    }

    println!("Chatting with Liora. Empty line to exit.\n");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            _ => return CliResult::success("Take care."),
        };
        let text = line.trim();
        if text.is_empty() {
            return CliResult::success("Take care.");
        }

        match client.chat(text).await {
            Ok(reply) => println!("{}\n", reply.bot),
            Err(e) => {
                debug!(error = %e, "Chat request failed");
                println!("I'm having trouble connecting right now. Let's try again soon.\n");
            }
        }
    }
}

async fn execute_feed(client: &LioraClient) -> CliResult {
    match client.community_feed().await {
        Ok(posts) => {
            if posts.is_empty() {
                return CliResult::success("The community feed is empty.");
            }
            let mut out = String::new();
            for post in posts {
                out.push_str(&format!(
                    "[{}] {} ({}): {}\n    hearts {}  hugs {}  flowers {}\n",
                    post.date,
                    post.name,
                    post.id,
                    post.message,
                    post.reactions.heart,
                    post.reactions.hug,
                    post.reactions.flower
                ));
            }
            CliResult::success(out.trim_end().to_string())
        }
        Err(e) => CliResult::error(format!("Failed to fetch community feed: {}", e)),
    }
}

async fn execute_post(client: &LioraClient, message: String) -> CliResult {
    match client.post_to_community(message).await {
        Ok(_) => CliResult::success("Posted to the community."),
        Err(e) => CliResult::error(format!("Failed to post: {}", e)),
    }
}

async fn execute_react(client: &LioraClient, id: String, kind: &str) -> CliResult {
    let kind: ReactionKind = match kind.parse() {
        Ok(k) => k,
        Err(e) => return CliResult::error(e),
    };

    match client.react(id, kind).await {
        Ok(_) => CliResult::success(format!("Sent a {}.", kind)),
        Err(e) => CliResult::error(format!("Failed to react: {}", e)),
    }
}

async fn execute_book(
    client: &LioraClient,
    name: String,
    email: String,
    counsellor_type: String,
    date: String,
    time: String,
) -> CliResult {
    let booking = BookingRequest::new(name, email, date, time).with_counsellor_type(counsellor_type);

    match client.book_counselling(&booking).await {
        Ok(reply) if reply.success => CliResult::success("Appointment booked."),
        Ok(_) => CliResult::error("Booking was not accepted."),
        Err(e) => CliResult::error(format!("Failed to book: {}", e)),
    }
}

async fn execute_journal(client: &LioraClient, text: Option<String>) -> CliResult {
    match text {
        Some(text) => match client.write_journal(text).await {
            Ok(_) => CliResult::success("Journal entry saved."),
            Err(e) => CliResult::error(format!("Failed to save entry: {}", e)),
        },
        None => match client.journal_history().await {
            Ok(entries) => {
                if entries.is_empty() {
                    return CliResult::success("No journal entries yet.");
                }
                let mut out = String::new();
                for entry in entries {
                    out.push_str(&format!("{}  {}\n", entry.date, entry.text));
                }
                CliResult::success(out.trim_end().to_string())
            }
            Err(e) => CliResult::error(format!("Failed to fetch journal: {}", e)),
        },
    }
}

async fn execute_health(client: &LioraClient) -> CliResult {
    match client.health().await {
        Ok(reply) if reply.ok => CliResult::success("Backend is up."),
        Ok(_) => CliResult::error("Backend reported not ok."),
        Err(e) => CliResult::error(format!("Backend unreachable: {}", e)),
    }
}
