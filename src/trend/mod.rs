//! Mood trend estimation.
//!
//! Reduces a date-ascending mood history to a coarse three-way label by
//! comparing the average of the most recent scores against the average of
//! everything before them. Lower clinical scores are healthier (PHQ-9/GAD-7
//! convention), so a falling average reads as improving.

use serde::{Deserialize, Serialize};

use crate::api::MoodEntry;

/// How many trailing entries form the "recent" window
const RECENT_WINDOW: usize = 3;

/// Coarse trend over the user's mood history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Recent average below the historical average
    Improving,
    /// Too little data, or the averages are tied
    Stable,
    /// Recent average above the historical average
    Attention,
}

impl Trend {
    /// User-facing label
    pub fn label(&self) -> &'static str {
        match self {
            Trend::Improving => "Improving",
            Trend::Stable => "Stable",
            Trend::Attention => "Needs Support",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Improving => write!(f, "improving"),
            Trend::Stable => write!(f, "stable"),
            Trend::Attention => write!(f, "attention"),
        }
    }
}

/// Estimate the trend over a history ordered by date ascending.
///
/// The last [`RECENT_WINDOW`] entries form the recent window; everything
/// before them is the past. With fewer than two entries there is nothing to
/// compare. When the history is shorter than the window the past is empty,
/// and an empty past is treated as a tie: comparing against a 0/0 average
/// must not manufacture an "improving" or "attention" verdict.
pub fn estimate(history: &[MoodEntry]) -> Trend {
    if history.len() < 2 {
        return Trend::Stable;
    }

    let split = history.len().saturating_sub(RECENT_WINDOW);
    let (past, recent) = history.split_at(split);

    if past.is_empty() {
        return Trend::Stable;
    }

    let avg_recent = mean(recent);
    let avg_past = mean(past);

    if avg_recent < avg_past {
        Trend::Improving
    } else if avg_recent > avg_past {
        Trend::Attention
    } else {
        Trend::Stable
    }
}

fn mean(entries: &[MoodEntry]) -> f64 {
    entries.iter().map(|e| e.score).sum::<f64>() / entries.len() as f64
}

/// Summary of a mood history for display: totals, latest entry, and trend.
#[derive(Debug, Clone, Serialize)]
pub struct TrendSummary {
    pub total_tests: usize,
    pub latest: Option<MoodEntry>,
    pub trend: Trend,
}

impl TrendSummary {
    /// Summarise a history ordered by date ascending
    pub fn from_history(history: &[MoodEntry]) -> Self {
        Self {
            total_tests: history.len(),
            latest: history.last().cloned(),
            trend: estimate(history),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::TestKind;
    use chrono::NaiveDate;

    fn entries(scores: &[f64]) -> Vec<MoodEntry> {
        scores
            .iter()
            .enumerate()
            .map(|(i, &score)| MoodEntry {
                date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
                    + chrono::Days::new(i as u64),
                score,
                category: "Mild".to_string(),
                test_type: TestKind::Phq9,
            })
            .collect()
    }

    #[test]
    fn test_empty_history_is_stable() {
        assert_eq!(estimate(&[]), Trend::Stable);
    }

    #[test]
    fn test_single_entry_is_stable() {
        assert_eq!(estimate(&entries(&[5.0])), Trend::Stable);
    }

    #[test]
    fn test_falling_scores_are_improving() {
        // recent avg (6,4,2)/3 = 4 < past avg (10,8)/2 = 9
        assert_eq!(
            estimate(&entries(&[10.0, 8.0, 6.0, 4.0, 2.0])),
            Trend::Improving
        );
    }

    #[test]
    fn test_rising_scores_need_attention() {
        assert_eq!(
            estimate(&entries(&[2.0, 4.0, 6.0, 8.0, 10.0])),
            Trend::Attention
        );
    }

    #[test]
    fn test_flat_scores_are_stable() {
        assert_eq!(estimate(&entries(&[5.0, 5.0, 5.0, 5.0])), Trend::Stable);
    }

    #[test]
    fn test_short_history_with_empty_past_is_stable() {
        // Two or three entries leave no past window to compare against; the
        // tie fallback must win rather than a NaN comparison
        assert_eq!(estimate(&entries(&[9.0, 1.0])), Trend::Stable);
        assert_eq!(estimate(&entries(&[9.0, 5.0, 1.0])), Trend::Stable);
    }

    #[test]
    fn test_four_entries_compare_first_against_last_three() {
        // past = [10], recent = [2, 2, 2]
        assert_eq!(estimate(&entries(&[10.0, 2.0, 2.0, 2.0])), Trend::Improving);
        // past = [1], recent = [8, 8, 8]
        assert_eq!(estimate(&entries(&[1.0, 8.0, 8.0, 8.0])), Trend::Attention);
    }

    #[test]
    fn test_trend_wire_tags() {
        assert_eq!(
            serde_json::to_value(Trend::Improving).unwrap(),
            serde_json::json!("improving")
        );
        assert_eq!(
            serde_json::to_value(Trend::Attention).unwrap(),
            serde_json::json!("attention")
        );
    }

    #[test]
    fn test_trend_labels() {
        assert_eq!(Trend::Improving.label(), "Improving");
        assert_eq!(Trend::Attention.label(), "Needs Support");
    }

    #[test]
    fn test_summary_reflects_latest_entry() {
        let history = entries(&[10.0, 8.0, 6.0, 4.0, 2.0]);
        let summary = TrendSummary::from_history(&history);

        assert_eq!(summary.total_tests, 5);
        assert_eq!(summary.trend, Trend::Improving);
        assert_eq!(summary.latest.unwrap().score, 2.0);
    }

    #[test]
    fn test_summary_of_empty_history() {
        let summary = TrendSummary::from_history(&[]);
        assert_eq!(summary.total_tests, 0);
        assert!(summary.latest.is_none());
        assert_eq!(summary.trend, Trend::Stable);
    }
}
