use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::ReviewRow;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeFilter {
    #[default]
    All,
    /// Only dishes the user would order again.
    Yes,
    Skip,
}

impl OutcomeFilter {
    pub fn accepts(self, would_order_again: bool) -> bool {
        match self {
            OutcomeFilter::All => true,
            OutcomeFilter::Yes => would_order_again,
            OutcomeFilter::Skip => !would_order_again,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "30")]
    Last30Days,
    #[serde(rename = "180")]
    Last180Days,
    #[default]
    #[serde(rename = "all")]
    AllTime,
}

impl TimeRange {
    /// Oldest creation time still inside the range, `None` for all time.
    pub fn cutoff(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            TimeRange::Last30Days => Some(now - Duration::days(30)),
            TimeRange::Last180Days => Some(now - Duration::days(180)),
            TimeRange::AllTime => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub filter: OutcomeFilter,
    #[serde(default)]
    pub range: TimeRange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryItem {
    pub id: Uuid,
    pub dish_name: String,
    pub restaurant_name: String,
    pub restaurant_id: Uuid,
    pub would_order_again: bool,
    pub rating: Option<i16>,
    pub notes: Option<String>,
    pub visited_at: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub city: Option<String>,
}

impl From<ReviewRow> for HistoryItem {
    fn from(row: ReviewRow) -> Self {
        Self {
            id: row.review_id,
            dish_name: row.dish_name,
            restaurant_name: row.restaurant_name,
            restaurant_id: row.restaurant_id,
            would_order_again: row.would_order_again,
            rating: row.rating,
            notes: row.notes,
            visited_at: row.visited_at,
            created_at: row.created_at,
            city: row.city,
        }
    }
}

impl HistoryItem {
    fn matches_text(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.dish_name.to_lowercase().contains(needle)
            || self.restaurant_name.to_lowercase().contains(needle)
    }
}

/// Applies text, outcome and time-range filters together. Input order is kept.
pub fn filter_history(
    items: Vec<HistoryItem>,
    query: &HistoryQuery,
    now: DateTime<Utc>,
) -> Vec<HistoryItem> {
    let needle = query.q.to_lowercase();
    let cutoff = query.range.cutoff(now);

    items
        .into_iter()
        .filter(|item| item.matches_text(&needle))
        .filter(|item| query.filter.accepts(item.would_order_again))
        .filter(|item| cutoff.is_none_or(|cutoff| item.created_at >= cutoff))
        .collect()
}
