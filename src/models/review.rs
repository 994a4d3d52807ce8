use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: Uuid,
    pub menu_item_id: Uuid,
    pub user_id: Uuid,
    /// 1 to 5 stars, `None` when the user skipped the rating.
    pub rating: Option<i16>,
    pub would_order_again: bool,
    pub notes: Option<String>,
    pub photo_url: Option<String>,
    pub visited_at: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReview {
    pub menu_item_id: Uuid,
    pub user_id: Uuid,
    pub rating: Option<i16>,
    pub would_order_again: bool,
    pub notes: Option<String>,
    pub photo_url: Option<String>,
    pub visited_at: Option<NaiveDate>,
}

/// A review joined with its dish and restaurant, as the history, rollup and
/// export views consume it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ReviewRow {
    pub review_id: Uuid,
    pub menu_item_id: Uuid,
    pub dish_name: String,
    pub category: Option<String>,
    pub restaurant_id: Uuid,
    pub restaurant_name: String,
    pub city: Option<String>,
    pub restaurant_photo_url: Option<String>,
    pub rating: Option<i16>,
    pub would_order_again: bool,
    pub notes: Option<String>,
    pub visited_at: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}
