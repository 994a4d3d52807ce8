use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RestaurantVisit {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub user_id: Uuid,
    pub visited_at: DateTime<Utc>,
    pub overall_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVisit {
    pub restaurant_id: Uuid,
    pub user_id: Uuid,
    pub visited_at: DateTime<Utc>,
    pub overall_notes: Option<String>,
}
