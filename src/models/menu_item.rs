use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MenuItem {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Insert-or-attach payload keyed on `(restaurant_id, name)`.
///
/// Optional fields left as `None` keep whatever the existing row already has.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemUpsert {
    pub restaurant_id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub created_by: Option<Uuid>,
}

impl MenuItemUpsert {
    pub fn named(restaurant_id: Uuid, name: impl Into<String>, created_by: Uuid) -> Self {
        Self {
            restaurant_id,
            name: name.into(),
            category: None,
            description: None,
            price: None,
            created_by: Some(created_by),
        }
    }
}
