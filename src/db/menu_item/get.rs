use sqlx::PgPool;
use uuid::Uuid;

use crate::{errors::AppError, models::MenuItem};

const MENU_ITEM_COLUMNS: &str =
    "id, restaurant_id, name, category, description, price, created_by, created_at";

pub async fn get_menu_items(
    restaurant_id: Uuid,
    postgres: &PgPool,
) -> Result<Vec<MenuItem>, AppError> {
    sqlx::query_as::<_, MenuItem>(&format!(
        "SELECT {MENU_ITEM_COLUMNS} FROM menu_items WHERE restaurant_id = $1 ORDER BY name"
    ))
    .bind(restaurant_id)
    .fetch_all(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch menu items: {}", e)))
}

pub async fn get_menu_item_by_id(
    menu_item_id: Uuid,
    postgres: &PgPool,
) -> Result<Option<MenuItem>, AppError> {
    sqlx::query_as::<_, MenuItem>(&format!(
        "SELECT {MENU_ITEM_COLUMNS} FROM menu_items WHERE id = $1"
    ))
    .bind(menu_item_id)
    .fetch_optional(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch menu item: {}", e)))
}

/// Case-insensitive substring search over a restaurant's dish names.
pub async fn search_menu_items(
    restaurant_id: Uuid,
    query: &str,
    limit: i64,
    postgres: &PgPool,
) -> Result<Vec<MenuItem>, AppError> {
    let pattern = format!("%{}%", escape_like(query));

    sqlx::query_as::<_, MenuItem>(&format!(
        "SELECT {MENU_ITEM_COLUMNS} FROM menu_items
			WHERE restaurant_id = $1 AND name ILIKE $2 ESCAPE '\\'
			ORDER BY name
			LIMIT $3"
    ))
    .bind(restaurant_id)
    .bind(pattern)
    .bind(limit)
    .fetch_all(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to search menu items: {}", e)))
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("pizza"), "pizza");
    }
}
