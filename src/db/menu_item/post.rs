use sqlx::PgPool;

use crate::{
    errors::AppError,
    models::{MenuItem, MenuItemUpsert},
};

/// Upsert on `(restaurant_id, name)`. Safe to retry: a repeated call attaches
/// to the same row and only fills in fields the caller actually provided.
pub async fn upsert_menu_item(item: MenuItemUpsert, postgres: &PgPool) -> Result<MenuItem, AppError> {
    let menu_item = sqlx::query_as::<_, MenuItem>(
        "INSERT INTO menu_items (restaurant_id, name, category, description, price, created_by)
		VALUES ($1, $2, $3, $4, $5, $6)
		ON CONFLICT (restaurant_id, name) DO UPDATE SET
			category = COALESCE(EXCLUDED.category, menu_items.category),
			description = COALESCE(EXCLUDED.description, menu_items.description),
			price = COALESCE(EXCLUDED.price, menu_items.price)
		RETURNING id, restaurant_id, name, category, description, price, created_by, created_at",
    )
    .bind(item.restaurant_id)
    .bind(&item.name)
    .bind(&item.category)
    .bind(&item.description)
    .bind(item.price)
    .bind(item.created_by)
    .fetch_one(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to upsert menu item: {}", e)))?;

    tracing::debug!(
        "Upserted menu item '{}' (ID: {}) for restaurant {}",
        menu_item.name,
        menu_item.id,
        menu_item.restaurant_id
    );

    Ok(menu_item)
}
