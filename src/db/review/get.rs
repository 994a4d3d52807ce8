use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    errors::AppError,
    models::{Review, ReviewRow},
};

/// Every review the user wrote for dishes of one restaurant, newest first.
pub async fn get_user_reviews_for_restaurant(
    user_id: Uuid,
    restaurant_id: Uuid,
    postgres: &PgPool,
) -> Result<Vec<Review>, AppError> {
    sqlx::query_as::<_, Review>(
        "SELECT r.id, r.menu_item_id, r.user_id, r.rating, r.would_order_again,
			r.notes, r.photo_url, r.visited_at, r.created_at
			FROM reviews r
			JOIN menu_items mi ON mi.id = r.menu_item_id
			WHERE r.user_id = $1 AND mi.restaurant_id = $2
			ORDER BY r.created_at DESC",
    )
    .bind(user_id)
    .bind(restaurant_id)
    .fetch_all(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch reviews: {}", e)))
}

pub async fn get_user_reviews_for_item(
    user_id: Uuid,
    menu_item_id: Uuid,
    postgres: &PgPool,
) -> Result<Vec<Review>, AppError> {
    sqlx::query_as::<_, Review>(
        "SELECT id, menu_item_id, user_id, rating, would_order_again,
			notes, photo_url, visited_at, created_at
			FROM reviews
			WHERE user_id = $1 AND menu_item_id = $2
			ORDER BY created_at DESC",
    )
    .bind(user_id)
    .bind(menu_item_id)
    .fetch_all(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch reviews: {}", e)))
}

/// The user's whole journal joined with dish and restaurant, newest first.
pub async fn get_user_review_rows(
    user_id: Uuid,
    postgres: &PgPool,
) -> Result<Vec<ReviewRow>, AppError> {
    sqlx::query_as::<_, ReviewRow>(
        "SELECT r.id AS review_id, r.menu_item_id, mi.name AS dish_name, mi.category,
			rest.id AS restaurant_id, rest.name AS restaurant_name, rest.city,
			rest.photo_url AS restaurant_photo_url,
			r.rating, r.would_order_again, r.notes, r.visited_at, r.created_at
			FROM reviews r
			JOIN menu_items mi ON mi.id = r.menu_item_id
			JOIN restaurants rest ON rest.id = mi.restaurant_id
			WHERE r.user_id = $1
			ORDER BY r.created_at DESC",
    )
    .bind(user_id)
    .fetch_all(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch review history: {}", e)))
}
