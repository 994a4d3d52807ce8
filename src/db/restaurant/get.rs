use sqlx::PgPool;
use uuid::Uuid;

use crate::{errors::AppError, models::Restaurant};

pub async fn get_restaurant_by_id(
    restaurant_id: Uuid,
    postgres: &PgPool,
) -> Result<Option<Restaurant>, AppError> {
    sqlx::query_as::<_, Restaurant>(
        "SELECT id, google_place_id, name, address, city, latitude, longitude,
			photo_url, created_by, created_at
			FROM restaurants
			WHERE id = $1",
    )
    .bind(restaurant_id)
    .fetch_optional(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to fetch restaurant: {}", e)))
}

pub async fn get_restaurant_id_by_place_id(
    google_place_id: &str,
    postgres: &PgPool,
) -> Result<Option<Uuid>, AppError> {
    sqlx::query_scalar::<_, Uuid>("SELECT id FROM restaurants WHERE google_place_id = $1")
        .bind(google_place_id)
        .fetch_optional(postgres)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to look up restaurant: {}", e)))
}
