use sqlx::PgPool;
use uuid::Uuid;

use crate::{errors::AppError, models::NewRestaurant};

/// Inserts a restaurant, or returns the id of the row already holding the same
/// `google_place_id`. Rows without a place id never conflict.
pub async fn insert_restaurant(
    restaurant: NewRestaurant,
    created_by: Option<Uuid>,
    postgres: &PgPool,
) -> Result<Uuid, AppError> {
    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO restaurants
			(google_place_id, name, address, city, latitude, longitude, photo_url, created_by)
		VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
		ON CONFLICT (google_place_id)
			DO UPDATE SET google_place_id = EXCLUDED.google_place_id
		RETURNING id",
    )
    .bind(&restaurant.google_place_id)
    .bind(&restaurant.name)
    .bind(&restaurant.address)
    .bind(&restaurant.city)
    .bind(restaurant.latitude)
    .bind(restaurant.longitude)
    .bind(&restaurant.photo_url)
    .bind(created_by)
    .fetch_one(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to create restaurant: {}", e)))?;

    tracing::info!("Stored restaurant: {} (ID: {})", restaurant.name, id);

    Ok(id)
}
