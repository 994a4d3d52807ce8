use sqlx::PgPool;

use crate::{
    errors::AppError,
    models::{NewVisit, RestaurantVisit},
};

pub async fn insert_visit(visit: NewVisit, postgres: &PgPool) -> Result<RestaurantVisit, AppError> {
    let visit = sqlx::query_as::<_, RestaurantVisit>(
        "INSERT INTO restaurant_visits (restaurant_id, user_id, visited_at, overall_notes)
		VALUES ($1, $2, $3, $4)
		RETURNING id, restaurant_id, user_id, visited_at, overall_notes, created_at",
    )
    .bind(visit.restaurant_id)
    .bind(visit.user_id)
    .bind(visit.visited_at)
    .bind(&visit.overall_notes)
    .fetch_one(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to log visit: {}", e)))?;

    tracing::info!(
        "Logged visit {} to restaurant {} for user {}",
        visit.id,
        visit.restaurant_id,
        visit.user_id
    );

    Ok(visit)
}
