use sqlx::PgPool;

use crate::{
    errors::AppError,
    models::{NewReview, Review},
};

pub async fn insert_review(review: NewReview, postgres: &PgPool) -> Result<Review, AppError> {
    let review = sqlx::query_as::<_, Review>(
        "INSERT INTO reviews
			(menu_item_id, user_id, rating, would_order_again, notes, photo_url, visited_at)
		VALUES ($1, $2, $3, $4, $5, $6, $7)
		RETURNING id, menu_item_id, user_id, rating, would_order_again,
			notes, photo_url, visited_at, created_at",
    )
    .bind(review.menu_item_id)
    .bind(review.user_id)
    .bind(review.rating)
    .bind(review.would_order_again)
    .bind(&review.notes)
    .bind(&review.photo_url)
    .bind(review.visited_at)
    .fetch_one(postgres)
    .await
    .map_err(|e| AppError::DatabaseError(format!("Failed to create review: {}", e)))?;

    Ok(review)
}
