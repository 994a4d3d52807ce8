use serde::Serialize;
use uuid::Uuid;

use crate::{
    db::JournalStore,
    errors::AppError,
    journal::{
        history::OutcomeFilter,
        non_empty,
        rollup::{ReviewedItem, break_down_items, filter_reviewed_items},
    },
    models::{NewRestaurant, Restaurant},
};

/// Returns the id of the restaurant for this place, creating it only when no
/// row carries the same `google_place_id` yet.
pub async fn create_or_reuse_restaurant(
    store: &dyn JournalStore,
    mut restaurant: NewRestaurant,
    user_id: Uuid,
) -> Result<Uuid, AppError> {
    restaurant.name = restaurant.name.trim().to_string();
    if restaurant.name.is_empty() {
        return Err(AppError::Validation("Restaurant name is required".into()));
    }
    restaurant.google_place_id = non_empty(restaurant.google_place_id);

    if let Some(place_id) = restaurant.google_place_id.as_deref() {
        if let Some(existing) = store.find_restaurant_by_place_id(place_id).await? {
            tracing::debug!("Reusing restaurant {} for place {}", existing, place_id);
            return Ok(existing);
        }
    }

    store.insert_restaurant(restaurant, Some(user_id)).await
}

#[derive(Debug, Clone, Serialize)]
pub struct RestaurantDetail {
    pub restaurant: Restaurant,
    /// Dishes the user has reviewed at least once, before the outcome filter.
    pub reviewed_count: usize,
    pub unreviewed_count: usize,
    pub items: Vec<ReviewedItem>,
}

pub async fn restaurant_detail(
    store: &dyn JournalStore,
    user_id: Uuid,
    restaurant_id: Uuid,
    filter: OutcomeFilter,
) -> Result<RestaurantDetail, AppError> {
    let restaurant = store
        .get_restaurant(restaurant_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Restaurant not found".into()))?;

    let items = store.list_menu_items(restaurant_id).await?;
    let reviews = store
        .user_reviews_for_restaurant(user_id, restaurant_id)
        .await?;

    let breakdown = break_down_items(items, &reviews);

    Ok(RestaurantDetail {
        restaurant,
        reviewed_count: breakdown.reviewed.len(),
        unreviewed_count: breakdown.unreviewed_count,
        items: filter_reviewed_items(breakdown.reviewed, filter),
    })
}
