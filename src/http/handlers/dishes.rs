use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::AuthClaims,
    journal::dishes::{
        AddDishOutcome, AddDishRequest, ItemWithLatestReview, add_dish, item_with_latest_review,
        suggest_dishes,
    },
    models::MenuItem,
    state::AppState,
};

#[derive(Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub q: String,
}

pub async fn suggest_dishes_handler(
    State(state): State<AppState>,
    _claims: AuthClaims,
    Path(restaurant_id): Path<Uuid>,
    Query(query): Query<SuggestQuery>,
) -> Result<Json<Vec<MenuItem>>, (StatusCode, String)> {
    let items = suggest_dishes(state.store.as_ref(), restaurant_id, &query.q)
        .await
        .map_err(|e| {
            tracing::error!("Error searching dishes: {}", e);
            e.to_response()
        })?;

    Ok(Json(items))
}

pub async fn add_dish_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(restaurant_id): Path<Uuid>,
    Json(payload): Json<AddDishRequest>,
) -> Result<Json<AddDishOutcome>, (StatusCode, String)> {
    let user_id = claims.user_id()?;
    let today = Utc::now().date_naive();

    let outcome = add_dish(state.store.as_ref(), restaurant_id, user_id, payload, today)
        .await
        .map_err(|e| {
            tracing::error!("Error saving dish: {}", e);
            e.to_response()
        })?;

    tracing::info!(
        "Dish {} saved at restaurant {}",
        outcome.menu_item_id,
        restaurant_id
    );
    Ok(Json(outcome))
}

pub async fn get_item_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path((restaurant_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ItemWithLatestReview>, (StatusCode, String)> {
    let user_id = claims.user_id()?;

    let item = item_with_latest_review(state.store.as_ref(), user_id, restaurant_id, item_id)
        .await
        .map_err(|e| {
            tracing::error!("Error retrieving menu item {}: {}", item_id, e);
            e.to_response()
        })?;

    Ok(Json(item))
}
