use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::AuthClaims,
    journal::{
        history::OutcomeFilter,
        restaurants::{RestaurantDetail, create_or_reuse_restaurant, restaurant_detail},
    },
    models::NewRestaurant,
    state::AppState,
};

#[derive(Serialize)]
pub struct CreatedRestaurant {
    pub id: Uuid,
}

#[derive(Deserialize)]
pub struct DetailQuery {
    #[serde(default)]
    pub filter: OutcomeFilter,
}

pub async fn create_restaurant_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    Json(payload): Json<NewRestaurant>,
) -> Result<Json<CreatedRestaurant>, (StatusCode, String)> {
    let user_id = claims.user_id()?;

    let id = create_or_reuse_restaurant(state.store.as_ref(), payload, user_id)
        .await
        .map_err(|e| {
            tracing::error!("Error creating restaurant: {}", e);
            e.to_response()
        })?;

    tracing::info!("Restaurant {} ready for user {}", id, user_id);
    Ok(Json(CreatedRestaurant { id }))
}

pub async fn get_restaurant_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(restaurant_id): Path<Uuid>,
    Query(query): Query<DetailQuery>,
) -> Result<Json<RestaurantDetail>, (StatusCode, String)> {
    let user_id = claims.user_id()?;

    let detail = restaurant_detail(state.store.as_ref(), user_id, restaurant_id, query.filter)
        .await
        .map_err(|e| {
            tracing::error!("Error retrieving restaurant {}: {}", restaurant_id, e);
            e.to_response()
        })?;

    Ok(Json(detail))
}
