use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::Utc;

use crate::{
    auth::AuthClaims,
    journal::{
        history::{HistoryItem, HistoryQuery, filter_history},
        rollup::{RecentRestaurant, recent_restaurants},
    },
    state::AppState,
};

pub async fn recent_restaurants_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
) -> Result<Json<Vec<RecentRestaurant>>, (StatusCode, String)> {
    let user_id = claims.user_id()?;

    let rows = state.store.user_review_rows(user_id).await.map_err(|e| {
        tracing::error!("Error loading reviews for user {}: {}", user_id, e);
        e.to_response()
    })?;

    Ok(Json(recent_restaurants(&rows)))
}

pub async fn history_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<HistoryItem>>, (StatusCode, String)> {
    let user_id = claims.user_id()?;

    let rows = state.store.user_review_rows(user_id).await.map_err(|e| {
        tracing::error!("Error loading history for user {}: {}", user_id, e);
        e.to_response()
    })?;

    let items = rows.into_iter().map(HistoryItem::from).collect();
    Ok(Json(filter_history(items, &query, Utc::now())))
}
