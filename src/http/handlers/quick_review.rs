use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::AuthClaims,
    errors::AppError,
    journal::quick_review::{QuickReview, QuickReviewAction, QuickReviewSaved, start_quick_review},
    state::AppState,
};

#[derive(Deserialize)]
pub struct TransitionPayload {
    pub state: QuickReview,
    pub action: QuickReviewAction,
}

#[derive(Deserialize)]
pub struct SavePayload {
    pub state: QuickReview,
}

fn check_restaurant(session: &QuickReview, restaurant_id: Uuid) -> Result<(), (StatusCode, String)> {
    if session.restaurant_id != restaurant_id {
        return Err(AppError::BadRequest(
            "Quick review belongs to a different restaurant".into(),
        )
        .to_response());
    }
    Ok(())
}

pub async fn quick_review_start_handler(
    State(state): State<AppState>,
    _claims: AuthClaims,
    Path(restaurant_id): Path<Uuid>,
) -> Result<Json<QuickReview>, (StatusCode, String)> {
    let session = start_quick_review(state.store.as_ref(), restaurant_id)
        .await
        .map_err(|e| {
            tracing::error!("Error starting quick review: {}", e);
            e.to_response()
        })?;

    Ok(Json(session))
}

pub async fn quick_review_transition_handler(
    _claims: AuthClaims,
    Path(restaurant_id): Path<Uuid>,
    Json(payload): Json<TransitionPayload>,
) -> Result<Json<QuickReview>, (StatusCode, String)> {
    check_restaurant(&payload.state, restaurant_id)?;

    let mut session = payload.state;
    session
        .apply(payload.action)
        .map_err(|e| AppError::from(e).to_response())?;

    Ok(Json(session))
}

pub async fn quick_review_save_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(restaurant_id): Path<Uuid>,
    Json(payload): Json<SavePayload>,
) -> Result<Json<QuickReviewSaved>, (StatusCode, String)> {
    let user_id = claims.user_id()?;
    check_restaurant(&payload.state, restaurant_id)?;

    let saved = payload
        .state
        .save(state.store.as_ref(), user_id, Utc::now())
        .await
        .map_err(|e| e.to_response())?;

    Ok(Json(saved))
}
