use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::AuthClaims,
    errors::AppError,
    journal::ocr_import::{ImportSummary, OcrCandidate, candidates_from, import_candidates},
    state::AppState,
};

#[derive(Deserialize)]
pub struct MenuImportPayload {
    #[serde(default)]
    pub items: Vec<OcrCandidate>,
}

async fn require_restaurant(state: &AppState, restaurant_id: Uuid) -> Result<(), AppError> {
    match state.store.get_restaurant(restaurant_id).await? {
        Some(_) => Ok(()),
        None => Err(AppError::NotFound("Restaurant not found".into())),
    }
}

/// Takes the raw photo bytes as the request body.
pub async fn menu_scan_handler(
    State(state): State<AppState>,
    _claims: AuthClaims,
    Path(restaurant_id): Path<Uuid>,
    body: Bytes,
) -> Result<Json<Vec<OcrCandidate>>, (StatusCode, String)> {
    if body.is_empty() {
        return Err(AppError::BadRequest("Menu photo is required".into()).to_response());
    }
    require_restaurant(&state, restaurant_id)
        .await
        .map_err(|e| e.to_response())?;

    let items = state
        .ocr
        .extract_items_from_image(&body)
        .await
        .map_err(|e| {
            tracing::error!("Menu scan failed for restaurant {}: {}", restaurant_id, e);
            AppError::from(e).to_response()
        })?;

    tracing::info!(
        "Menu scan found {} items for restaurant {}",
        items.len(),
        restaurant_id
    );
    Ok(Json(candidates_from(items)))
}

pub async fn menu_import_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
    Path(restaurant_id): Path<Uuid>,
    Json(payload): Json<MenuImportPayload>,
) -> Result<Json<ImportSummary>, (StatusCode, String)> {
    let user_id = claims.user_id()?;
    require_restaurant(&state, restaurant_id)
        .await
        .map_err(|e| e.to_response())?;

    let summary =
        import_candidates(state.store.as_ref(), restaurant_id, user_id, payload.items).await;

    Ok(Json(summary))
}
