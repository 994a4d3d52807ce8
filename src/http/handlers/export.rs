use axum::{
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::{
    auth::AuthClaims,
    journal::export::{EXPORT_FILENAME, reviews_to_csv},
    state::AppState,
};

pub async fn export_csv_handler(
    State(state): State<AppState>,
    claims: AuthClaims,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let user_id = claims.user_id()?;

    let rows = state.store.user_review_rows(user_id).await.map_err(|e| {
        tracing::error!("Error loading reviews for export: {}", e);
        e.to_response()
    })?;
    let csv = reviews_to_csv(&rows).map_err(|e| e.to_response())?;

    tracing::info!("Exported {} reviews for user {}", rows.len(), user_id);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        csv,
    ))
}
