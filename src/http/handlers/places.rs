use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::{errors::AppError, models::PlaceResult, state::AppState};

#[derive(Deserialize)]
pub struct NearbyQuery {
    pub lat: Option<String>,
    pub lng: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
}

#[derive(Serialize)]
pub struct PlacesResponse {
    pub places: Vec<PlaceResult>,
}

fn parse_coordinate(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

fn parse_point(lat: Option<&str>, lng: Option<&str>) -> Option<(f64, f64)> {
    Some((parse_coordinate(lat)?, parse_coordinate(lng)?))
}

pub async fn nearby_places_handler(
    State(state): State<AppState>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<PlacesResponse>, (StatusCode, String)> {
    let (lat, lng) = parse_point(query.lat.as_deref(), query.lng.as_deref())
        .ok_or_else(|| AppError::BadRequest("lat and lng are required".into()).to_response())?;

    let places = state.places.nearby(lat, lng).await.map_err(|e| {
        tracing::error!("Nearby search failed: {}", e);
        AppError::from(e).to_response()
    })?;

    tracing::info!("Found {} places near {},{}", places.len(), lat, lng);
    Ok(Json(PlacesResponse { places }))
}

pub async fn search_places_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<PlacesResponse>, (StatusCode, String)> {
    let text = query
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::BadRequest("query is required".into()).to_response())?;
    let bias = parse_point(query.lat.as_deref(), query.lng.as_deref());

    let places = state.places.text_search(text, bias).await.map_err(|e| {
        tracing::error!("Text search for '{}' failed: {}", text, e);
        AppError::from(e).to_response()
    })?;

    tracing::info!("Found {} places for '{}'", places.len(), text);
    Ok(Json(PlacesResponse { places }))
}
