#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header},
};
use menu_journal_be::{
    auth::generate_jwt,
    build_app,
    config::Config,
    db::MemoryStore,
    models::PlaceResult,
    services::{
        ocr::MockMenuOcr,
        places::{PlacesError, PlacesProvider},
    },
    state::AppState,
};
use tower::ServiceExt;
use uuid::Uuid;

pub const SECRET: &str = "test-secret";

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://unused".into(),
        jwt_secret: SECRET.into(),
        google_maps_api_key: Some("test-key".into()),
        port: 0,
        allowed_origins: vec!["http://localhost:3000".into()],
        ocr_delay: Duration::ZERO,
    }
}

/// Canned places provider. `None` simulates the provider being down.
pub struct FakePlaces {
    pub results: Option<Vec<PlaceResult>>,
}

#[async_trait]
impl PlacesProvider for FakePlaces {
    async fn nearby(&self, _lat: f64, _lng: f64) -> Result<Vec<PlaceResult>, PlacesError> {
        self.results
            .clone()
            .ok_or_else(|| PlacesError::Upstream("connection refused".into()))
    }

    async fn text_search(
        &self,
        _query: &str,
        _bias: Option<(f64, f64)>,
    ) -> Result<Vec<PlaceResult>, PlacesError> {
        self.results
            .clone()
            .ok_or_else(|| PlacesError::Upstream("connection refused".into()))
    }
}

pub fn place(id: &str, name: &str) -> PlaceResult {
    PlaceResult {
        place_id: id.into(),
        name: name.into(),
        formatted_address: "1 Main St".into(),
        city: "Springfield".into(),
        lat: Some(40.0),
        lng: Some(-74.0),
        rating: Some(4.5),
        photo_url: None,
    }
}

pub fn app_with(store: Arc<MemoryStore>, places: Arc<dyn PlacesProvider>) -> Router {
    build_app(AppState {
        store,
        places,
        ocr: Arc::new(MockMenuOcr::new(Duration::ZERO)),
        config: Arc::new(test_config()),
    })
}

pub fn app(store: Arc<MemoryStore>) -> Router {
    app_with(
        store,
        Arc::new(FakePlaces {
            results: Some(vec![place("ChIJ1", "Luigi's")]),
        }),
    )
}

pub fn token_for(user_id: Uuid) -> String {
    generate_jwt(user_id, None, SECRET).unwrap()
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn post_bytes(uri: &str, token: &str, bytes: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "image/jpeg")
        .body(Body::from(bytes))
        .unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}
