use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::{errors::AppError, models::PlaceResult};

const PLACES_BASE_URL: &str = "https://places.googleapis.com/v1";
const FIELD_MASK: &str = "places.id,places.displayName,places.formattedAddress,places.location,places.rating,places.photos,places.addressComponents";
const MAX_RESULTS: u32 = 10;
const NEARBY_RADIUS_M: f64 = 2000.0;
const SEARCH_BIAS_RADIUS_M: f64 = 10000.0;

#[derive(Error, Debug)]
pub enum PlacesError {
    #[error("Google Maps API key not configured")]
    NotConfigured,

    #[error("Places provider error: {0}")]
    Upstream(String),
}

impl From<PlacesError> for AppError {
    fn from(err: PlacesError) -> Self {
        match err {
            PlacesError::NotConfigured => AppError::EnvError(err.to_string()),
            PlacesError::Upstream(_) => AppError::Upstream(err.to_string()),
        }
    }
}

#[async_trait]
pub trait PlacesProvider: Send + Sync {
    async fn nearby(&self, lat: f64, lng: f64) -> Result<Vec<PlaceResult>, PlacesError>;

    /// `bias` nudges ranking towards a point; it does not filter results.
    async fn text_search(
        &self,
        query: &str,
        bias: Option<(f64, f64)>,
    ) -> Result<Vec<PlaceResult>, PlacesError>;
}

#[derive(Debug, Default, Deserialize)]
struct PlacesResponse {
    #[serde(default)]
    places: Vec<RawPlace>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlace {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub display_name: Option<LocalizedText>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub location: Option<LatLng>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub photos: Vec<PhotoRef>,
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LocalizedText {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct LatLng {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PhotoRef {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressComponent {
    #[serde(default)]
    pub long_text: String,
    #[serde(default)]
    pub types: Vec<String>,
}

/// Maps a provider record onto [`PlaceResult`]. The city is the first
/// `locality` component; the photo is the first photo with a reference.
pub fn normalize_place(raw: RawPlace, api_key: &str) -> PlaceResult {
    let city = raw
        .address_components
        .iter()
        .find(|c| c.types.iter().any(|t| t == "locality"))
        .map(|c| c.long_text.clone())
        .unwrap_or_default();

    let photo_url = raw
        .photos
        .iter()
        .find(|p| !p.name.is_empty())
        .map(|p| {
            format!(
                "{PLACES_BASE_URL}/{}/media?maxHeightPx=400&maxWidthPx=400&key={api_key}",
                p.name
            )
        });

    let (lat, lng) = raw
        .location
        .map(|l| (l.latitude, l.longitude))
        .unwrap_or((None, None));

    PlaceResult {
        place_id: raw.id,
        name: raw.display_name.map(|d| d.text).unwrap_or_default(),
        formatted_address: raw.formatted_address.unwrap_or_default(),
        city,
        lat,
        lng,
        rating: raw.rating,
        photo_url,
    }
}

pub struct GooglePlaces {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl GooglePlaces {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: PLACES_BASE_URL.to_string(),
        }
    }

    async fn post(&self, endpoint: &str, body: serde_json::Value) -> Result<Vec<PlaceResult>, PlacesError> {
        let api_key = self.api_key.as_deref().ok_or(PlacesError::NotConfigured)?;
        let url = format!("{}/{}", self.base_url, endpoint);

        let res = self
            .client
            .post(&url)
            .header("X-Goog-Api-Key", api_key)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach places provider: {}", e);
                PlacesError::Upstream(e.to_string())
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let detail = res.text().await.unwrap_or_default();
            tracing::error!("Places API error ({}): {}", status, detail);
            return Err(PlacesError::Upstream(format!("provider returned {status}")));
        }

        let data: PlacesResponse = res.json().await.map_err(|e| {
            tracing::error!("Invalid JSON from places provider: {}", e);
            PlacesError::Upstream(format!("Invalid JSON response: {e}"))
        })?;

        Ok(data
            .places
            .into_iter()
            .map(|raw| normalize_place(raw, api_key))
            .collect())
    }
}

#[async_trait]
impl PlacesProvider for GooglePlaces {
    async fn nearby(&self, lat: f64, lng: f64) -> Result<Vec<PlaceResult>, PlacesError> {
        let body = json!({
            "includedTypes": ["restaurant"],
            "maxResultCount": MAX_RESULTS,
            "locationRestriction": {
                "circle": {
                    "center": { "latitude": lat, "longitude": lng },
                    "radius": NEARBY_RADIUS_M,
                }
            }
        });

        self.post("places:searchNearby", body).await
    }

    async fn text_search(
        &self,
        query: &str,
        bias: Option<(f64, f64)>,
    ) -> Result<Vec<PlaceResult>, PlacesError> {
        let mut body = json!({
            "textQuery": format!("{query} restaurant"),
            "includedType": "restaurant",
            "maxResultCount": MAX_RESULTS,
        });

        if let Some((lat, lng)) = bias {
            body["locationBias"] = json!({
                "circle": {
                    "center": { "latitude": lat, "longitude": lng },
                    "radius": SEARCH_BIAS_RADIUS_M,
                }
            });
        }

        self.post("places:searchText", body).await
    }
}
