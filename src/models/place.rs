use serde::{Deserialize, Serialize};

/// Canonical place shape handed to clients, whatever the provider returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    pub place_id: String,
    pub name: String,
    pub formatted_address: String,
    pub city: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub rating: Option<f64>,
    pub photo_url: Option<String>,
}
