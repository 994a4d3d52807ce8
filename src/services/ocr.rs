use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::AppError;

/// A dish candidate read off a menu photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrItem {
    pub name: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("Menu text extraction failed: {0}")]
    Provider(String),
}

impl From<OcrError> for AppError {
    fn from(err: OcrError) -> Self {
        AppError::Upstream(err.to_string())
    }
}

#[async_trait]
pub trait MenuOcr: Send + Sync {
    /// An empty list means the provider found nothing; a provider failure is
    /// an `Err`.
    async fn extract_items_from_image(&self, image: &[u8]) -> Result<Vec<OcrItem>, OcrError>;
}

static SAMPLE_MENU: Lazy<Vec<OcrItem>> = Lazy::new(|| {
    [
        ("Caesar Salad", 12.99, "Appetizer"),
        ("Margherita Pizza", 16.99, "Main"),
        ("Grilled Salmon", 24.99, "Main"),
        ("Mushroom Risotto", 18.99, "Main"),
        ("Tiramisu", 9.99, "Dessert"),
        ("Garlic Bread", 7.99, "Appetizer"),
        ("Lemonade", 4.99, "Drink"),
    ]
    .into_iter()
    .map(|(name, price, category)| OcrItem {
        name: name.to_string(),
        price: Some(price),
        category: Some(category.to_string()),
    })
    .collect()
});

/// Stand-in until a real OCR provider is wired up: waits a little, then
/// returns the same sample menu for any image.
pub struct MockMenuOcr {
    delay: Duration,
}

impl MockMenuOcr {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl MenuOcr for MockMenuOcr {
    async fn extract_items_from_image(&self, image: &[u8]) -> Result<Vec<OcrItem>, OcrError> {
        tracing::debug!("Mock OCR processing {} byte image", image.len());
        tokio::time::sleep(self.delay).await;
        Ok(SAMPLE_MENU.clone())
    }
}
