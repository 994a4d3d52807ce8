use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    db::JournalStore,
    journal::non_empty,
    models::MenuItemUpsert,
    services::ocr::OcrItem,
};

/// An OCR result row as shown to the user, ticked by default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrCandidate {
    pub name: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "checked_by_default")]
    pub checked: bool,
}

fn checked_by_default() -> bool {
    true
}

impl From<OcrItem> for OcrCandidate {
    fn from(item: OcrItem) -> Self {
        Self {
            name: item.name,
            price: item.price,
            category: item.category,
            checked: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub failed: usize,
}

pub fn candidates_from(items: Vec<OcrItem>) -> Vec<OcrCandidate> {
    items.into_iter().map(OcrCandidate::from).collect()
}

/// Upserts every ticked row onto the restaurant's menu. A row that fails is
/// logged and left out of the count; the rest still go through.
pub async fn import_candidates(
    store: &dyn JournalStore,
    restaurant_id: Uuid,
    user_id: Uuid,
    candidates: Vec<OcrCandidate>,
) -> ImportSummary {
    let mut summary = ImportSummary::default();

    for candidate in candidates.into_iter().filter(|c| c.checked) {
        let name = candidate.name.trim().to_string();
        if name.is_empty() {
            tracing::warn!("Skipping OCR row with an empty dish name");
            summary.failed += 1;
            continue;
        }

        let upsert = MenuItemUpsert {
            restaurant_id,
            name,
            category: non_empty(candidate.category),
            description: None,
            price: candidate.price,
            created_by: Some(user_id),
        };

        match store.upsert_menu_item(upsert).await {
            Ok(_) => summary.imported += 1,
            Err(e) => {
                tracing::error!("Failed to import '{}': {}", candidate.name, e);
                summary.failed += 1;
            }
        }
    }

    tracing::info!(
        "Imported {} menu items for restaurant {} ({} failed)",
        summary.imported,
        restaurant_id,
        summary.failed
    );

    summary
}
