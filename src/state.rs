use std::sync::Arc;

use crate::{
    config::Config,
    db::JournalStore,
    services::{ocr::MenuOcr, places::PlacesProvider},
};

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub places: Arc<dyn PlacesProvider>,
    pub ocr: Arc<dyn MenuOcr>,
    pub config: Arc<Config>,
}

pub type SharedStore = Arc<dyn JournalStore>;
