use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    http::handlers::{
        add_dish_handler, create_restaurant_handler, export_csv_handler, get_item_handler,
        get_restaurant_handler, history_handler, menu_import_handler, menu_scan_handler,
        nearby_places_handler, quick_review_save_handler, quick_review_start_handler,
        quick_review_transition_handler, recent_restaurants_handler, search_places_handler,
        suggest_dishes_handler,
    },
    state::AppState,
};

pub fn create_http_routes(state: AppState) -> Router {
    Router::new()
        .route("/places/nearby", get(nearby_places_handler))
        .route("/places/search", get(search_places_handler))
        .route("/restaurants", post(create_restaurant_handler))
        .route("/restaurants/{id}", get(get_restaurant_handler))
        .route(
            "/restaurants/{id}/items",
            get(suggest_dishes_handler).post(add_dish_handler),
        )
        .route("/restaurants/{id}/items/{item_id}", get(get_item_handler))
        .route("/restaurants/{id}/menu-scan", post(menu_scan_handler))
        .route("/restaurants/{id}/menu-import", post(menu_import_handler))
        .route(
            "/restaurants/{id}/quick-review/start",
            post(quick_review_start_handler),
        )
        .route(
            "/restaurants/{id}/quick-review/transition",
            post(quick_review_transition_handler),
        )
        .route(
            "/restaurants/{id}/quick-review/save",
            post(quick_review_save_handler),
        )
        .route("/me/recent-restaurants", get(recent_restaurants_handler))
        .route("/me/history", get(history_handler))
        .route("/export", get(export_csv_handler))
        .with_state(state)
}
