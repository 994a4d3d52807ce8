pub mod dishes;
pub mod export;
pub mod me;
pub mod menu_scan;
pub mod places;
pub mod quick_review;
pub mod restaurant;

pub use dishes::{add_dish_handler, get_item_handler, suggest_dishes_handler};
pub use export::export_csv_handler;
pub use me::{history_handler, recent_restaurants_handler};
pub use menu_scan::{menu_import_handler, menu_scan_handler};
pub use places::{nearby_places_handler, search_places_handler};
pub use quick_review::{
    quick_review_save_handler, quick_review_start_handler, quick_review_transition_handler,
};
pub use restaurant::{create_restaurant_handler, get_restaurant_handler};
