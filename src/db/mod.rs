pub mod memory;
pub mod menu_item;
pub mod pg;
pub mod restaurant;
pub mod review;
pub mod visit;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    errors::AppError,
    models::{
        MenuItem, MenuItemUpsert, NewRestaurant, NewReview, NewVisit, Restaurant,
        RestaurantVisit, Review, ReviewRow,
    },
};

pub use memory::MemoryStore;
pub use pg::PgStore;

/// Typed access to the four journal record kinds. Query and mutate only; every
/// derived view is computed by the caller.
#[async_trait]
pub trait JournalStore: Send + Sync {
    async fn get_restaurant(&self, restaurant_id: Uuid) -> Result<Option<Restaurant>, AppError>;

    async fn find_restaurant_by_place_id(
        &self,
        google_place_id: &str,
    ) -> Result<Option<Uuid>, AppError>;

    /// Must never produce two rows for the same non-null `google_place_id`.
    async fn insert_restaurant(
        &self,
        restaurant: NewRestaurant,
        created_by: Option<Uuid>,
    ) -> Result<Uuid, AppError>;

    /// Ordered by name.
    async fn list_menu_items(&self, restaurant_id: Uuid) -> Result<Vec<MenuItem>, AppError>;

    async fn get_menu_item(&self, menu_item_id: Uuid) -> Result<Option<MenuItem>, AppError>;

    async fn search_menu_items(
        &self,
        restaurant_id: Uuid,
        query: &str,
        limit: i64,
    ) -> Result<Vec<MenuItem>, AppError>;

    /// Idempotent on `(restaurant_id, name)`.
    async fn upsert_menu_item(&self, item: MenuItemUpsert) -> Result<MenuItem, AppError>;

    async fn insert_review(&self, review: NewReview) -> Result<Review, AppError>;

    async fn user_reviews_for_restaurant(
        &self,
        user_id: Uuid,
        restaurant_id: Uuid,
    ) -> Result<Vec<Review>, AppError>;

    async fn user_reviews_for_item(
        &self,
        user_id: Uuid,
        menu_item_id: Uuid,
    ) -> Result<Vec<Review>, AppError>;

    /// Newest first.
    async fn user_review_rows(&self, user_id: Uuid) -> Result<Vec<ReviewRow>, AppError>;

    async fn insert_visit(&self, visit: NewVisit) -> Result<RestaurantVisit, AppError>;
}
