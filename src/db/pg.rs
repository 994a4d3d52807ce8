use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::{JournalStore, menu_item, restaurant, review, visit},
    errors::AppError,
    models::{
        MenuItem, MenuItemUpsert, NewRestaurant, NewReview, NewVisit, Restaurant,
        RestaurantVisit, Review, ReviewRow,
    },
};

#[derive(Clone)]
pub struct PgStore {
    postgres: PgPool,
}

impl PgStore {
    pub fn new(postgres: PgPool) -> Self {
        Self { postgres }
    }

    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations")
            .run(&self.postgres)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to run migrations: {}", e)))
    }
}

#[async_trait]
impl JournalStore for PgStore {
    async fn get_restaurant(&self, restaurant_id: Uuid) -> Result<Option<Restaurant>, AppError> {
        restaurant::get::get_restaurant_by_id(restaurant_id, &self.postgres).await
    }

    async fn find_restaurant_by_place_id(
        &self,
        google_place_id: &str,
    ) -> Result<Option<Uuid>, AppError> {
        restaurant::get::get_restaurant_id_by_place_id(google_place_id, &self.postgres).await
    }

    async fn insert_restaurant(
        &self,
        new_restaurant: NewRestaurant,
        created_by: Option<Uuid>,
    ) -> Result<Uuid, AppError> {
        restaurant::post::insert_restaurant(new_restaurant, created_by, &self.postgres).await
    }

    async fn list_menu_items(&self, restaurant_id: Uuid) -> Result<Vec<MenuItem>, AppError> {
        menu_item::get::get_menu_items(restaurant_id, &self.postgres).await
    }

    async fn get_menu_item(&self, menu_item_id: Uuid) -> Result<Option<MenuItem>, AppError> {
        menu_item::get::get_menu_item_by_id(menu_item_id, &self.postgres).await
    }

    async fn search_menu_items(
        &self,
        restaurant_id: Uuid,
        query: &str,
        limit: i64,
    ) -> Result<Vec<MenuItem>, AppError> {
        menu_item::get::search_menu_items(restaurant_id, query, limit, &self.postgres).await
    }

    async fn upsert_menu_item(&self, item: MenuItemUpsert) -> Result<MenuItem, AppError> {
        menu_item::post::upsert_menu_item(item, &self.postgres).await
    }

    async fn insert_review(&self, new_review: NewReview) -> Result<Review, AppError> {
        review::post::insert_review(new_review, &self.postgres).await
    }

    async fn user_reviews_for_restaurant(
        &self,
        user_id: Uuid,
        restaurant_id: Uuid,
    ) -> Result<Vec<Review>, AppError> {
        review::get::get_user_reviews_for_restaurant(user_id, restaurant_id, &self.postgres).await
    }

    async fn user_reviews_for_item(
        &self,
        user_id: Uuid,
        menu_item_id: Uuid,
    ) -> Result<Vec<Review>, AppError> {
        review::get::get_user_reviews_for_item(user_id, menu_item_id, &self.postgres).await
    }

    async fn user_review_rows(&self, user_id: Uuid) -> Result<Vec<ReviewRow>, AppError> {
        review::get::get_user_review_rows(user_id, &self.postgres).await
    }

    async fn insert_visit(&self, new_visit: NewVisit) -> Result<RestaurantVisit, AppError> {
        visit::post::insert_visit(new_visit, &self.postgres).await
    }
}
