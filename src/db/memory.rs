use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    db::JournalStore,
    errors::AppError,
    models::{
        MenuItem, MenuItemUpsert, NewRestaurant, NewReview, NewVisit, Restaurant,
        RestaurantVisit, Review, ReviewRow,
    },
};

/// In-process store with the same uniqueness and reference rules as the
/// Postgres schema. Backs the test suite and local demos.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    restaurants: Vec<Restaurant>,
    menu_items: Vec<MenuItem>,
    reviews: Vec<Review>,
    visits: Vec<RestaurantVisit>,
    last_timestamp: Option<DateTime<Utc>>,
}

impl Tables {
    // Strictly increasing, so "newest first" is never ambiguous.
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let ts = match self.last_timestamp {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_timestamp = Some(ts);
        ts
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn restaurant_count(&self) -> usize {
        self.inner.lock().await.restaurants.len()
    }

    pub async fn menu_item_count(&self) -> usize {
        self.inner.lock().await.menu_items.len()
    }

    pub async fn review_count(&self) -> usize {
        self.inner.lock().await.reviews.len()
    }

    pub async fn visits(&self) -> Vec<RestaurantVisit> {
        self.inner.lock().await.visits.clone()
    }
}

#[async_trait]
impl JournalStore for MemoryStore {
    async fn get_restaurant(&self, restaurant_id: Uuid) -> Result<Option<Restaurant>, AppError> {
        let tables = self.inner.lock().await;
        Ok(tables
            .restaurants
            .iter()
            .find(|r| r.id == restaurant_id)
            .cloned())
    }

    async fn find_restaurant_by_place_id(
        &self,
        google_place_id: &str,
    ) -> Result<Option<Uuid>, AppError> {
        let tables = self.inner.lock().await;
        Ok(tables
            .restaurants
            .iter()
            .find(|r| r.google_place_id.as_deref() == Some(google_place_id))
            .map(|r| r.id))
    }

    async fn insert_restaurant(
        &self,
        restaurant: NewRestaurant,
        created_by: Option<Uuid>,
    ) -> Result<Uuid, AppError> {
        let mut tables = self.inner.lock().await;

        if let Some(place_id) = restaurant.google_place_id.as_deref() {
            if let Some(existing) = tables
                .restaurants
                .iter()
                .find(|r| r.google_place_id.as_deref() == Some(place_id))
            {
                return Ok(existing.id);
            }
        }

        let created_at = tables.next_timestamp();
        let id = Uuid::new_v4();
        tables.restaurants.push(Restaurant {
            id,
            google_place_id: restaurant.google_place_id,
            name: restaurant.name,
            address: restaurant.address,
            city: restaurant.city,
            latitude: restaurant.latitude,
            longitude: restaurant.longitude,
            photo_url: restaurant.photo_url,
            created_by,
            created_at,
        });

        Ok(id)
    }

    async fn list_menu_items(&self, restaurant_id: Uuid) -> Result<Vec<MenuItem>, AppError> {
        let tables = self.inner.lock().await;
        let mut items: Vec<MenuItem> = tables
            .menu_items
            .iter()
            .filter(|mi| mi.restaurant_id == restaurant_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    async fn get_menu_item(&self, menu_item_id: Uuid) -> Result<Option<MenuItem>, AppError> {
        let tables = self.inner.lock().await;
        Ok(tables
            .menu_items
            .iter()
            .find(|mi| mi.id == menu_item_id)
            .cloned())
    }

    async fn search_menu_items(
        &self,
        restaurant_id: Uuid,
        query: &str,
        limit: i64,
    ) -> Result<Vec<MenuItem>, AppError> {
        let needle = query.to_lowercase();
        let mut items = self.list_menu_items(restaurant_id).await?;
        items.retain(|mi| mi.name.to_lowercase().contains(&needle));
        items.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(items)
    }

    async fn upsert_menu_item(&self, item: MenuItemUpsert) -> Result<MenuItem, AppError> {
        let mut tables = self.inner.lock().await;

        if !tables.restaurants.iter().any(|r| r.id == item.restaurant_id) {
            return Err(AppError::DatabaseError(format!(
                "Failed to upsert menu item: restaurant {} does not exist",
                item.restaurant_id
            )));
        }

        if let Some(existing) = tables
            .menu_items
            .iter_mut()
            .find(|mi| mi.restaurant_id == item.restaurant_id && mi.name == item.name)
        {
            if item.category.is_some() {
                existing.category = item.category;
            }
            if item.description.is_some() {
                existing.description = item.description;
            }
            if item.price.is_some() {
                existing.price = item.price;
            }
            return Ok(existing.clone());
        }

        let created_at = tables.next_timestamp();
        let menu_item = MenuItem {
            id: Uuid::new_v4(),
            restaurant_id: item.restaurant_id,
            name: item.name,
            category: item.category,
            description: item.description,
            price: item.price,
            created_by: item.created_by,
            created_at,
        };
        tables.menu_items.push(menu_item.clone());

        Ok(menu_item)
    }

    async fn insert_review(&self, review: NewReview) -> Result<Review, AppError> {
        let mut tables = self.inner.lock().await;

        if !tables.menu_items.iter().any(|mi| mi.id == review.menu_item_id) {
            return Err(AppError::DatabaseError(format!(
                "Failed to create review: menu item {} does not exist",
                review.menu_item_id
            )));
        }
        if let Some(rating) = review.rating {
            if !(1..=5).contains(&rating) {
                return Err(AppError::DatabaseError(format!(
                    "Failed to create review: rating {rating} violates check constraint"
                )));
            }
        }

        let created_at = tables.next_timestamp();
        let review = Review {
            id: Uuid::new_v4(),
            menu_item_id: review.menu_item_id,
            user_id: review.user_id,
            rating: review.rating,
            would_order_again: review.would_order_again,
            notes: review.notes,
            photo_url: review.photo_url,
            visited_at: review.visited_at,
            created_at,
        };
        tables.reviews.push(review.clone());

        Ok(review)
    }

    async fn user_reviews_for_restaurant(
        &self,
        user_id: Uuid,
        restaurant_id: Uuid,
    ) -> Result<Vec<Review>, AppError> {
        let tables = self.inner.lock().await;
        let mut reviews: Vec<Review> = tables
            .reviews
            .iter()
            .filter(|r| r.user_id == user_id)
            .filter(|r| {
                tables
                    .menu_items
                    .iter()
                    .any(|mi| mi.id == r.menu_item_id && mi.restaurant_id == restaurant_id)
            })
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reviews)
    }

    async fn user_reviews_for_item(
        &self,
        user_id: Uuid,
        menu_item_id: Uuid,
    ) -> Result<Vec<Review>, AppError> {
        let tables = self.inner.lock().await;
        let mut reviews: Vec<Review> = tables
            .reviews
            .iter()
            .filter(|r| r.user_id == user_id && r.menu_item_id == menu_item_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reviews)
    }

    async fn user_review_rows(&self, user_id: Uuid) -> Result<Vec<ReviewRow>, AppError> {
        let tables = self.inner.lock().await;
        let mut rows = Vec::new();

        for review in tables.reviews.iter().filter(|r| r.user_id == user_id) {
            let Some(menu_item) = tables
                .menu_items
                .iter()
                .find(|mi| mi.id == review.menu_item_id)
            else {
                continue;
            };
            let Some(restaurant) = tables
                .restaurants
                .iter()
                .find(|r| r.id == menu_item.restaurant_id)
            else {
                continue;
            };

            rows.push(ReviewRow {
                review_id: review.id,
                menu_item_id: menu_item.id,
                dish_name: menu_item.name.clone(),
                category: menu_item.category.clone(),
                restaurant_id: restaurant.id,
                restaurant_name: restaurant.name.clone(),
                city: restaurant.city.clone(),
                restaurant_photo_url: restaurant.photo_url.clone(),
                rating: review.rating,
                would_order_again: review.would_order_again,
                notes: review.notes.clone(),
                visited_at: review.visited_at,
                created_at: review.created_at,
            });
        }

        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn insert_visit(&self, visit: NewVisit) -> Result<RestaurantVisit, AppError> {
        let mut tables = self.inner.lock().await;

        if !tables.restaurants.iter().any(|r| r.id == visit.restaurant_id) {
            return Err(AppError::DatabaseError(format!(
                "Failed to log visit: restaurant {} does not exist",
                visit.restaurant_id
            )));
        }

        let created_at = tables.next_timestamp();
        let visit = RestaurantVisit {
            id: Uuid::new_v4(),
            restaurant_id: visit.restaurant_id,
            user_id: visit.user_id,
            visited_at: visit.visited_at,
            overall_notes: visit.overall_notes,
            created_at,
        };
        tables.visits.push(visit.clone());

        Ok(visit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(id: &str) -> NewRestaurant {
        NewRestaurant {
            google_place_id: Some(id.into()),
            name: "Luigi's".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn same_place_id_yields_one_row() {
        let store = MemoryStore::new();

        let first = store.insert_restaurant(place("gp-1"), None).await.unwrap();
        let second = store.insert_restaurant(place("gp-1"), None).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.restaurant_count().await, 1);
    }

    #[tokio::test]
    async fn upsert_keeps_existing_fields_when_not_provided() {
        let store = MemoryStore::new();
        let restaurant_id = store.insert_restaurant(place("gp-2"), None).await.unwrap();
        let user_id = Uuid::new_v4();

        let mut first = MenuItemUpsert::named(restaurant_id, "Tiramisu", user_id);
        first.category = Some("Dessert".into());
        let first = store.upsert_menu_item(first).await.unwrap();

        let second = store
            .upsert_menu_item(MenuItemUpsert::named(restaurant_id, "Tiramisu", user_id))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.category.as_deref(), Some("Dessert"));
        assert_eq!(store.menu_item_count().await, 1);
    }

    #[tokio::test]
    async fn review_for_unknown_item_is_rejected() {
        let store = MemoryStore::new();

        let err = store
            .insert_review(NewReview {
                menu_item_id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                rating: None,
                would_order_again: true,
                notes: None,
                photo_url: None,
                visited_at: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::DatabaseError(_)));
    }
}
