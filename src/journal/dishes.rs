use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    db::JournalStore,
    errors::AppError,
    journal::{non_empty, normalize_rating, rollup::latest_review},
    models::{MenuItem, MenuItemUpsert, NewReview, Review},
};

pub const SUGGESTION_LIMIT: i64 = 5;

#[derive(Debug, Clone, Deserialize)]
pub struct DishReviewInput {
    #[serde(default)]
    pub rating: Option<i16>,
    pub would_order_again: Option<bool>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// Adds a dish to a restaurant, or points at an existing one via `item_id`,
/// optionally reviewing it in the same step.
#[derive(Debug, Clone, Deserialize)]
pub struct AddDishRequest {
    #[serde(default)]
    pub item_id: Option<Uuid>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub review: Option<DishReviewInput>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddDishOutcome {
    pub menu_item_id: Uuid,
    pub review_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemWithLatestReview {
    pub item: MenuItem,
    pub latest_review: Option<Review>,
}

struct ValidReview {
    rating: Option<i16>,
    would_order_again: bool,
    notes: Option<String>,
    photo_url: Option<String>,
}

fn validate_review(input: DishReviewInput) -> Result<ValidReview, AppError> {
    let would_order_again = input
        .would_order_again
        .ok_or_else(|| AppError::Validation("Pick YES again or Skip before saving".into()))?;

    Ok(ValidReview {
        rating: normalize_rating(input.rating)?,
        would_order_again,
        notes: non_empty(input.notes),
        photo_url: non_empty(input.photo_url),
    })
}

pub async fn add_dish(
    store: &dyn JournalStore,
    restaurant_id: Uuid,
    user_id: Uuid,
    request: AddDishRequest,
    today: NaiveDate,
) -> Result<AddDishOutcome, AppError> {
    let name = request.name.trim().to_string();
    if request.item_id.is_none() && name.is_empty() {
        return Err(AppError::Validation("Dish name is required".into()));
    }
    if let Some(price) = request.price {
        if !price.is_finite() || price < 0.0 {
            return Err(AppError::Validation("Price must be a positive number".into()));
        }
    }
    let review = request.review.map(validate_review).transpose()?;

    let menu_item_id = match request.item_id {
        Some(item_id) => {
            let item = store
                .get_menu_item(item_id)
                .await?
                .filter(|mi| mi.restaurant_id == restaurant_id)
                .ok_or_else(|| AppError::NotFound("Menu item not found".into()))?;
            item.id
        }
        None => {
            let item = store
                .upsert_menu_item(MenuItemUpsert {
                    restaurant_id,
                    name,
                    category: non_empty(request.category),
                    description: None,
                    price: request.price,
                    created_by: Some(user_id),
                })
                .await?;
            item.id
        }
    };

    let review_id = match review {
        Some(review) => {
            let saved = store
                .insert_review(NewReview {
                    menu_item_id,
                    user_id,
                    rating: review.rating,
                    would_order_again: review.would_order_again,
                    notes: review.notes,
                    photo_url: review.photo_url,
                    visited_at: Some(today),
                })
                .await?;
            tracing::info!("Saved review {} for menu item {}", saved.id, menu_item_id);
            Some(saved.id)
        }
        None => None,
    };

    Ok(AddDishOutcome {
        menu_item_id,
        review_id,
    })
}

/// Autocomplete for the dish-name field. A blank query suggests nothing.
pub async fn suggest_dishes(
    store: &dyn JournalStore,
    restaurant_id: Uuid,
    query: &str,
) -> Result<Vec<MenuItem>, AppError> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }

    store
        .search_menu_items(restaurant_id, query, SUGGESTION_LIMIT)
        .await
}

/// Loads a dish together with the user's current review, for prefilling an
/// edit form.
pub async fn item_with_latest_review(
    store: &dyn JournalStore,
    user_id: Uuid,
    restaurant_id: Uuid,
    item_id: Uuid,
) -> Result<ItemWithLatestReview, AppError> {
    let item = store
        .get_menu_item(item_id)
        .await?
        .filter(|mi| mi.restaurant_id == restaurant_id)
        .ok_or_else(|| AppError::NotFound("Menu item not found".into()))?;

    let reviews = store.user_reviews_for_item(user_id, item_id).await?;

    Ok(ItemWithLatestReview {
        latest_review: latest_review(&reviews).cloned(),
        item,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::MemoryStore, models::NewRestaurant};

    async fn seeded() -> (MemoryStore, Uuid) {
        let store = MemoryStore::new();
        let restaurant_id = store
            .insert_restaurant(
                NewRestaurant {
                    name: "Luigi's".into(),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();
        (store, restaurant_id)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn request(name: &str, review: Option<DishReviewInput>) -> AddDishRequest {
        AddDishRequest {
            item_id: None,
            name: name.into(),
            category: None,
            price: None,
            review,
        }
    }

    #[tokio::test]
    async fn blank_name_is_rejected_before_touching_the_store() {
        let (store, restaurant_id) = seeded().await;

        let err = add_dish(&store, restaurant_id, Uuid::new_v4(), request("   ", None), today())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.menu_item_count().await, 0);
    }

    #[tokio::test]
    async fn review_without_outcome_is_rejected() {
        let (store, restaurant_id) = seeded().await;
        let review = DishReviewInput {
            rating: Some(4),
            would_order_again: None,
            notes: None,
            photo_url: None,
        };

        let err = add_dish(&store, restaurant_id, Uuid::new_v4(), request("Gnocchi", Some(review)), today())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.menu_item_count().await, 0);
    }

    #[tokio::test]
    async fn same_name_twice_attaches_to_one_item() {
        let (store, restaurant_id) = seeded().await;
        let user_id = Uuid::new_v4();
        let review = || DishReviewInput {
            rating: Some(0),
            would_order_again: Some(true),
            notes: Some(String::new()),
            photo_url: None,
        };

        let first = add_dish(&store, restaurant_id, user_id, request("Gnocchi", Some(review())), today())
            .await
            .unwrap();
        let second = add_dish(&store, restaurant_id, user_id, request("  Gnocchi ", Some(review())), today())
            .await
            .unwrap();

        assert_eq!(first.menu_item_id, second.menu_item_id);
        assert_eq!(store.menu_item_count().await, 1);
        assert_eq!(store.review_count().await, 2);

        let current = item_with_latest_review(&store, user_id, restaurant_id, first.menu_item_id)
            .await
            .unwrap();
        let latest = current.latest_review.unwrap();
        assert_eq!(Some(latest.id), second.review_id);
        assert_eq!(latest.rating, None);
        assert_eq!(latest.notes, None);
        assert_eq!(latest.visited_at, Some(today()));
    }

    #[tokio::test]
    async fn suggestions_are_case_insensitive_and_capped() {
        let (store, restaurant_id) = seeded().await;
        let user_id = Uuid::new_v4();
        for name in ["Pizza A", "Pizza B", "pizza c", "Pizza D", "Pizza E", "Pizza F", "Salad"] {
            add_dish(&store, restaurant_id, user_id, request(name, None), today())
                .await
                .unwrap();
        }

        let found = suggest_dishes(&store, restaurant_id, "PIZ").await.unwrap();
        assert_eq!(found.len(), 5);
        assert!(suggest_dishes(&store, restaurant_id, " ").await.unwrap().is_empty());
    }
}
