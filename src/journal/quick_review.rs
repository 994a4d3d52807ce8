use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    db::JournalStore,
    errors::AppError,
    journal::{non_empty, normalize_rating},
    models::{MenuItem, MenuItemUpsert, NewReview, NewVisit},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Selecting,
    Rating,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuickReviewError {
    #[error("Select at least one dish")]
    NothingSelected,

    #[error("Dish name is required")]
    EmptyDishName,

    #[error("Menu item {0} is not on this restaurant's menu")]
    UnknownItem(Uuid),

    #[error("Action is not available while {0:?}")]
    WrongStep(Step),

    #[error("No dish at position {0}")]
    EntryOutOfRange(usize),

    #[error("Rating must be between 0 and 5, got {0}")]
    InvalidRating(u8),

    #[error("Pick YES again or Skip for every dish")]
    OutcomeMissing,
}

impl From<QuickReviewError> for AppError {
    fn from(err: QuickReviewError) -> Self {
        AppError::Validation(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishOption {
    pub id: Uuid,
    pub name: String,
}

/// One dish being rated in step two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftDish {
    pub item_id: Option<Uuid>,
    pub name: String,
    pub is_new: bool,
    /// 0 means not rated.
    pub rating: u8,
    pub would_order_again: Option<bool>,
    pub notes: String,
}

impl DraftDish {
    fn blank(item_id: Option<Uuid>, name: String) -> Self {
        Self {
            is_new: item_id.is_none(),
            item_id,
            name,
            rating: 0,
            would_order_again: None,
            notes: String::new(),
        }
    }

    fn existing_item_id(&self) -> Option<Uuid> {
        self.item_id.filter(|_| !self.is_new)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DishEdit {
    pub rating: Option<u8>,
    pub would_order_again: Option<bool>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuickReviewAction {
    ToggleItem {
        item_id: Uuid,
    },
    AddNewDish {
        name: String,
    },
    Advance,
    Back,
    EditDish {
        index: usize,
        #[serde(default)]
        rating: Option<u8>,
        #[serde(default)]
        would_order_again: Option<bool>,
        #[serde(default)]
        notes: Option<String>,
    },
}

/// Whole view state of a quick-review session. Clients hold on to it between
/// requests and send it back with every action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickReview {
    pub restaurant_id: Uuid,
    pub step: Step,
    pub existing_items: Vec<DishOption>,
    pub selected_ids: BTreeSet<Uuid>,
    pub new_dishes: Vec<String>,
    pub dishes: Vec<DraftDish>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuickReviewSaved {
    pub saved: usize,
    pub review_ids: Vec<Uuid>,
    pub visit_id: Uuid,
}

impl QuickReview {
    pub fn new(restaurant_id: Uuid, menu: Vec<MenuItem>) -> Self {
        Self {
            restaurant_id,
            step: Step::Selecting,
            existing_items: menu
                .into_iter()
                .map(|mi| DishOption {
                    id: mi.id,
                    name: mi.name,
                })
                .collect(),
            selected_ids: BTreeSet::new(),
            new_dishes: Vec::new(),
            dishes: Vec::new(),
        }
    }

    pub fn apply(&mut self, action: QuickReviewAction) -> Result<(), QuickReviewError> {
        match action {
            QuickReviewAction::ToggleItem { item_id } => self.toggle_item(item_id),
            QuickReviewAction::AddNewDish { name } => self.add_new_dish(&name),
            QuickReviewAction::Advance => self.advance(),
            QuickReviewAction::Back => self.back(),
            QuickReviewAction::EditDish {
                index,
                rating,
                would_order_again,
                notes,
            } => self.edit_dish(
                index,
                DishEdit {
                    rating,
                    would_order_again,
                    notes,
                },
            ),
        }
    }

    fn require_step(&self, step: Step) -> Result<(), QuickReviewError> {
        if self.step == step {
            Ok(())
        } else {
            Err(QuickReviewError::WrongStep(self.step))
        }
    }

    pub fn toggle_item(&mut self, item_id: Uuid) -> Result<(), QuickReviewError> {
        self.require_step(Step::Selecting)?;
        if !self.existing_items.iter().any(|i| i.id == item_id) {
            return Err(QuickReviewError::UnknownItem(item_id));
        }

        if !self.selected_ids.remove(&item_id) {
            self.selected_ids.insert(item_id);
        }
        Ok(())
    }

    /// Queues a dish that isn't on the menu yet. Duplicates of an already
    /// queued name (exact match) are ignored.
    pub fn add_new_dish(&mut self, name: &str) -> Result<(), QuickReviewError> {
        self.require_step(Step::Selecting)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(QuickReviewError::EmptyDishName);
        }

        if !self.new_dishes.iter().any(|d| d == name) {
            self.new_dishes.push(name.to_string());
        }
        Ok(())
    }

    pub fn advance(&mut self) -> Result<(), QuickReviewError> {
        self.require_step(Step::Selecting)?;

        let dishes: Vec<DraftDish> = self
            .existing_items
            .iter()
            .filter(|i| self.selected_ids.contains(&i.id))
            .map(|i| DraftDish::blank(Some(i.id), i.name.clone()))
            .chain(
                self.new_dishes
                    .iter()
                    .map(|name| DraftDish::blank(None, name.clone())),
            )
            .collect();

        if dishes.is_empty() {
            return Err(QuickReviewError::NothingSelected);
        }

        self.dishes = dishes;
        self.step = Step::Rating;
        Ok(())
    }

    /// Returns to selection. Ratings entered so far are discarded.
    pub fn back(&mut self) -> Result<(), QuickReviewError> {
        self.require_step(Step::Rating)?;
        self.dishes.clear();
        self.step = Step::Selecting;
        Ok(())
    }

    pub fn edit_dish(&mut self, index: usize, edit: DishEdit) -> Result<(), QuickReviewError> {
        self.require_step(Step::Rating)?;
        if let Some(rating) = edit.rating {
            if rating > 5 {
                return Err(QuickReviewError::InvalidRating(rating));
            }
        }

        let dish = self
            .dishes
            .get_mut(index)
            .ok_or(QuickReviewError::EntryOutOfRange(index))?;

        if let Some(rating) = edit.rating {
            dish.rating = rating;
        }
        if let Some(would_order_again) = edit.would_order_again {
            dish.would_order_again = Some(would_order_again);
        }
        if let Some(notes) = edit.notes {
            dish.notes = notes;
        }
        Ok(())
    }

    pub fn can_save(&self) -> bool {
        self.step == Step::Rating
            && !self.dishes.is_empty()
            && self.dishes.iter().all(|d| d.would_order_again.is_some())
    }

    /// Checks every draft the client sent back before anything is written:
    /// an outcome on each dish, ratings within 0..=5, non-blank names, and
    /// existing item ids that are on `menu`.
    pub fn validate_drafts(&self, menu: &[MenuItem]) -> Result<(), QuickReviewError> {
        self.require_step(Step::Rating)?;
        if self.dishes.is_empty() {
            return Err(QuickReviewError::NothingSelected);
        }

        for dish in &self.dishes {
            if dish.would_order_again.is_none() {
                return Err(QuickReviewError::OutcomeMissing);
            }
            if dish.rating > 5 {
                return Err(QuickReviewError::InvalidRating(dish.rating));
            }
            match dish.existing_item_id() {
                Some(item_id) => {
                    if !menu.iter().any(|mi| mi.id == item_id) {
                        return Err(QuickReviewError::UnknownItem(item_id));
                    }
                }
                None => {
                    if dish.name.trim().is_empty() {
                        return Err(QuickReviewError::EmptyDishName);
                    }
                }
            }
        }
        Ok(())
    }

    /// Writes one review per dish and then a single visit, strictly in order.
    ///
    /// Invalid drafts are rejected before the first write. After that, the
    /// first failing step stops the run and its error is returned; rows
    /// written before the failure stay written.
    pub async fn save(
        &self,
        store: &dyn JournalStore,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<QuickReviewSaved, AppError> {
        self.require_step(Step::Rating)?;
        let menu = store.list_menu_items(self.restaurant_id).await?;
        self.validate_drafts(&menu)?;

        let today = now.date_naive();
        let mut review_ids = Vec::with_capacity(self.dishes.len());

        for (index, dish) in self.dishes.iter().enumerate() {
            let review_id = self
                .save_dish(store, user_id, dish, today)
                .await
                .map_err(|e| {
                    tracing::error!(
                        "Quick review for restaurant {} stopped at dish {} ('{}'): {}",
                        self.restaurant_id,
                        index + 1,
                        dish.name,
                        e
                    );
                    e
                })?;
            review_ids.push(review_id);
        }

        let visit = store
            .insert_visit(NewVisit {
                restaurant_id: self.restaurant_id,
                user_id,
                visited_at: now,
                overall_notes: None,
            })
            .await
            .map_err(|e| {
                tracing::error!(
                    "Quick review for restaurant {} saved {} reviews but failed to log the visit: {}",
                    self.restaurant_id,
                    review_ids.len(),
                    e
                );
                e
            })?;

        tracing::info!(
            "Saved {} reviews and visit {} for restaurant {}",
            review_ids.len(),
            visit.id,
            self.restaurant_id
        );

        Ok(QuickReviewSaved {
            saved: review_ids.len(),
            review_ids,
            visit_id: visit.id,
        })
    }

    // Drafts are already validated by `save`.
    async fn save_dish(
        &self,
        store: &dyn JournalStore,
        user_id: Uuid,
        dish: &DraftDish,
        today: chrono::NaiveDate,
    ) -> Result<Uuid, AppError> {
        let would_order_again = dish
            .would_order_again
            .ok_or(QuickReviewError::OutcomeMissing)?;

        let menu_item_id = match dish.existing_item_id() {
            Some(item_id) => item_id,
            None => {
                store
                    .upsert_menu_item(MenuItemUpsert::named(
                        self.restaurant_id,
                        dish.name.trim(),
                        user_id,
                    ))
                    .await?
                    .id
            }
        };

        let review = store
            .insert_review(NewReview {
                menu_item_id,
                user_id,
                rating: normalize_rating(Some(i16::from(dish.rating)))?,
                would_order_again,
                notes: non_empty(Some(dish.notes.clone())),
                photo_url: None,
                visited_at: Some(today),
            })
            .await?;

        Ok(review.id)
    }
}

/// Opens a session for a restaurant with its current menu to pick from.
pub async fn start_quick_review(
    store: &dyn JournalStore,
    restaurant_id: Uuid,
) -> Result<QuickReview, AppError> {
    if store.get_restaurant(restaurant_id).await?.is_none() {
        return Err(AppError::NotFound("Restaurant not found".into()));
    }
    let menu = store.list_menu_items(restaurant_id).await?;

    Ok(QuickReview::new(restaurant_id, menu))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(name: &str) -> DishOption {
        DishOption {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }

    fn session(names: &[&str]) -> QuickReview {
        QuickReview {
            restaurant_id: Uuid::new_v4(),
            step: Step::Selecting,
            existing_items: names.iter().map(|n| option(n)).collect(),
            selected_ids: BTreeSet::new(),
            new_dishes: Vec::new(),
            dishes: Vec::new(),
        }
    }

    #[test]
    fn advancing_with_nothing_selected_is_rejected_and_state_kept() {
        let mut qr = session(&["Ramen"]);
        let before = qr.clone();

        assert_eq!(qr.advance(), Err(QuickReviewError::NothingSelected));
        assert_eq!(qr, before);
        assert_eq!(QuickReviewError::NothingSelected.to_string(), "Select at least one dish");
    }

    #[test]
    fn toggling_twice_deselects() {
        let mut qr = session(&["Ramen"]);
        let id = qr.existing_items[0].id;

        qr.toggle_item(id).unwrap();
        qr.toggle_item(id).unwrap();
        assert!(qr.selected_ids.is_empty());
        assert!(matches!(
            qr.toggle_item(Uuid::new_v4()),
            Err(QuickReviewError::UnknownItem(_))
        ));
    }

    #[test]
    fn new_dish_names_dedupe_case_sensitively() {
        let mut qr = session(&[]);

        qr.add_new_dish("Gyoza").unwrap();
        qr.add_new_dish(" Gyoza ").unwrap();
        qr.add_new_dish("gyoza").unwrap();
        assert_eq!(qr.new_dishes, vec!["Gyoza", "gyoza"]);
        assert_eq!(qr.add_new_dish("  "), Err(QuickReviewError::EmptyDishName));
    }

    #[test]
    fn advance_freezes_existing_then_new_dishes_with_defaults() {
        let mut qr = session(&["Bao", "Ramen", "Tonkatsu"]);
        let ramen = qr.existing_items[1].id;
        let bao = qr.existing_items[0].id;
        qr.toggle_item(ramen).unwrap();
        qr.toggle_item(bao).unwrap();
        qr.add_new_dish("Matcha Parfait").unwrap();

        qr.advance().unwrap();

        assert_eq!(qr.step, Step::Rating);
        let names: Vec<&str> = qr.dishes.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Bao", "Ramen", "Matcha Parfait"]);
        assert!(qr.dishes.iter().all(|d| d.rating == 0 && d.would_order_again.is_none() && d.notes.is_empty()));
        assert_eq!(qr.dishes[0].item_id, Some(bao));
        assert!(!qr.dishes[0].is_new);
        assert!(qr.dishes[2].is_new);
        assert_eq!(qr.dishes[2].item_id, None);
    }

    #[test]
    fn edits_touch_only_their_own_entry() {
        let mut qr = session(&[]);
        qr.add_new_dish("A").unwrap();
        qr.add_new_dish("B").unwrap();
        qr.advance().unwrap();

        qr.edit_dish(
            1,
            DishEdit {
                rating: Some(4),
                would_order_again: Some(false),
                notes: Some("too salty".into()),
            },
        )
        .unwrap();

        assert_eq!(qr.dishes[0], DraftDish::blank(None, "A".into()));
        assert_eq!(qr.dishes[1].rating, 4);
        assert_eq!(qr.dishes[1].would_order_again, Some(false));
        assert_eq!(qr.dishes[1].notes, "too salty");
    }

    #[test]
    fn save_gate_needs_every_outcome() {
        let mut qr = session(&[]);
        qr.add_new_dish("A").unwrap();
        qr.add_new_dish("B").unwrap();
        qr.advance().unwrap();
        assert!(!qr.can_save());

        qr.apply(QuickReviewAction::EditDish {
            index: 0,
            rating: None,
            would_order_again: Some(true),
            notes: None,
        })
        .unwrap();
        assert!(!qr.can_save());

        qr.apply(QuickReviewAction::EditDish {
            index: 1,
            rating: None,
            would_order_again: Some(false),
            notes: None,
        })
        .unwrap();
        assert!(qr.can_save());
    }

    #[test]
    fn bad_edits_are_rejected() {
        let mut qr = session(&[]);
        qr.add_new_dish("A").unwrap();
        assert_eq!(
            qr.edit_dish(0, DishEdit::default()),
            Err(QuickReviewError::WrongStep(Step::Selecting))
        );
        qr.advance().unwrap();

        assert_eq!(
            qr.edit_dish(3, DishEdit::default()),
            Err(QuickReviewError::EntryOutOfRange(3))
        );
        assert_eq!(
            qr.edit_dish(
                0,
                DishEdit {
                    rating: Some(6),
                    ..Default::default()
                }
            ),
            Err(QuickReviewError::InvalidRating(6))
        );
    }

    #[test]
    fn back_returns_to_selection_keeping_choices() {
        let mut qr = session(&["Ramen"]);
        let ramen = qr.existing_items[0].id;
        qr.toggle_item(ramen).unwrap();
        qr.advance().unwrap();

        qr.apply(QuickReviewAction::Back).unwrap();

        assert_eq!(qr.step, Step::Selecting);
        assert!(qr.dishes.is_empty());
        assert!(qr.selected_ids.contains(&ramen));
    }

    #[test]
    fn drafts_are_checked_against_the_menu() {
        let mut qr = session(&[]);
        qr.add_new_dish("A").unwrap();
        qr.advance().unwrap();
        qr.dishes[0].would_order_again = Some(true);
        assert_eq!(qr.validate_drafts(&[]), Ok(()));

        qr.dishes[0].rating = 7;
        assert_eq!(qr.validate_drafts(&[]), Err(QuickReviewError::InvalidRating(7)));

        qr.dishes[0].rating = 0;
        qr.dishes[0].name = " ".into();
        assert_eq!(qr.validate_drafts(&[]), Err(QuickReviewError::EmptyDishName));

        let stray = Uuid::new_v4();
        qr.dishes[0].item_id = Some(stray);
        qr.dishes[0].is_new = false;
        assert_eq!(qr.validate_drafts(&[]), Err(QuickReviewError::UnknownItem(stray)));
    }

    #[test]
    fn actions_deserialize_from_tagged_json() {
        let action: QuickReviewAction = serde_json::from_str(
            r#"{"type":"edit_dish","index":2,"would_order_again":true}"#,
        )
        .unwrap();

        assert_eq!(
            action,
            QuickReviewAction::EditDish {
                index: 2,
                rating: None,
                would_order_again: Some(true),
                notes: None,
            }
        );
    }
}
