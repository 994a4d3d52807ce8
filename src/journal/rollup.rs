use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    journal::history::OutcomeFilter,
    models::{MenuItem, Review, ReviewRow},
};

pub const RECENT_RESTAURANT_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentRestaurant {
    pub id: Uuid,
    pub name: String,
    pub city: Option<String>,
    pub photo_url: Option<String>,
    pub review_count: u32,
    pub yes_again_count: u32,
    pub last_reviewed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewedItem {
    #[serde(flatten)]
    pub item: MenuItem,
    pub latest_review: Review,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ItemBreakdown {
    pub reviewed: Vec<ReviewedItem>,
    pub unreviewed_count: usize,
}

/// The newest review by creation time. Ties fall back to the review id so the
/// answer never depends on the order rows arrived in.
pub fn latest_review<'a, I>(reviews: I) -> Option<&'a Review>
where
    I: IntoIterator<Item = &'a Review>,
{
    reviews
        .into_iter()
        .max_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)))
}

/// Latest review per menu item. `reviews` must all belong to the same user.
pub fn latest_reviews_by_item(reviews: &[Review]) -> HashMap<Uuid, &Review> {
    let mut grouped: HashMap<Uuid, Vec<&Review>> = HashMap::new();
    for review in reviews {
        grouped.entry(review.menu_item_id).or_default().push(review);
    }

    grouped
        .into_iter()
        .filter_map(|(item_id, group)| latest_review(group).map(|latest| (item_id, latest)))
        .collect()
}

/// Splits a restaurant's menu into reviewed and unreviewed dishes. Reviewed
/// dishes come back "would order again" first, then newest review first.
pub fn break_down_items(items: Vec<MenuItem>, reviews: &[Review]) -> ItemBreakdown {
    let latest = latest_reviews_by_item(reviews);
    let mut breakdown = ItemBreakdown::default();

    for item in items {
        match latest.get(&item.id) {
            Some(review) => breakdown.reviewed.push(ReviewedItem {
                latest_review: (*review).clone(),
                item,
            }),
            None => breakdown.unreviewed_count += 1,
        }
    }

    sort_reviewed_items(&mut breakdown.reviewed);
    breakdown
}

pub fn sort_reviewed_items(items: &mut [ReviewedItem]) {
    items.sort_by(|a, b| {
        b.latest_review
            .would_order_again
            .cmp(&a.latest_review.would_order_again)
            .then_with(|| b.latest_review.created_at.cmp(&a.latest_review.created_at))
    });
}

pub fn filter_reviewed_items(items: Vec<ReviewedItem>, filter: OutcomeFilter) -> Vec<ReviewedItem> {
    items
        .into_iter()
        .filter(|i| filter.accepts(i.latest_review.would_order_again))
        .collect()
}

/// Groups a user's reviews by restaurant, most recently touched restaurant
/// first, capped at [`RECENT_RESTAURANT_LIMIT`].
///
/// Counts are over every review, so re-reviews of one dish count each time.
pub fn recent_restaurants(rows: &[ReviewRow]) -> Vec<RecentRestaurant> {
    let mut order: Vec<RecentRestaurant> = Vec::new();
    let mut index: HashMap<Uuid, usize> = HashMap::new();

    for row in rows {
        let slot = *index.entry(row.restaurant_id).or_insert_with(|| {
            order.push(RecentRestaurant {
                id: row.restaurant_id,
                name: row.restaurant_name.clone(),
                city: row.city.clone(),
                photo_url: row.restaurant_photo_url.clone(),
                review_count: 0,
                yes_again_count: 0,
                last_reviewed_at: row.created_at,
            });
            order.len() - 1
        });

        let entry = &mut order[slot];
        entry.review_count += 1;
        if row.would_order_again {
            entry.yes_again_count += 1;
        }
        if row.created_at > entry.last_reviewed_at {
            entry.last_reviewed_at = row.created_at;
        }
    }

    // Stable: restaurants with equal timestamps keep first-seen order.
    order.sort_by(|a, b| b.last_reviewed_at.cmp(&a.last_reviewed_at));
    order.truncate(RECENT_RESTAURANT_LIMIT);
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn review(item: Uuid, yes: bool, at: DateTime<Utc>) -> Review {
        Review {
            id: Uuid::new_v4(),
            menu_item_id: item,
            user_id: Uuid::nil(),
            rating: None,
            would_order_again: yes,
            notes: None,
            photo_url: None,
            visited_at: None,
            created_at: at,
        }
    }

    fn menu_item(restaurant_id: Uuid, name: &str) -> MenuItem {
        MenuItem {
            id: Uuid::new_v4(),
            restaurant_id,
            name: name.into(),
            category: None,
            description: None,
            price: None,
            created_by: None,
            created_at: Utc::now(),
        }
    }

    fn row(restaurant_id: Uuid, name: &str, yes: bool, at: DateTime<Utc>) -> ReviewRow {
        ReviewRow {
            review_id: Uuid::new_v4(),
            menu_item_id: Uuid::new_v4(),
            dish_name: "dish".into(),
            category: None,
            restaurant_id,
            restaurant_name: name.into(),
            city: Some("Springfield".into()),
            restaurant_photo_url: None,
            rating: None,
            would_order_again: yes,
            notes: None,
            visited_at: None,
            created_at: at,
        }
    }

    #[test]
    fn latest_review_ignores_input_order() {
        let item = Uuid::new_v4();
        let t1 = Utc::now() - Duration::days(2);
        let t2 = Utc::now();
        let older = review(item, true, t1);
        let newer = review(item, false, t2);

        let forward = [older.clone(), newer.clone()];
        let backward = [newer.clone(), older];

        assert_eq!(latest_review(&forward).unwrap().id, newer.id);
        assert_eq!(latest_review(&backward).unwrap().id, newer.id);
    }

    #[test]
    fn latest_review_of_nothing_is_none() {
        assert!(latest_review(&Vec::<Review>::new()).is_none());
    }

    #[test]
    fn yes_items_sort_before_skip_items_regardless_of_recency() {
        let restaurant = Uuid::new_v4();
        let a = menu_item(restaurant, "A");
        let b = menu_item(restaurant, "B");
        let t1 = Utc::now() - Duration::hours(5);
        let t2 = Utc::now();
        let reviews = vec![review(b.id, false, t2), review(a.id, true, t1)];

        let breakdown = break_down_items(vec![b.clone(), a.clone()], &reviews);
        let names: Vec<&str> = breakdown.reviewed.iter().map(|i| i.item.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn unreviewed_items_are_counted_not_listed() {
        let restaurant = Uuid::new_v4();
        let reviewed = menu_item(restaurant, "Reviewed");
        let untouched = menu_item(restaurant, "Untouched");
        let other = menu_item(restaurant, "Other");
        let t = Utc::now();
        let reviews = vec![
            review(reviewed.id, true, t - Duration::days(3)),
            review(reviewed.id, false, t),
        ];

        let breakdown = break_down_items(vec![reviewed.clone(), untouched, other], &reviews);
        assert_eq!(breakdown.unreviewed_count, 2);
        assert_eq!(breakdown.reviewed.len(), 1);
        assert!(!breakdown.reviewed[0].latest_review.would_order_again);
    }

    #[test]
    fn within_an_outcome_newest_review_comes_first() {
        let restaurant = Uuid::new_v4();
        let old = menu_item(restaurant, "Old");
        let new = menu_item(restaurant, "New");
        let t = Utc::now();
        let reviews = vec![review(old.id, true, t - Duration::days(9)), review(new.id, true, t)];

        let breakdown = break_down_items(vec![old, new], &reviews);
        assert_eq!(breakdown.reviewed[0].item.name, "New");

        let skips = filter_reviewed_items(breakdown.reviewed, OutcomeFilter::Skip);
        assert!(skips.is_empty());
    }

    #[test]
    fn rollup_counts_every_review_and_keeps_recency_order() {
        let luigi = Uuid::new_v4();
        let ichiran = Uuid::new_v4();
        let now = Utc::now();
        let rows = vec![
            row(ichiran, "Ichiran", true, now),
            row(luigi, "Luigi's", true, now - Duration::hours(1)),
            row(luigi, "Luigi's", false, now - Duration::hours(2)),
            row(ichiran, "Ichiran", false, now - Duration::hours(3)),
            row(luigi, "Luigi's", true, now - Duration::hours(4)),
        ];

        let rollup = recent_restaurants(&rows);
        assert_eq!(rollup.len(), 2);
        assert_eq!(rollup[0].name, "Ichiran");
        assert_eq!((rollup[0].review_count, rollup[0].yes_again_count), (2, 1));
        assert_eq!(rollup[1].name, "Luigi's");
        assert_eq!((rollup[1].review_count, rollup[1].yes_again_count), (3, 2));
    }

    #[test]
    fn rollup_is_capped_at_ten_restaurants() {
        let now = Utc::now();
        let rows: Vec<ReviewRow> = (0..14)
            .map(|i| row(Uuid::new_v4(), &format!("R{i}"), true, now - Duration::minutes(i)))
            .collect();

        let rollup = recent_restaurants(&rows);
        assert_eq!(rollup.len(), RECENT_RESTAURANT_LIMIT);
        assert_eq!(rollup[0].name, "R0");
        assert_eq!(rollup[9].name, "R9");
    }
}
