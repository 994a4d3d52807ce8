use crate::{errors::AppError, models::ReviewRow};

pub const EXPORT_FILENAME: &str = "menu-reviews-export.csv";

const HEADER: [&str; 9] = [
    "Restaurant",
    "City",
    "Dish",
    "Category",
    "Would Order Again",
    "Rating",
    "Notes",
    "Visited At",
    "Created At",
];

/// Serializes the whole journal, newest first. An empty journal is reported as
/// `NotFound` so callers never hand out a header-only file.
pub fn reviews_to_csv(rows: &[ReviewRow]) -> Result<String, AppError> {
    if rows.is_empty() {
        return Err(AppError::NotFound("No reviews found".into()));
    }

    let mut ordered: Vec<&ReviewRow> = rows.iter().collect();
    ordered.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let mut lines = Vec::with_capacity(ordered.len() + 1);
    lines.push(HEADER.join(","));

    for row in ordered {
        let fields = [
            row.restaurant_name.clone(),
            row.city.clone().unwrap_or_default(),
            row.dish_name.clone(),
            row.category.clone().unwrap_or_default(),
            if row.would_order_again { "YES" } else { "NO" }.to_string(),
            row.rating.map(|r| r.to_string()).unwrap_or_default(),
            row.notes.clone().unwrap_or_default(),
            row.visited_at
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            row.created_at.to_rfc3339(),
        ];

        lines.push(
            fields
                .iter()
                .map(|f| quote_field(f))
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    Ok(lines.join("\n"))
}

fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
