pub mod menu_item;
pub mod place;
pub mod restaurant;
pub mod review;
pub mod user;
pub mod visit;

pub use menu_item::{MenuItem, MenuItemUpsert};
pub use place::PlaceResult;
pub use restaurant::{NewRestaurant, Restaurant};
pub use review::{NewReview, Review, ReviewRow};
pub use user::Claims;
pub use visit::{NewVisit, RestaurantVisit};
