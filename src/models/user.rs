use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,           // user ID
    pub email: Option<String>, // shown on the settings screen
    pub exp: usize,            // expiration time
}
