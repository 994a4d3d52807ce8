use std::{env, time::Duration};

use crate::errors::AppError;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000";
const DEFAULT_OCR_DELAY_MS: u64 = 1500;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub google_maps_api_key: Option<String>,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub ocr_delay: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests don't have to touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| AppError::EnvError(format!("{key} must be set")))
        };

        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET")?;

        let google_maps_api_key = lookup("GOOGLE_MAPS_API_KEY").filter(|v| !v.trim().is_empty());
        if google_maps_api_key.is_none() {
            tracing::warn!("GOOGLE_MAPS_API_KEY not set, places endpoints will fail");
        }

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| AppError::EnvError(format!("Invalid PORT value: {e}")))?,
            None => DEFAULT_PORT,
        };

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let ocr_delay_ms = match lookup("OCR_DELAY_MS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|e| AppError::EnvError(format!("Invalid OCR_DELAY_MS value: {e}")))?,
            None => DEFAULT_OCR_DELAY_MS,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            google_maps_api_key,
            port,
            allowed_origins,
            ocr_delay: Duration::from_millis(ocr_delay_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_optional_values_missing() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/journal"),
            ("JWT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.port, 3001);
        assert_eq!(config.allowed_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.ocr_delay, Duration::from_millis(1500));
        assert!(config.google_maps_api_key.is_none());
    }

    #[test]
    fn missing_jwt_secret_is_an_env_error() {
        let err = Config::from_lookup(lookup_from(&[(
            "DATABASE_URL",
            "postgres://localhost/journal",
        )]))
        .unwrap_err();

        assert!(matches!(err, AppError::EnvError(msg) if msg.contains("JWT_SECRET")));
    }

    #[test]
    fn origins_are_split_and_trimmed() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/journal"),
            ("JWT_SECRET", "secret"),
            ("ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
            ("PORT", "8080"),
        ]))
        .unwrap();

        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(config.port, 8080);
    }
}
