use std::env;
use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid {key} value: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Which of the two product brandings this instance serves.
///
/// The brand name and the listing route prefix always travel together, so
/// picking a variant picks both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SiteVariant {
    #[default]
    PlantBased,
    HealthFood,
}

impl SiteVariant {
    pub fn brand(self) -> &'static str {
        match self {
            SiteVariant::PlantBased => "Plant-based Trivia",
            SiteVariant::HealthFood => "Health Food Trivia",
        }
    }

    pub fn route_prefix(self) -> &'static str {
        match self {
            SiteVariant::PlantBased => "quizzes",
            SiteVariant::HealthFood => "trivia-games",
        }
    }
}

impl FromStr for SiteVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plant-based" => Ok(SiteVariant::PlantBased),
            "health-food" => Ok(SiteVariant::HealthFood),
            other => Err(format!("unknown site variant '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: Url,
    pub bind_address: String,
    pub variant: SiteVariant,
    pub nav_breakpoint_px: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = lookup("QUIZ_API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("QUIZ_API_BASE_URL"))?;
        let api_base_url = Url::parse(base.trim()).map_err(|e| ConfigError::Invalid {
            key: "QUIZ_API_BASE_URL",
            reason: e.to_string(),
        })?;

        Ok(Config {
            api_base_url,
            bind_address: lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:8080".to_string()),
            variant: try_load(&lookup, "QUIZ_SITE_VARIANT", "plant-based")?,
            nav_breakpoint_px: try_load(&lookup, "NAV_BREAKPOINT_PX", "1024")?,
        })
    }
}

fn try_load<F, T>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        log::info!("{} not set, using default: {}", key, default);
        default.to_string()
    });

    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })
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
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn missing_base_url_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("QUIZ_API_BASE_URL"));
    }

    #[test]
    fn defaults_apply_when_only_base_url_is_set() {
        let config = Config::from_lookup(lookup_from(&[(
            "QUIZ_API_BASE_URL",
            "http://127.0.0.1:9000",
        )]))
        .unwrap();

        assert_eq!(config.api_base_url.as_str(), "http://127.0.0.1:9000/");
        assert_eq!(config.bind_address, "0.0.0.0:8080");
        assert_eq!(config.variant, SiteVariant::PlantBased);
        assert_eq!(config.nav_breakpoint_px, 1024);
    }

    #[test]
    fn health_food_variant_switches_brand_and_prefix() {
        let config = Config::from_lookup(lookup_from(&[
            ("QUIZ_API_BASE_URL", "http://backend:5000"),
            ("QUIZ_SITE_VARIANT", "health-food"),
        ]))
        .unwrap();

        assert_eq!(config.variant.brand(), "Health Food Trivia");
        assert_eq!(config.variant.route_prefix(), "trivia-games");
    }

    #[test]
    fn bad_breakpoint_is_reported_with_its_key() {
        let err = Config::from_lookup(lookup_from(&[
            ("QUIZ_API_BASE_URL", "http://backend:5000"),
            ("NAV_BREAKPOINT_PX", "wide"),
        ]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::Invalid { key: "NAV_BREAKPOINT_PX", .. }));
    }

    #[test]
    fn unparseable_base_url_is_invalid() {
        let err = Config::from_lookup(lookup_from(&[("QUIZ_API_BASE_URL", "not a url")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "QUIZ_API_BASE_URL", .. }));
    }
}
