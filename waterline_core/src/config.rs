//! Configuration file support for Waterline.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/waterline/config.toml`.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub weather: WeatherConfig,

    #[serde(default)]
    pub food: FoodConfig,
}

/// Weather lookup configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeather API key; absent means temperature lookups are skipped
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_weather_endpoint")]
    pub endpoint: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_weather_endpoint(),
        }
    }
}

impl WeatherConfig {
    /// API key with the `OPENWEATHER_API_KEY` environment variable taking
    /// precedence over the config file
    pub fn resolved_api_key(&self) -> Option<String> {
        std::env::var("OPENWEATHER_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .or_else(|| self.api_key.clone())
    }
}

/// Food search configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FoodConfig {
    #[serde(default = "default_food_endpoint")]
    pub endpoint: String,

    /// How many candidate products to rank per query
    #[serde(default = "default_food_page_size")]
    pub page_size: u32,
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            endpoint: default_food_endpoint(),
            page_size: default_food_page_size(),
        }
    }
}

// Default value functions
fn default_weather_endpoint() -> String {
    "https://api.openweathermap.org/data/2.5/weather".into()
}

fn default_food_endpoint() -> String {
    "https://world.openfoodfacts.org/cgi/search.pl".into()
}

fn default_food_page_size() -> u32 {
    10
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
        base.join("waterline").join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.weather.api_key.is_none());
        assert!(config.weather.endpoint.contains("openweathermap"));
        assert!(config.food.endpoint.contains("openfoodfacts"));
        assert_eq!(config.food.page_size, 10);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[weather]
api_key = "secret"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.weather.api_key.as_deref(), Some("secret"));
        // Untouched sections keep their defaults
        assert!(config.weather.endpoint.contains("openweathermap"));
        assert_eq!(config.food.page_size, 10);
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            "[food]\nendpoint = \"http://localhost:9999/search\"\npage_size = 3\n",
        )
        .unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.food.endpoint, "http://localhost:9999/search");
        assert_eq!(config.food.page_size, 3);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "not [valid toml").unwrap();

        assert!(Config::load_from(&config_path).is_err());
    }
}
