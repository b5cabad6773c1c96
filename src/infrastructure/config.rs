use std::{path::Path, path::PathBuf, time::Duration};

use color_eyre::eyre::Result;
use config::ConfigError;
use serde::Deserialize;

use crate::{presentation::config::keybindings::KeyBindings, utils};

const CONFIG: &str = include_str!("../../.config/config.json5");

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub _data_dir: PathBuf,
    #[serde(default)]
    pub _config_dir: PathBuf,
}

/// Where the dish list gets its pages from
#[derive(Clone, Debug, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// Requests taking longer than this fail as transport errors
    pub timeout_ms: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://127.0.0.1:3000"),
            timeout_ms: 5000,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ListConfig {
    pub page_size: u32,
    /// How many items before the end the list asks for the next page
    pub proximity_threshold: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            proximity_threshold: 2,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub total_pages: u32,
    pub delay_ms: u64,
    pub default_page_size: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 3000,
            total_pages: 5,
            delay_ms: 500,
            default_page_size: 10,
        }
    }
}

/// Static content of one restaurant card header.
///
/// Missing fields take the values of [`RestaurantConfig::default`], so a card
/// can be configured by its name alone.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RestaurantConfig {
    pub shop_name: String,
    pub rating: f32,
    pub rating_label: String,
    pub review_count: u32,
    pub cuisine: String,
    pub area: String,
    pub price_per_person: u32,
    pub distance: String,
    pub rank_tag: String,
    pub tags: Vec<String>,
}

impl Default for RestaurantConfig {
    fn default() -> Self {
        Self {
            shop_name: String::from("椒鸣椒麻馆(五道口店)"),
            rating: 3.5,
            rating_label: String::from("可以一试"),
            review_count: 170,
            cuisine: String::from("中餐"),
            area: String::from("龙柏地区"),
            price_per_person: 220,
            distance: String::from("842m"),
            rank_tag: String::from("2025年上榜餐厅"),
            tags: vec![
                String::from("多人聚餐"),
                String::from("生日轰趴"),
                String::from("可订桌"),
            ],
        }
    }
}

impl RestaurantConfig {
    pub fn named(shop_name: impl Into<String>) -> Self {
        Self {
            shop_name: shop_name.into(),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub list: ListConfig,
    #[serde(default)]
    pub server: ServerConfig,
    /// One card per entry, top to bottom
    #[serde(default)]
    pub restaurants: Vec<RestaurantConfig>,
    #[serde(default)]
    pub keybindings: KeyBindings,
}

impl Config {
    /// Load the embedded defaults overlaid with the user's config files, if any
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(&utils::get_data_dir(), &utils::get_config_dir())
    }

    /// The embedded defaults alone
    pub fn defaults() -> Result<Self, ConfigError> {
        json5::from_str(CONFIG)
            .map_err(|e| ConfigError::Message(format!("Failed to load default config: {e}")))
    }

    /// The configured cards; an empty list still shows one default card
    pub fn cards(&self) -> Vec<RestaurantConfig> {
        if self.restaurants.is_empty() {
            vec![RestaurantConfig::default()]
        } else {
            self.restaurants.clone()
        }
    }

    pub fn load(data_dir: &Path, config_dir: &Path) -> Result<Self, ConfigError> {
        let default_config = Self::defaults()?;
        let mut builder = config::Config::builder()
            .set_default("_data_dir", data_dir.to_string_lossy().to_string())?
            .set_default("_config_dir", config_dir.to_string_lossy().to_string())?
            .add_source(config::File::from_str(CONFIG, config::FileFormat::Json5));

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.json", config::FileFormat::Json),
            ("config.yaml", config::FileFormat::Yaml),
            ("config.toml", config::FileFormat::Toml),
            ("config.ini", config::FileFormat::Ini),
        ];
        let mut found_config = false;
        for (file, format) in &config_files {
            builder = builder.add_source(
                config::File::from(config_dir.join(file))
                    .format(*format)
                    .required(false),
            );
            if config_dir.join(file).exists() {
                found_config = true
            }
        }
        if !found_config {
            log::info!("No user configuration file found, using defaults");
        }

        let mut cfg: Self = builder.build()?.try_deserialize()?;

        // Merge default keybindings into user config (flat mapping)
        for (combo, action) in default_config.keybindings.iter() {
            cfg.keybindings.entry(*combo).or_insert(*action);
        }

        if cfg.list.page_size == 0 {
            return Err(ConfigError::Message(String::from(
                "list.page_size must be positive",
            )));
        }

        Ok(cfg)
    }
}
