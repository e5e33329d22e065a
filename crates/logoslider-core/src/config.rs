use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable consulted when `source.access_token` is not set
pub const ACCESS_TOKEN_ENV: &str = "LOGOSLIDER_TOKEN";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub slider: SliderConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file, image cache)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Remote list store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Absolute URL of the site hosting the lists (e.g. "https://contoso.sharepoint.com/sites/brand")
    #[serde(default)]
    pub site_url: String,
    /// Selected list name; the `listName` property of the slider
    #[serde(default)]
    pub list_name: Option<String>,
    /// Bearer token sent with every request
    #[serde(default)]
    pub access_token: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// Attempts per request before giving up
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Delay before the first retry, doubled after each failed attempt
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// HTTP proxy URL (e.g., "http://127.0.0.1:7890" or "socks5://127.0.0.1:1080")
    #[serde(default)]
    pub proxy_url: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            site_url: String::new(),
            list_name: None,
            access_token: None,
            request_timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            proxy_url: None,
        }
    }
}

impl SourceConfig {
    /// Selected list name, treating an empty string as "nothing selected"
    pub fn selected_list(&self) -> Option<&str> {
        self.list_name.as_deref().filter(|name| !name.is_empty())
    }

    /// Access token from config, falling back to the environment
    pub fn resolved_access_token(&self) -> Option<String> {
        self.access_token
            .clone()
            .filter(|token| !token.is_empty())
            .or_else(|| std::env::var(ACCESS_TOKEN_ENV).ok().filter(|t| !t.is_empty()))
    }
}

/// Slider geometry and style hooks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliderConfig {
    /// Gap added to the first logo's width to get the slide step
    #[serde(default = "default_logo_gap")]
    pub logo_gap: i32,
    /// Logo tile width in terminal cells
    #[serde(default = "default_tile_width")]
    pub tile_width: u16,
    /// Logo tile height in terminal rows
    #[serde(default = "default_tile_height")]
    pub tile_height: u16,
    #[serde(default)]
    pub hooks: StyleHooks,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            logo_gap: default_logo_gap(),
            tile_width: default_tile_width(),
            tile_height: default_tile_height(),
            hooks: StyleHooks::default(),
        }
    }
}

/// Style hook names handed to the rendering surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleHooks {
    #[serde(default = "default_wrapper_hook")]
    pub wrapper: String,
    #[serde(default = "default_viewport_hook")]
    pub viewport: String,
    #[serde(default = "default_prev_hook")]
    pub prev_button: String,
    #[serde(default = "default_next_hook")]
    pub next_button: String,
}

impl Default for StyleHooks {
    fn default() -> Self {
        Self {
            wrapper: default_wrapper_hook(),
            viewport: default_viewport_hook(),
            prev_button: default_prev_hook(),
            next_button: default_next_hook(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Download and draw logo images (otherwise tiles show the title only)
    #[serde(default = "default_true")]
    pub image_preview: bool,
    #[serde(default)]
    pub scroll: ScrollConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            image_preview: default_true(),
            scroll: ScrollConfig::default(),
        }
    }
}

/// Easing curve for smooth horizontal scrolling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    EaseOut,
    /// Slow start and end, closest to a browser's smooth scroll
    EaseInOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Animate non-boundary slides
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Animation duration in milliseconds
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
    /// Frame rate while an animation is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_animation_duration(),
            easing: EasingType::default(),
            animation_fps: default_animation_fps(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("logoslider")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    500
}

fn default_logo_gap() -> i32 {
    5
}

fn default_tile_width() -> u16 {
    16
}

fn default_tile_height() -> u16 {
    8
}

fn default_wrapper_hook() -> String {
    "sliderParentDiv".to_string()
}

fn default_viewport_hook() -> String {
    "clientSlider".to_string()
}

fn default_prev_hook() -> String {
    "arrowleft".to_string()
}

fn default_next_hook() -> String {
    "arrowright".to_string()
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_duration() -> u64 {
    250
}

fn default_animation_fps() -> u32 {
    60
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, defaults when it does not exist
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &std::path::Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/logoslider/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("logoslider")
            .join("config.toml")
    }

    /// Get the log file path used while the TUI owns the terminal
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("logoslider.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}
