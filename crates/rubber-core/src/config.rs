use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub style: StyleConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log files live here)
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

/// Geometry, timing and colors of the indicator.
///
/// Every option is read when the markers are (re)built; none of them change
/// how an index transition is planned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Diameter of a small marker
    #[serde(default = "default_small_marker_size")]
    pub small_marker_size: f64,
    /// Diameter of the main marker's backdrop disc
    #[serde(default = "default_main_marker_size")]
    pub main_marker_size: f64,
    /// Horizontal gap between small markers
    #[serde(default = "default_horizontal_spacing")]
    pub horizontal_spacing: f64,
    /// Vertical padding between the markers and the strip edge
    #[serde(default = "default_vertical_spacing")]
    pub vertical_spacing: f64,
    /// Duration of a hop and of the main marker relocation (0 = instant)
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    /// Strip and backdrop color, hex string (e.g. "#BDF1C1")
    #[serde(default = "default_background_color")]
    pub background_color: String,
    /// Small marker fill color
    #[serde(default = "default_small_marker_color")]
    pub small_marker_color: String,
    /// Main marker fill color
    #[serde(default = "default_main_marker_color")]
    pub main_marker_color: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            small_marker_size: default_small_marker_size(),
            main_marker_size: default_main_marker_size(),
            horizontal_spacing: default_horizontal_spacing(),
            vertical_spacing: default_vertical_spacing(),
            animation_duration_ms: default_animation_duration(),
            background_color: default_background_color(),
            small_marker_color: default_small_marker_color(),
            main_marker_color: default_main_marker_color(),
        }
    }
}

impl StyleConfig {
    #[inline]
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    /// Reject styles the geometry model cannot lay out.
    pub fn validate(&self) -> crate::Result<()> {
        let positive = [
            ("small_marker_size", self.small_marker_size),
            ("main_marker_size", self.main_marker_size),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(crate::Error::InvalidStyle(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        let non_negative = [
            ("horizontal_spacing", self.horizontal_spacing),
            ("vertical_spacing", self.vertical_spacing),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(crate::Error::InvalidStyle(format!(
                    "{} must not be negative, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

/// Easing curve used for the main marker relocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingType {
    /// Jump at the end of the duration
    None,
    #[default]
    Linear,
    Cubic,
    Quintic,
    EaseOut,
    EaseInOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Number of pages shown when the demo starts
    #[serde(default = "default_page_count")]
    pub page_count: usize,
    /// Tick rate in milliseconds while idle
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while an animation is in flight
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Easing of the main marker relocation
    #[serde(default)]
    pub easing: EasingType,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_count: default_page_count(),
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            easing: EasingType::default(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rubber")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_small_marker_size() -> f64 {
    16.0
}

fn default_main_marker_size() -> f64 {
    40.0
}

fn default_horizontal_spacing() -> f64 {
    12.0
}

fn default_vertical_spacing() -> f64 {
    8.0
}

fn default_animation_duration() -> u64 {
    200
}

fn default_background_color() -> String {
    "#BDF1C1".to_string()
}

fn default_small_marker_color() -> String {
    "#FFD300".to_string()
}

fn default_main_marker_color() -> String {
    "#FFAA79".to_string()
}

fn default_page_count() -> usize {
    5
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
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
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path or return defaults if it is missing
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let path = expand_tilde(path);

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.style.validate()?;
        Ok(config)
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/rubber/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("rubber")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Log file used while the terminal UI owns stderr
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("rubber.log")
    }
}
