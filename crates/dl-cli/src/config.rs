//! Configuration loading and management.

use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use dl_core::{IndentPacking, LayoutError, dates};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Event field holding the start time.
    pub start_field: String,

    /// Event field holding the end time.
    pub end_field: String,

    /// Event field shown as the title in table output.
    pub title_field: String,

    /// Time of day at the top of the column (`HH:MM`).
    pub day_start: String,

    /// Minutes visible in the column.
    pub total_minutes: i64,

    /// Minimum slot size in minutes; also the minimum event height.
    pub step: i64,

    /// Offset added per child group number, in percent.
    pub group_indent: f64,

    /// Margin taken out of a shared child group's width, in percent.
    pub base_indent: f64,

    /// How far top-level siblings grow into their neighbour (0 = never).
    pub overlap_multiplier: f64,
}

impl Default for Config {
    fn default() -> Self {
        let packing = IndentPacking::default();
        Self {
            start_field: "start".to_string(),
            end_field: "end".to_string(),
            title_field: "title".to_string(),
            day_start: "00:00".to_string(),
            total_minutes: 24 * 60,
            step: 30,
            group_indent: packing.group_indent,
            base_indent: packing.base_indent,
            overlap_multiplier: packing.overlap_multiplier,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (DL_*)
        figment = figment.merge(Env::prefixed("DL_"));

        figment.extract()
    }

    /// The configured packing policy.
    pub const fn packing(&self) -> IndentPacking {
        IndentPacking {
            group_indent: self.group_indent,
            base_indent: self.base_indent,
            overlap_multiplier: self.overlap_multiplier,
        }
    }

    /// The configured top-of-column time.
    pub fn day_start(&self) -> Result<NaiveTime, LayoutError> {
        dates::parse_time_of_day(&self.day_start)
    }
}

/// Returns the platform-specific config directory for dl.
///
/// On Linux: `~/.config/dl`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("dl"))
}
