//! Game configuration.
//!
//! Every value has a default, so the game runs without any file at all.
//! A `eco_cleaner.toml` in the working directory may override any subset:
//!
//! ```toml
//! [screen]
//! fps = 60
//!
//! [rules]
//! starting_lives = 5
//! respawn_chance = 0.8
//!
//! [logging]
//! file = "eco_cleaner.log"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// File looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "eco_cleaner.toml";

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub screen: ScreenConfig,
    pub rules: Rules,
    pub assets: AssetConfig,
    pub logging: LoggingConfig,
}

/// Logical canvas and refresh rate.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScreenConfig {
    pub width: i32,
    pub height: i32,
    pub fps: u32,
}

/// Gameplay constants.  Distances are logical pixels, durations are frames.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Rules {
    pub starting_lives: i32,
    /// Pollution clouds created at the start of a session.
    pub hazard_pool: usize,
    pub player_speed: i32,
    /// Gap between the player's feet and the bottom edge.
    pub player_margin_bottom: i32,
    /// Respawn height range, half-open.
    pub hazard_spawn_y_min: i32,
    pub hazard_spawn_y_max: i32,
    /// Fall speed range, half-open.
    pub hazard_speed_min: i32,
    pub hazard_speed_max: i32,
    pub reward_rise: i32,
    pub reward_lifetime: u32,
    pub score_per_catch: u32,
    pub pollution_relief: i32,
    pub pollution_per_miss: i32,
    pub max_pollution: i32,
    /// Probability that a catch shows an educational alert.
    pub alert_chance: f64,
    /// Probability that a caught cloud is replaced by a new one.
    pub respawn_chance: f64,
    pub alert_duration: u32,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AssetConfig {
    pub dir: PathBuf,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log destination while the game owns the terminal.  Stderr when unset.
    pub file: Option<PathBuf>,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fps: 30,
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            hazard_pool: 10,
            player_speed: 10,
            player_margin_bottom: 10,
            hazard_spawn_y_min: -100,
            hazard_spawn_y_max: -40,
            hazard_speed_min: 1,
            hazard_speed_max: 3,
            reward_rise: 2,
            reward_lifetime: 60,
            score_per_catch: 10,
            pollution_relief: 5,
            pollution_per_miss: 1,
            max_pollution: 100,
            alert_chance: 0.2,
            respawn_chance: 0.6,
            alert_duration: 180,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("img"),
        }
    }
}

impl GameConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path`, or fall back to defaults when the file does not exist.
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let config = Self::from_toml_str(&contents)?;
                log::info!("loaded configuration from {}", path.display());
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("{} not found, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Reject settings the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(key: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                key,
                reason: reason.into(),
            }
        }

        let s = &self.screen;
        let r = &self.rules;

        if s.width < 100 || s.height < 100 {
            return Err(invalid("screen", "canvas must be at least 100x100"));
        }
        if s.fps == 0 {
            return Err(invalid("screen.fps", "must be positive"));
        }
        if r.starting_lives <= 0 {
            return Err(invalid("rules.starting_lives", "must be positive"));
        }
        if r.max_pollution <= 0 {
            return Err(invalid("rules.max_pollution", "must be positive"));
        }
        if r.hazard_spawn_y_min >= r.hazard_spawn_y_max {
            return Err(invalid("rules.hazard_spawn_y_min", "must be below hazard_spawn_y_max"));
        }
        if r.hazard_spawn_y_max > 0 {
            return Err(invalid("rules.hazard_spawn_y_max", "clouds must spawn above the screen"));
        }
        if r.hazard_speed_min < 0 || r.hazard_speed_min >= r.hazard_speed_max {
            return Err(invalid(
                "rules.hazard_speed_min",
                "speed range must be non-negative and non-empty",
            ));
        }
        if r.player_speed <= 0 {
            return Err(invalid("rules.player_speed", "must be positive"));
        }
        if r.reward_lifetime == 0 {
            return Err(invalid("rules.reward_lifetime", "must be positive"));
        }
        for (key, p) in [
            ("rules.alert_chance", r.alert_chance),
            ("rules.respawn_chance", r.respawn_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(key, format!("{p} is not a probability")));
            }
        }
        Ok(())
    }
}
