// --- File: crates/tarot_config/src/models.rs ---

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::ConfigModelError;

// --- REST API Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String, // Loaded via TAROT__API__BASE_URL
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://www.bookingtarot.somee.com".to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

// --- Booking Form Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BookingConfig {
    /// Session lengths offered in the duration menu, in minutes.
    #[serde(default = "default_durations")]
    pub durations: Vec<i64>,
    #[serde(default = "default_duration_minutes")]
    pub default_duration_minutes: i64,
    /// How many days ahead of today a booking date may be picked.
    #[serde(default = "default_horizon_days")]
    pub horizon_days: i64,
    /// IANA zone used to decide what "today" is.
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            durations: default_durations(),
            default_duration_minutes: default_duration_minutes(),
            horizon_days: default_horizon_days(),
            time_zone: default_time_zone(),
        }
    }
}

impl BookingConfig {
    /// Parses the configured time zone.
    pub fn time_zone(&self) -> Result<Tz, ConfigModelError> {
        self.time_zone
            .parse::<Tz>()
            .map_err(|_| ConfigModelError::InvalidTimeZone(self.time_zone.clone()))
    }

    /// Checks that the defaults are consistent with each other.
    pub fn validate(&self) -> Result<(), ConfigModelError> {
        if self.durations.is_empty() || self.durations.iter().any(|d| *d <= 0) {
            return Err(ConfigModelError::InvalidDurations(self.durations.clone()));
        }
        if !self.durations.contains(&self.default_duration_minutes) {
            return Err(ConfigModelError::DefaultDurationNotOffered(
                self.default_duration_minutes,
            ));
        }
        if !(0..=MAX_HORIZON_DAYS).contains(&self.horizon_days) {
            return Err(ConfigModelError::HorizonOutOfRange(self.horizon_days));
        }
        self.time_zone()?;
        Ok(())
    }
}

fn default_durations() -> Vec<i64> {
    vec![30, 60, 90, 120, 150]
}

fn default_duration_minutes() -> i64 {
    30
}

/// Longest booking horizon a configuration may ask for.
pub const MAX_HORIZON_DAYS: i64 = 365;

fn default_horizon_days() -> i64 {
    7
}

fn default_time_zone() -> String {
    "UTC".to_string()
}

// --- Session Persistence Config ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct SessionConfig {
    pub store_path: Option<String>, // None keeps the session in memory only
}

// --- Logging Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}
