/// Repaint scheduling configuration
///
/// Resolved once when a framebuffer is created. All delays and intervals
/// are in milliseconds. Every field has a default, so partial TOML files
/// (e.g. only `max_time_update = 80`) are accepted.

use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};

/// Lower bound of the flush interval
pub const DEFAULT_MIN_TIME_UPDATE: u16 = 10;
/// Upper bound of the flush interval
pub const DEFAULT_MAX_TIME_UPDATE: u16 = 50;
/// Pending requests per extra millisecond of flush interval
pub const DEFAULT_FLUSH_AMOUNT: u16 = 5;
/// Delay value that forces the next poll to redraw
pub const DEFAULT_FORCE_UPDATE_DELAY: u16 = 1;

/// How `can_update` treats pending requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulePolicy {
    /// Redraw whenever the flush interval elapsed; `schedule_painting` is ignored
    Simple,
    /// Redraw only when requests are pending and the flush interval elapsed
    Coalescing,
}

/// How the flush interval is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlushControl {
    /// Always `min_time_update`
    Fixed,
    /// Grows with the number of pending requests, capped at `max_time_update`
    Dynamic,
}

/// What an armed repaint timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerAction {
    /// Register one pending request
    Update,
    /// Force the next poll to redraw
    Force,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepaintConfig {
    pub policy: SchedulePolicy,
    pub flush_control: FlushControl,
    pub timer_action: TimerAction,
    pub min_time_update: u16,
    pub max_time_update: u16,
    pub flush_amount: u16,
    pub force_update_delay: u16,
}

impl Default for RepaintConfig {
    fn default() -> Self {
        Self {
            policy: SchedulePolicy::Coalescing,
            flush_control: FlushControl::Dynamic,
            timer_action: TimerAction::Update,
            min_time_update: DEFAULT_MIN_TIME_UPDATE,
            max_time_update: DEFAULT_MAX_TIME_UPDATE,
            flush_amount: DEFAULT_FLUSH_AMOUNT,
            force_update_delay: DEFAULT_FORCE_UPDATE_DELAY,
        }
    }
}

impl RepaintConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::InvalidConfig(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Serialize to pretty TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::InvalidConfig(format!("Failed to serialize repaint config: {}", e)))
    }

    pub fn validate(&self) -> Result<()> {
        if self.flush_amount == 0 {
            return Err(Error::InvalidConfig("flush_amount must be non-zero".to_string()));
        }
        if self.min_time_update > self.max_time_update {
            return Err(Error::InvalidConfig(format!(
                "min_time_update ({}) exceeds max_time_update ({})",
                self.min_time_update, self.max_time_update
            )));
        }
        if self.force_update_delay == 0 {
            return Err(Error::InvalidConfig(
                "force_update_delay must be non-zero (0 means no repaint)".to_string(),
            ));
        }
        Ok(())
    }

    pub fn scheduling_enabled(&self) -> bool {
        self.policy == SchedulePolicy::Coalescing
    }
}

#[cfg(test)]
#[path = "repaint_config_tests.rs"]
mod tests;
