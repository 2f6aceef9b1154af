use std::time::Duration;

use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Timings and layout constants for the prediction page.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default, rename_all = "snake_case")]
pub struct AppConfig {
    /// Simulated request latency before the prediction runs.
    pub submit_delay_ms: u64,
    /// Count-up animation of the result number.
    pub animation_duration_ms: u64,
    pub scroll_delay_ms: u64,
    pub toast_lifetime_ms: u64,
    pub toast_exit_ms: u64,
    /// Viewport widths at or below this force the sidebar closed.
    pub mobile_breakpoint_px: u32,
    /// Zone used for export timestamps.
    pub timezone: Tz,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            submit_delay_ms: 1500,
            animation_duration_ms: 1500,
            scroll_delay_ms: 100,
            toast_lifetime_ms: 5000,
            toast_exit_ms: 300,
            mobile_breakpoint_px: 768,
            timezone: Tz::UTC,
        }
    }
}

fn read_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => {
            let value = raw
                .trim()
                .parse::<T>()
                .with_context(|| format!("Invalid value for {key}: '{raw}'"))?;
            Ok(Some(value))
        }
        _ => Ok(None),
    }
}

impl AppConfig {
    /// Defaults overridden by `SALES_*` process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = AppConfig::default();

        if let Some(value) = read_var(&lookup, "SALES_SUBMIT_DELAY_MS")? {
            config.submit_delay_ms = value;
        }
        if let Some(value) = read_var(&lookup, "SALES_ANIMATION_DURATION_MS")? {
            config.animation_duration_ms = value;
        }
        if let Some(value) = read_var(&lookup, "SALES_SCROLL_DELAY_MS")? {
            config.scroll_delay_ms = value;
        }
        if let Some(value) = read_var(&lookup, "SALES_TOAST_LIFETIME_MS")? {
            config.toast_lifetime_ms = value;
        }
        if let Some(value) = read_var(&lookup, "SALES_TOAST_EXIT_MS")? {
            config.toast_exit_ms = value;
        }
        if let Some(value) = read_var(&lookup, "SALES_MOBILE_BREAKPOINT_PX")? {
            config.mobile_breakpoint_px = value;
        }
        if let Some(raw) = lookup("SALES_TIMEZONE").filter(|raw| !raw.trim().is_empty()) {
            config.timezone = raw
                .trim()
                .parse::<Tz>()
                .map_err(|e| anyhow::anyhow!("Invalid value for SALES_TIMEZONE: {e}"))?;
        }

        Ok(config)
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }
}
