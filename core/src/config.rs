//! Panel configuration, injected at construction.

use crate::error::ConfigError;
use crate::labels::Locale;

pub const BASE_URL_VAR: &str = "VEHICLES_API_BASE_URL";
pub const LOCALE_VAR: &str = "VEHICLES_LOCALE";
pub const NOTIFY_DELETE_FAILURE_VAR: &str = "VEHICLES_NOTIFY_DELETE_FAILURE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelConfig {
    /// Address prefix of the API; `api/...` paths are joined onto it.
    pub base_url: String,
    pub locale: Locale,
    /// Show a notification when a delete fails. Off by default: failed
    /// deletes are only logged.
    pub notify_delete_failure: bool,
}

impl PanelConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            locale: Locale::default(),
            notify_delete_failure: false,
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_delete_failure_notice(mut self, enabled: bool) -> Self {
        self.notify_delete_failure = enabled;
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingVar(BASE_URL_VAR))?;

        let locale = match lookup(LOCALE_VAR) {
            Some(value) => value.parse::<Locale>().map_err(|_| ConfigError::InvalidVar {
                name: LOCALE_VAR,
                value,
            })?,
            None => Locale::default(),
        };

        let notify_delete_failure = match lookup(NOTIFY_DELETE_FAILURE_VAR) {
            Some(value) => parse_flag(&value).ok_or(ConfigError::InvalidVar {
                name: NOTIFY_DELETE_FAILURE_VAR,
                value,
            })?,
            None => false,
        };

        Ok(Self {
            base_url: base_url.trim().to_string(),
            locale,
            notify_delete_failure,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
