//! Client configuration
//!
//! Selects the mock or remote backend and carries the endpoint, the artificial
//! mock latency, the signed-in user and the message locale.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::messages::Locale;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_USER_EMAIL: &str = "user@example.com";
pub const DEFAULT_MOCK_DELAY_MS: u64 = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Use the in-memory fixture backend instead of HTTP
    pub use_mocks: bool,
    pub base_url: String,
    pub mock_delay_ms: u64,
    pub current_user_email: String,
    pub locale: Locale,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            use_mocks: true,
            base_url: DEFAULT_BASE_URL.to_string(),
            mock_delay_ms: DEFAULT_MOCK_DELAY_MS,
            current_user_email: DEFAULT_USER_EMAIL.to_string(),
            locale: Locale::default(),
        }
    }
}

impl ApiConfig {
    /// Defaults overridden by build-time variables, then (natively) by the
    /// process environment.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_vars(|key| build_var(key).map(str::to_string));
        #[cfg(not(target_arch = "wasm32"))]
        config.apply_vars(|key| std::env::var(key).ok());
        config
    }

    /// Config for tests and scripted use: mock backend, no latency
    pub fn mock() -> Self {
        Self {
            use_mocks: true,
            mock_delay_ms: 0,
            ..Self::default()
        }
    }

    pub fn remote(base_url: impl Into<String>) -> Self {
        Self {
            use_mocks: false,
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn mock_delay(&self) -> Duration {
        Duration::from_millis(self.mock_delay_ms)
    }

    fn apply_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("SHOPLIST_USE_MOCKS").and_then(|v| parse_bool(&v)) {
            self.use_mocks = v;
        }
        if let Some(v) = lookup("SHOPLIST_API_URL").filter(|v| !v.trim().is_empty()) {
            self.base_url = v.trim().trim_end_matches('/').to_string();
        }
        if let Some(v) = lookup("SHOPLIST_MOCK_DELAY_MS").and_then(|v| v.trim().parse().ok()) {
            self.mock_delay_ms = v;
        }
        if let Some(v) = lookup("SHOPLIST_USER").filter(|v| !v.trim().is_empty()) {
            self.current_user_email = v.trim().to_string();
        }
        if let Some(v) = lookup("SHOPLIST_LOCALE").and_then(|v| Locale::parse(&v)) {
            self.locale = v;
        }
    }
}

fn build_var(key: &str) -> Option<&'static str> {
    match key {
        "SHOPLIST_USE_MOCKS" => option_env!("SHOPLIST_USE_MOCKS"),
        "SHOPLIST_API_URL" => option_env!("SHOPLIST_API_URL"),
        "SHOPLIST_MOCK_DELAY_MS" => option_env!("SHOPLIST_MOCK_DELAY_MS"),
        "SHOPLIST_USER" => option_env!("SHOPLIST_USER"),
        "SHOPLIST_LOCALE" => option_env!("SHOPLIST_LOCALE"),
        _ => None,
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
