use log::Level;
use web_sys::window;

use common::{DEFAULT_PAGE_SIZE, NOTIFICATION_TTL_MS};

const STORAGE_PREFIX: &str = "forecast_";

/// Global application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Backend origin, e.g. "http://localhost:8000". Empty means the page's own origin.
    pub api_origin: String,

    /// Default log level for the application
    pub log_level: Level,

    /// Enable debug mode
    pub debug_mode: bool,

    /// Notification lifetime in milliseconds
    pub toast_duration_ms: u32,

    /// Models shown per page of the list
    pub models_page_size: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_origin: String::new(),
            log_level: Level::Info,
            debug_mode: false,
            toast_duration_ms: NOTIFICATION_TTL_MS as u32,
            models_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn storage_key(name: &str) -> String {
    format!("{}{}", STORAGE_PREFIX, name)
}

impl AppSettings {
    /// Create settings from window location and localStorage overrides
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        let Some(window) = window() else {
            return settings;
        };

        if let Ok(hostname) = window.location().hostname() {
            settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";
            if settings.debug_mode {
                settings.log_level = Level::Debug;
            }
        }

        if let Ok(Some(storage)) = window.local_storage() {
            let read = |name: &str| storage.get_item(&storage_key(name)).ok().flatten();

            if let Some(origin) = read("api_origin") {
                settings.api_origin = origin;
            }

            if let Some(log_level) = read("log_level") {
                settings.log_level = match log_level.to_lowercase().as_str() {
                    "error" => Level::Error,
                    "warn" => Level::Warn,
                    "info" => Level::Info,
                    "debug" => Level::Debug,
                    "trace" => Level::Trace,
                    _ => settings.log_level,
                };
            }

            if let Some(duration) = read("toast_duration_ms").and_then(|v| v.parse().ok()) {
                settings.toast_duration_ms = duration;
            }

            if let Some(size) = read("models_page_size").and_then(|v| v.parse::<u32>().ok()) {
                settings.models_page_size = size.max(1);
            }
        }

        settings
    }

    /// Get the base API URL without a trailing slash
    pub fn api_base_url(&self) -> String {
        self.api_origin.trim_end_matches('/').to_string()
    }

    /// Get the full API URL for an endpoint
    pub fn api_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_base_url(), endpoint)
    }
}

// Global settings instance using thread_local
use std::cell::RefCell;

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::from_environment());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}
