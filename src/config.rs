// Runtime configuration: where the backend lives and which screen to open.

use crate::router::Route;

/// Environment variable holding the API base URL.
pub const API_URL_ENV: &str = "BOOKGEN_API_URL";

/// Backend address used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL; `/api/books` is appended to it.
    pub api_url: String,
    pub start_route: Route,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            start_route: Route::List,
        }
    }
}

impl Config {
    /// Read `BOOKGEN_API_URL`, falling back to the default address.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup(API_URL_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Config {
            api_url,
            ..Config::default()
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_start_route(mut self, route: Route) -> Self {
        self.start_route = route;
        self
    }
}
