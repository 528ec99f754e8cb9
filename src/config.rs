//! Client configuration baked in at build time.
//!
//! A browser bundle has no process environment, so values are captured from
//! the build environment with `option_env!`. Parsing goes through a lookup
//! function so the defaults and normalization can be tested.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE: &str = "/api";
pub const DEFAULT_TOKEN_KEY: &str = "authToken";
pub const LOGIN_PATH: &str = "/login";
pub const POST_LOGIN_PATH: &str = "/create-post";
pub const APP_NAME: &str = "SimpleBlog";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// REST API root, without a trailing slash.
    pub api_base: String,
    /// `localStorage` key for the session token.
    pub token_key: String,
    pub login_path: String,
    /// Where a successful login lands.
    pub post_login_path: String,
    pub app_name: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl ClientConfig {
    /// Build config from variables captured at compile time.
    ///
    /// Optional:
    /// - `SIMPLEBLOG_API_BASE`: default `/api`
    /// - `SIMPLEBLOG_TOKEN_KEY`: default `authToken`
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| match key {
            "SIMPLEBLOG_API_BASE" => option_env!("SIMPLEBLOG_API_BASE"),
            "SIMPLEBLOG_TOKEN_KEY" => option_env!("SIMPLEBLOG_TOKEN_KEY"),
            _ => None,
        })
    }

    /// Build config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<'a>(lookup: impl Fn(&str) -> Option<&'a str>) -> Self {
        let read = |key: &str| lookup(key).map(str::trim).filter(|v| !v.is_empty());
        let api_base = normalize_api_base(read("SIMPLEBLOG_API_BASE").unwrap_or(DEFAULT_API_BASE));
        let token_key = read("SIMPLEBLOG_TOKEN_KEY").unwrap_or(DEFAULT_TOKEN_KEY).to_owned();
        Self {
            api_base,
            token_key,
            login_path: LOGIN_PATH.to_owned(),
            post_login_path: POST_LOGIN_PATH.to_owned(),
            app_name: APP_NAME.to_owned(),
        }
    }
}

fn normalize_api_base(raw: &str) -> String {
    let trimmed = raw.trim_end_matches('/');
    if trimmed.is_empty() { "/".to_owned() } else { trimmed.to_owned() }
}
