//! Wire DTOs for the blog REST API.
//!
//! DESIGN
//! ======
//! These types mirror the server's JSON bodies. Numeric identifiers are
//! accepted as integers or integer-valued floats so a loosely typed server
//! cannot break decoding of otherwise valid records.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// An account as returned by `/auth/login` and `/auth/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned user identifier.
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub id: i64,
    /// Public handle, if the server includes it.
    #[serde(default)]
    pub username: Option<String>,
    /// Login email. Empty when the server omits it.
    #[serde(default)]
    pub email: String,
    /// ISO 8601 registration timestamp, if provided.
    #[serde(default)]
    pub created_at: Option<String>,
}

impl User {
    /// Name shown in navigation: the username, else the email local part.
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(name) = self.username.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.to_owned();
        }
        self.email.split('@').next().unwrap_or_default().to_owned()
    }
}

/// A published blog post.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Server-assigned post identifier.
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub id: i64,
    #[serde(default)]
    pub title: String,
    /// Post body as server-sanitized HTML.
    #[serde(default)]
    pub content: String,
    /// ISO 8601 creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Author handle, absent when the author record is gone.
    #[serde(default)]
    pub author_username: Option<String>,
    /// Author identifier.
    #[serde(default, deserialize_with = "deserialize_opt_i64_from_number")]
    pub user_id: Option<i64>,
}

/// One page of the `/posts` listing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPage {
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default, deserialize_with = "deserialize_opt_i64_from_number")]
    pub total_posts: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_opt_i64_from_number")]
    pub total_pages: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_opt_i64_from_number")]
    pub current_page: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_opt_i64_from_number")]
    pub per_page: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_opt_i64_from_number")]
    pub next_page_num: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_opt_i64_from_number")]
    pub prev_page_num: Option<i64>,
}

/// Successful `/auth/login` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// `/auth/me` body. Some server builds wrap the user, others return it bare.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum CurrentUserResponse {
    Wrapped { user: User },
    Bare(User),
}

impl CurrentUserResponse {
    pub(crate) fn into_user(self) -> User {
        match self {
            Self::Wrapped { user } | Self::Bare(user) => user,
        }
    }
}

/// Error body the server attaches to 4xx responses.
#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub(crate) struct CreatePostRequest<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

fn deserialize_opt_i64_from_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(value) => i64_from_value(value).map(Some).map_err(D::Error::custom),
    }
}

fn deserialize_i64_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    i64_from_value(value).map_err(D::Error::custom)
}

fn i64_from_value(value: serde_json::Value) -> Result<i64, &'static str> {
    match value {
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.fract() == 0.0
                && float >= i64::MIN as f64
                && float <= i64::MAX as f64
            {
                return Ok(float as i64);
            }
            Err("expected integer-compatible number")
        }
        _ => Err("expected number"),
    }
}
