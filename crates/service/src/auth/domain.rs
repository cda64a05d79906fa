use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Logged-in provider, kept in the session registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderSession {
    pub username: String,
    pub logged_in: bool,
    pub logged_in_at: DateTime<Utc>,
}
