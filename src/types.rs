//! Common types for the dashboard
//!
//! Wire types exchanged with the backend and the login widget.

use serde::{Deserialize, Deserializer, Serialize};

/// Client-held proof of authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub user_id: String,
    pub display_name: String,
}

impl Session {
    /// Name shown in the header; falls back to the user id
    pub fn display_label(&self) -> String {
        if self.display_name.trim().is_empty() {
            format!("User ID: {}", self.user_id)
        } else {
            self.display_name.clone()
        }
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

/// A token on the user's watch list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedToken {
    #[serde(default = "unknown_symbol", deserialize_with = "symbol_or_unknown")]
    pub token_symbol: String,
    pub token_address: String,
}

/// A deposit recorded for one of the user's tracked tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedTransaction {
    #[serde(default = "unknown_symbol", deserialize_with = "symbol_or_unknown")]
    pub token_symbol: String,
    /// Kept as text: amounts exceed f64 precision
    #[serde(deserialize_with = "string_or_number")]
    pub amount: String,
    pub tx_hash: String,
    pub from_address: String,
    pub block_timestamp: String,
}

/// Public counters from `/api/stats`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralStats {
    pub total_users: u64,
    pub total_transactions: u64,
}

/// Identity payload handed over by the Telegram login widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelegramUser {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub auth_date: i64,
    #[serde(default)]
    pub hash: String,
    /// Anything else the widget sends; forwarded untouched for hash verification
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TelegramUser {
    /// First name, or `User <id>` when the widget did not send one
    pub fn display_name(&self) -> String {
        match self.first_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("User {}", self.id),
        }
    }
}

/// Successful answer from `POST /auth/telegram`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub user_id: Option<String>,
}

/// Error body the backend attaches to failed requests
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

fn unknown_symbol() -> String {
    "UNKNOWN".to_string()
}

fn symbol_or_unknown<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    let symbol = Option::<String>::deserialize(de)?;
    Ok(symbol.filter(|s| !s.is_empty()).unwrap_or_else(unknown_symbol))
}

fn string_or_number<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(de)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("expected string or number, got {other}"))),
    }
}

fn opt_string_or_number<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    match Option::<serde_json::Value>::deserialize(de)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!("expected string or number, got {other}"))),
    }
}
