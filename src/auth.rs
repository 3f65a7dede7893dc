//! Telegram login flow
//!
//! The widget hands over a signed identity payload. The backend checks the
//! signature and answers with an access token, which becomes the session.

use crate::client::ApiClient;
use crate::error::{DashboardError, Result};
use crate::types::{Session, TelegramUser};

/// Exchange a widget payload for a session and persist it
pub async fn login(client: &ApiClient, user: &TelegramUser) -> Result<Session> {
    log::debug!("Authenticating Telegram user {}", user.id);
    let response = client.authenticate(user).await?;

    let access_token = response
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| DashboardError::Auth("No access token received".into()))?;

    let session = Session {
        access_token,
        user_id: response.user_id.unwrap_or_else(|| user.id.to_string()),
        display_name: user.display_name(),
    };
    client.context().sessions().save(&session)?;
    log::info!("Logged in as user {}", session.user_id);

    Ok(session)
}

/// Entry point for the widget callback.
///
/// Failures are reported to the user and leave any stored session as it was;
/// success reloads the page into the authenticated view.
pub async fn handle_widget_payload(client: &ApiClient, payload: serde_json::Value) {
    let host = client.context().host();

    let result = match serde_json::from_value::<TelegramUser>(payload) {
        Ok(user) => login(client, &user).await,
        Err(e) => Err(DashboardError::from(e)),
    };

    match result {
        Ok(session) => {
            host.alert(&format!("Login successful! Welcome, {}.", session.display_name));
            host.reload();
        }
        Err(e) => {
            log::error!("Telegram login failed: {e}");
            host.alert(&format!("Login failed: {e}"));
        }
    }
}
