//! Backend API client
//!
//! Every call goes to the configured origin with a JSON content type and,
//! when a session exists, a bearer token. A 401 on any authenticated call
//! ends the session: the user is told, storage is cleared and the view reset.

use std::rc::Rc;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::context::SessionContext;
use crate::error::{DashboardError, Result};
use crate::types::{ApiErrorBody, AuthResponse, GeneralStats, TelegramUser, TrackedToken, TrackedTransaction};

pub const AUTH_ENDPOINT: &str = "/auth/telegram";
pub const STATS_ENDPOINT: &str = "/api/stats";
pub const TOKENS_ENDPOINT: &str = "/api/me/tokens";
pub const TRANSACTIONS_ENDPOINT: &str = "/api/me/transactions";

/// Backend API client
pub struct ApiClient {
    ctx: Rc<SessionContext>,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(ctx: Rc<SessionContext>) -> Self {
        Self {
            ctx,
            http: reqwest::Client::new(),
        }
    }

    pub fn context(&self) -> &Rc<SessionContext> {
        &self.ctx
    }

    /// Public counters; sent with the token when there is one
    pub async fn general_stats(&self) -> Result<GeneralStats> {
        self.get_json(STATS_ENDPOINT).await
    }

    /// Tokens on the user's watch list
    pub async fn tracked_tokens(&self) -> Result<Vec<TrackedToken>> {
        self.get_json(TOKENS_ENDPOINT).await
    }

    /// Recent deposits for the user's tracked tokens
    pub async fn tracked_transactions(&self) -> Result<Vec<TrackedTransaction>> {
        self.get_json(TRANSACTIONS_ENDPOINT).await
    }

    /// Exchange the widget payload for an access token.
    ///
    /// Deliberately outside `request`: a rejected login is an auth error,
    /// not an expired session.
    pub async fn authenticate(&self, user: &TelegramUser) -> Result<AuthResponse> {
        let response = self
            .http
            .post(self.url(AUTH_ENDPOINT))
            .header("Content-Type", "application/json")
            .header("X-Request-Id", request_id())
            .json(user)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: ApiErrorBody = response.json().await.unwrap_or_default();
            return Err(DashboardError::Auth(
                body.detail.unwrap_or_else(|| "Authentication failed".into()),
            ));
        }

        response.json().await.map_err(DashboardError::from)
    }

    /// Perform GET request and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let response = self.request::<()>(Method::GET, endpoint, None).await?;
        Self::handle_response(response).await
    }

    /// Perform a request with session headers and global 401 handling
    pub async fn request<B: Serialize>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response> {
        let mut builder = self
            .http
            .request(method, self.url(endpoint))
            .header("Content-Type", "application/json")
            .header("X-Request-Id", request_id());

        if let Some(session) = self.ctx.session() {
            builder = builder.header("Authorization", session.bearer());
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            log::warn!("Unauthorized response from {endpoint}, logging out");
            self.ctx.expire_session();
            return Err(DashboardError::Unauthorized);
        }

        Ok(response)
    }

    /// Handle API response, checking for errors
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&error_text)
                .ok()
                .and_then(|body| body.detail)
                .unwrap_or(error_text);
            return Err(DashboardError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response.json().await.map_err(DashboardError::from)
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.ctx.config().api_base)
    }
}

fn request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
