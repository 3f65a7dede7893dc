//! Dashboard controller
//!
//! Picks the view state from storage, lays out the page for it and runs the
//! data loads. Loads are independent: each one writes only its own region
//! when it resolves, in whatever order they finish.

use std::cell::Cell;
use std::rc::Rc;

use crate::client::ApiClient;
use crate::context::SessionContext;
use crate::error::DashboardError;
use crate::render;
use crate::view::{DashboardView, Region, ViewState};

pub struct Dashboard {
    client: Rc<ApiClient>,
    view: Rc<dyn DashboardView>,
    widget_injected: Cell<bool>,
}

impl Dashboard {
    pub fn new(client: Rc<ApiClient>, view: Rc<dyn DashboardView>) -> Self {
        Self {
            client,
            view,
            widget_injected: Cell::new(false),
        }
    }

    fn ctx(&self) -> &Rc<SessionContext> {
        self.client.context()
    }

    /// Render the page for the stored session and load its data
    pub async fn boot(&self) -> ViewState {
        let state = ViewState::from_session(self.ctx().session());

        match &state {
            ViewState::Anonymous => {
                log::info!("No session, showing login");
                self.show_anonymous();
                self.load_stats().await;
            }
            ViewState::Authenticated(session) => {
                log::info!("Session found for user {}", session.user_id);
                self.show_authenticated(&session.display_label());
                futures::join!(self.load_stats(), self.load_tokens(), self.load_transactions());
            }
        }

        state
    }

    fn show_anonymous(&self) {
        self.view.set_visible(Region::LoginView, true);
        self.view.set_visible(Region::AuthenticatedView, false);
        self.view.set_visible(Region::LogoutButton, false);
        if !self.widget_injected.replace(true) {
            self.view.inject_login_widget(&self.ctx().config().widget);
        }
    }

    fn show_authenticated(&self, label: &str) {
        self.view.set_visible(Region::LoginView, false);
        self.view.set_visible(Region::AuthenticatedView, true);
        self.view.set_visible(Region::LogoutButton, true);
        self.view.set_text(Region::UserInfo, label);

        let ctx = Rc::clone(self.ctx());
        self.view.bind_logout(Box::new(move || {
            log::info!("Logout requested");
            // Failures are logged inside; the view resets regardless
            let _ = ctx.logout();
        }));
    }

    async fn load_stats(&self) {
        match self.client.general_stats().await {
            Ok(stats) => {
                self.view.set_text(Region::TotalUsers, &stats.total_users.to_string());
                self.view.set_text(Region::TotalTransactions, &stats.total_transactions.to_string());
            }
            Err(e) => {
                log_load_error("general stats", &e);
                self.view.set_text(Region::TotalUsers, render::STATS_ERROR_TEXT);
                self.view.set_text(Region::TotalTransactions, render::STATS_ERROR_TEXT);
            }
        }
    }

    async fn load_tokens(&self) {
        let html = match self.client.tracked_tokens().await {
            Ok(tokens) => {
                log::debug!("Loaded {} tracked tokens", tokens.len());
                render::render_tracked_tokens(&tokens)
            }
            Err(e) => {
                log_load_error("tracked tokens", &e);
                render::TOKENS_ERROR_PLACEHOLDER.to_string()
            }
        };
        self.view.set_html(Region::TrackedTokens, &html);
    }

    async fn load_transactions(&self) {
        let html = match self.client.tracked_transactions().await {
            Ok(transactions) => {
                log::debug!("Loaded {} tracked transactions", transactions.len());
                render::render_tracked_transactions(&transactions, self.ctx().config())
            }
            Err(e) => {
                log_load_error("tracked transactions", &e);
                render::TRANSACTIONS_ERROR_PLACEHOLDER.to_string()
            }
        };
        self.view.set_html(Region::TrackedTransactions, &html);
    }
}

fn log_load_error(what: &str, e: &DashboardError) {
    if e.is_unauthorized() {
        log::warn!("Not loading {what}: session expired");
    } else {
        log::error!("Error fetching {what}: {e}");
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::client::{STATS_ENDPOINT, TOKENS_ENDPOINT, TRANSACTIONS_ENDPOINT};
    use crate::context::SESSION_EXPIRED_MESSAGE;
    use crate::context::testing::{RecordingHost, context, session};
    use crate::storage::{ACCESS_TOKEN_KEY, DISPLAY_NAME_KEY, USER_ID_KEY};
    use crate::view::testing::RecordingView;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount(server: &MockServer, endpoint: &str, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(template)
            .mount(server)
            .await;
    }

    fn json(body: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(body)
    }

    async fn backend(tokens: ResponseTemplate, transactions: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        mount(&server, STATS_ENDPOINT, json(serde_json::json!({"total_users": 12, "total_transactions": 345}))).await;
        mount(&server, TOKENS_ENDPOINT, tokens).await;
        mount(&server, TRANSACTIONS_ENDPOINT, transactions).await;
        server
    }

    fn dashboard(server: &MockServer, logged_in: bool) -> (Dashboard, Rc<RecordingView>, Rc<RecordingHost>, Rc<SessionContext>) {
        let (ctx, host) = context(&server.uri(), logged_in.then(session));
        let view = Rc::new(RecordingView::default());
        let view_dyn: Rc<dyn DashboardView> = view.clone();
        let client = Rc::new(ApiClient::new(ctx.clone()));
        (Dashboard::new(client, view_dyn), view, host, ctx)
    }

    #[tokio::test]
    async fn test_anonymous_boot_shows_login_and_stats_only() {
        let server = backend(json(serde_json::json!([])), json(serde_json::json!([]))).await;
        let (dashboard, view, _host, _ctx) = dashboard(&server, false);

        let state = dashboard.boot().await;

        assert_eq!(state, ViewState::Anonymous);
        assert!(view.is_visible(Region::LoginView));
        assert!(!view.is_visible(Region::AuthenticatedView));
        assert_eq!(view.widgets.borrow().len(), 1);
        assert_eq!(view.content(Region::TotalUsers).as_deref(), Some("12"));
        assert_eq!(view.content(Region::TotalTransactions).as_deref(), Some("345"));
        assert_eq!(view.content(Region::TrackedTokens), None);

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1, "stats fetched once, nothing else");
        assert_eq!(received[0].url.path(), STATS_ENDPOINT);
    }

    #[tokio::test]
    async fn test_authenticated_boot_renders_all_regions() {
        let server = backend(
            json(serde_json::json!([
                {"token_symbol": "<img src=x>", "token_address": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"},
                {"token_symbol": "WETH", "token_address": "0x7ceb23fd6bc0add59e62ac25578270cff1b9f619"}
            ])),
            json(serde_json::json!([{
                "token_symbol": "USDC",
                "amount": "25.5",
                "tx_hash": "0x9f8e7d6c5b4a39281706f5e4d3c2b1a0",
                "from_address": "0x1111222233334444555566667777888899990000",
                "block_timestamp": "2024-05-01T10:30:00.000Z"
            }])),
        )
        .await;
        let (dashboard, view, _host, _ctx) = dashboard(&server, true);

        let state = dashboard.boot().await;

        assert!(state.is_authenticated());
        assert!(!view.is_visible(Region::LoginView));
        assert!(view.is_visible(Region::AuthenticatedView));
        assert!(view.widgets.borrow().is_empty());
        assert_eq!(view.content(Region::UserInfo).as_deref(), Some("Ana"));
        assert_eq!(view.content(Region::TotalUsers).as_deref(), Some("12"));

        let tokens = view.content(Region::TrackedTokens).unwrap();
        assert_eq!(tokens.matches("<li>").count(), 2);
        assert!(tokens.contains("&lt;img src=x&gt;"));
        assert!(!tokens.contains("<img"));

        let transactions = view.content(Region::TrackedTransactions).unwrap();
        assert!(transactions.contains("0x9f8e...b1a0"));
        assert!(transactions.contains("0x1111...0000"));

        let stats_calls = server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .filter(|r| r.url.path() == STATS_ENDPOINT)
            .count();
        assert_eq!(stats_calls, 1);
    }

    #[tokio::test]
    async fn test_empty_token_list_shows_exactly_placeholder() {
        let server = backend(json(serde_json::json!([])), json(serde_json::json!([]))).await;
        let (dashboard, view, host, _ctx) = dashboard(&server, true);

        dashboard.boot().await;

        assert_eq!(view.content(Region::TrackedTokens).as_deref(), Some(render::NO_TOKENS_PLACEHOLDER));
        assert_eq!(
            view.content(Region::TrackedTransactions).as_deref(),
            Some(render::NO_TRANSACTIONS_PLACEHOLDER)
        );
        assert!(host.alerts.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_failed_load_renders_inline_error() {
        let server = backend(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({"detail": "Failed to fetch user tokens"})),
            ResponseTemplate::new(404),
        )
        .await;
        let (dashboard, view, host, ctx) = dashboard(&server, true);

        dashboard.boot().await;

        assert_eq!(view.content(Region::TrackedTokens).as_deref(), Some(render::TOKENS_ERROR_PLACEHOLDER));
        assert_eq!(
            view.content(Region::TrackedTransactions).as_deref(),
            Some(render::TRANSACTIONS_ERROR_PLACEHOLDER)
        );
        assert_eq!(view.content(Region::TotalUsers).as_deref(), Some("12"));
        assert_eq!(ctx.session(), Some(session()));
        assert_eq!(host.reloads.get(), 0);
    }

    #[tokio::test]
    async fn test_expired_session_logs_out() {
        let server = backend(ResponseTemplate::new(401), json(serde_json::json!([]))).await;
        let (dashboard, view, host, ctx) = dashboard(&server, true);

        dashboard.boot().await;

        assert_eq!(ctx.session(), None);
        assert_eq!(host.reloads.get(), 1);
        assert_eq!(view.content(Region::TrackedTokens).as_deref(), Some(render::TOKENS_ERROR_PLACEHOLDER));

        // The reload lands in the anonymous view
        let next_view = Rc::new(RecordingView::default());
        let next_view_dyn: Rc<dyn DashboardView> = next_view.clone();
        let next = Dashboard::new(Rc::new(ApiClient::new(ctx.clone())), next_view_dyn);
        assert_eq!(next.boot().await, ViewState::Anonymous);
        assert!(next_view.is_visible(Region::LoginView));
    }

    #[tokio::test]
    async fn test_concurrent_unauthorized_loads_expire_once() {
        let server = MockServer::start().await;
        for endpoint in [STATS_ENDPOINT, TOKENS_ENDPOINT, TRANSACTIONS_ENDPOINT] {
            mount(&server, endpoint, ResponseTemplate::new(401)).await;
        }
        let (dashboard, view, host, ctx) = dashboard(&server, true);

        dashboard.boot().await;

        assert_eq!(server.received_requests().await.unwrap().len(), 3);
        assert_eq!(ctx.session(), None);
        assert_eq!(host.alerts.borrow().as_slice(), [SESSION_EXPIRED_MESSAGE]);
        assert_eq!(host.reloads.get(), 1);
        assert_eq!(view.content(Region::TotalUsers).as_deref(), Some(render::STATS_ERROR_TEXT));
    }

    #[tokio::test]
    async fn test_login_widget_injected_once() {
        let server = backend(json(serde_json::json!([])), json(serde_json::json!([]))).await;
        let (dashboard, view, _host, ctx) = dashboard(&server, false);

        dashboard.boot().await;
        dashboard.boot().await;

        let widgets = view.widgets.borrow();
        assert_eq!(widgets.len(), 1);
        assert_eq!(widgets[0], ctx.config().widget);
    }

    #[tokio::test]
    async fn test_logout_control_clears_storage_and_resets() {
        let server = backend(json(serde_json::json!([])), json(serde_json::json!([]))).await;
        let (dashboard, view, host, ctx) = dashboard(&server, true);
        dashboard.boot().await;

        view.click_logout();

        for key in [ACCESS_TOKEN_KEY, USER_ID_KEY, DISPLAY_NAME_KEY] {
            assert_eq!(ctx.sessions().backend().get(key).unwrap(), None);
        }
        assert_eq!(host.reloads.get(), 1);
        assert_eq!(dashboard.boot().await, ViewState::Anonymous);
    }
}
