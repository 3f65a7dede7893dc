//! View state and the DOM seam
//!
//! The dashboard is either anonymous or authenticated, decided once per page
//! load from storage. `DashboardView` is everything the controller needs from
//! the page; the browser implementation lives in `browser`.

use crate::config::WidgetConfig;
use crate::types::Session;

/// Mutually exclusive UI modes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Anonymous,
    Authenticated(Session),
}

impl ViewState {
    pub fn from_session(session: Option<Session>) -> Self {
        session.map_or(ViewState::Anonymous, ViewState::Authenticated)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, ViewState::Authenticated(_))
    }
}

/// Page regions the dashboard writes into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    LoginView,
    AuthenticatedView,
    UserInfo,
    LogoutButton,
    LoginWidgetContainer,
    TotalUsers,
    TotalTransactions,
    TrackedTokens,
    TrackedTransactions,
}

impl Region {
    /// Element id in the page markup
    pub fn element_id(self) -> &'static str {
        match self {
            Region::LoginView => "login-view",
            Region::AuthenticatedView => "authenticated-view",
            Region::UserInfo => "logged-in-user-info",
            Region::LogoutButton => "logout-button",
            Region::LoginWidgetContainer => "telegram-login-button-container",
            Region::TotalUsers => "total-users",
            Region::TotalTransactions => "total-transactions",
            Region::TrackedTokens => "tracked-tokens-list",
            Region::TrackedTransactions => "tracked-transactions",
        }
    }
}

/// Page operations used by the dashboard
pub trait DashboardView {
    /// Show or hide a region
    fn set_visible(&self, region: Region, visible: bool);

    /// Replace a region's text content
    fn set_text(&self, region: Region, text: &str);

    /// Replace a region's markup; callers pass escaped HTML only
    fn set_html(&self, region: Region, html: &str);

    /// Append the login widget script to its container
    fn inject_login_widget(&self, widget: &WidgetConfig);

    /// Run `on_logout` when the logout control is used
    fn bind_logout(&self, on_logout: Box<dyn Fn()>);
}
