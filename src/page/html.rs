//! Dashboard HTML template
//!
//! Contains the page structure:
//! - Header with the signed-in user and logout control
//! - Public stats cards
//! - Login view with the widget container
//! - Tracked tokens and recent transactions lists
//!
//! Element ids must match `view::Region::element_id`.

pub const TEMPLATE: &str = r#"
    <div class="container" id="dashboard-root">
        <header>
            <div>
                <h1>Token Tracker</h1>
                <span class="subtitle">Deposits to your wallet, tracked by the Telegram bot</span>
            </div>
            <div class="header-controls">
                <span class="user-badge" id="logged-in-user-info"></span>
                <button class="btn btn-secondary hidden" id="logout-button">Log out</button>
            </div>
        </header>

        <div class="grid">
            <!-- Public Stats -->
            <div class="card">
                <div class="card-header">
                    <span class="card-title">Users</span>
                </div>
                <div class="card-value" id="total-users">--</div>
            </div>

            <div class="card">
                <div class="card-header">
                    <span class="card-title">Deposits Recorded</span>
                </div>
                <div class="card-value" id="total-transactions">--</div>
            </div>

            <!-- Anonymous -->
            <div class="card wide" id="login-view">
                <div class="card-header">
                    <span class="card-title">Sign in</span>
                </div>
                <p class="hint">Log in with Telegram to see the tokens you track.</p>
                <div class="login-widget" id="telegram-login-button-container"></div>
            </div>

            <!-- Authenticated -->
            <div class="wide hidden" id="authenticated-view">
                <div class="grid">
                    <div class="card">
                        <div class="card-header">
                            <span class="card-title">Tracked Tokens</span>
                        </div>
                        <ul class="item-list" id="tracked-tokens-list">
                            <li class="dim">Loading...</li>
                        </ul>
                    </div>

                    <div class="card">
                        <div class="card-header">
                            <span class="card-title">Recent Transactions</span>
                        </div>
                        <ul class="item-list" id="tracked-transactions">
                            <li class="dim">Loading...</li>
                        </ul>
                    </div>
                </div>
            </div>
        </div>
    </div>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Region;

    #[test]
    fn test_template_has_every_region() {
        for region in [
            Region::LoginView,
            Region::AuthenticatedView,
            Region::UserInfo,
            Region::LogoutButton,
            Region::LoginWidgetContainer,
            Region::TotalUsers,
            Region::TotalTransactions,
            Region::TrackedTokens,
            Region::TrackedTransactions,
        ] {
            let attr = format!("id=\"{}\"", region.element_id());
            assert_eq!(TEMPLATE.matches(&attr).count(), 1, "{attr}");
        }
    }
}
