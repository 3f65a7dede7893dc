//! HTML rendering for the dashboard lists
//!
//! Produces markup strings for the DOM layer to insert. Every backend field
//! is untrusted and goes through `escape_html` first.

use chrono::{DateTime, Local, NaiveDateTime, Utc};

use crate::config::Config;
use crate::types::{TrackedToken, TrackedTransaction};

pub const NO_TOKENS_PLACEHOLDER: &str = "<li>You are not tracking any tokens yet.</li>";
pub const NO_TRANSACTIONS_PLACEHOLDER: &str = "<li>No recent transactions to show.</li>";
pub const TOKENS_ERROR_PLACEHOLDER: &str = "<li>Error loading tokens</li>";
pub const TRANSACTIONS_ERROR_PLACEHOLDER: &str = "<li>Error loading recent transactions</li>";
pub const STATS_ERROR_TEXT: &str = "Error";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Escape text for safe use in element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `0x1234...abcd` style shortening; short values are returned whole
pub fn abbreviate(text: &str, head: usize, tail: usize) -> String {
    let count = text.chars().count();
    if count <= head.saturating_add(tail) {
        return text.to_string();
    }
    let start: String = text.chars().take(head).collect();
    let end: String = text.chars().skip(count - tail).collect();
    format!("{start}...{end}")
}

/// Local, human-readable form of a backend timestamp
pub fn format_timestamp(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(utc) => utc.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string(),
        None => raw.to_string(),
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    // Naive ISO strings are stored in UTC
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Token list markup
pub fn render_tracked_tokens(tokens: &[TrackedToken]) -> String {
    if tokens.is_empty() {
        return NO_TOKENS_PLACEHOLDER.to_string();
    }

    tokens
        .iter()
        .map(|token| {
            format!(
                "<li><strong>{}</strong>: <code>{}</code></li>",
                escape_html(&token.token_symbol),
                escape_html(&token.token_address)
            )
        })
        .collect()
}

/// Transaction list markup
pub fn render_tracked_transactions(transactions: &[TrackedTransaction], config: &Config) -> String {
    if transactions.is_empty() {
        return NO_TRANSACTIONS_PLACEHOLDER.to_string();
    }

    let (head, tail) = (config.abbrev_head, config.abbrev_tail);
    transactions
        .iter()
        .map(|tx| {
            let hash = escape_html(&tx.tx_hash);
            format!(
                "<li><strong>{symbol}</strong>: {amount}\
                 <br>From: <code>{from}</code>\
                 <br>Tx: <a href=\"{explorer}{hash}\" target=\"_blank\" rel=\"noopener noreferrer\">{short_hash}</a>\
                 <br>Date: {date}</li>",
                symbol = escape_html(&tx.token_symbol),
                amount = escape_html(&tx.amount),
                from = escape_html(&abbreviate(&tx.from_address, head, tail)),
                explorer = escape_html(&config.explorer_tx_url),
                short_hash = escape_html(&abbreviate(&tx.tx_hash, head, tail)),
                date = escape_html(&format_timestamp(&tx.block_timestamp)),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(symbol: &str, address: &str) -> TrackedToken {
        TrackedToken {
            token_symbol: symbol.into(),
            token_address: address.into(),
        }
    }

    fn transaction(hash: &str, from: &str, timestamp: &str) -> TrackedTransaction {
        TrackedTransaction {
            token_symbol: "USDT".into(),
            amount: "150.25".into(),
            tx_hash: hash.into(),
            from_address: from.into(),
            block_timestamp: timestamp.into(),
        }
    }

    #[test]
    fn test_empty_token_list_is_placeholder() {
        assert_eq!(render_tracked_tokens(&[]), NO_TOKENS_PLACEHOLDER);
    }

    #[test]
    fn test_tokens_rendered_in_order() {
        let html = render_tracked_tokens(&[token("USDC", "0xaaa"), token("WETH", "0xbbb"), token("DAI", "0xccc")]);
        assert_eq!(html.matches("<li>").count(), 3);
        let usdc = html.find("USDC").unwrap();
        let weth = html.find("WETH").unwrap();
        let dai = html.find("DAI").unwrap();
        assert!(usdc < weth && weth < dai);
    }

    #[test]
    fn test_markup_injection_is_escaped() {
        let html = render_tracked_tokens(&[token("<img src=x>", "0x<b>")]);
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img src=x&gt;"));
        assert!(html.contains("0x&lt;b&gt;"));
    }

    #[test]
    fn test_abbreviate() {
        assert_eq!(abbreviate("0x1234567890abcdef", 6, 4), "0x1234...cdef");
        assert_eq!(abbreviate("0x12345678", 6, 4), "0x12345678");
        assert_eq!(abbreviate("", 6, 4), "");
        assert_eq!(abbreviate("0x1234567890abcdef", usize::MAX, 4), "0x1234567890abcdef");
    }

    #[test]
    fn test_transaction_rendering() {
        let config = Config::new("https://dash.example");
        let tx = transaction(
            "0xdeadbeefcafebabe0011",
            "0xfeedface00112233aabb",
            "not a date <script>",
        );

        let html = render_tracked_transactions(&[tx], &config);

        assert!(html.contains("<strong>USDT</strong>: 150.25"));
        assert!(html.contains("<code>0xfeed...aabb</code>"));
        assert!(html.contains("href=\"https://polygonscan.com/tx/0xdeadbeefcafebabe0011\""));
        assert!(html.contains(">0xdead...0011</a>"));
        assert!(html.contains("Date: not a date &lt;script&gt;"));
    }

    #[test]
    fn test_transaction_attribute_injection() {
        let config = Config::new("https://dash.example");
        let html = render_tracked_transactions(&[transaction("\" onmouseover=\"x", "0x1", "")], &config);
        assert!(!html.contains("\" onmouseover"));
        assert!(html.contains("&quot; onmouseover=&quot;x"));
    }

    #[test]
    fn test_empty_transactions_placeholder() {
        let config = Config::new("https://dash.example");
        assert_eq!(render_tracked_transactions(&[], &config), NO_TRANSACTIONS_PLACEHOLDER);
    }

    #[test]
    fn test_format_timestamp_local() {
        let expected = DateTime::parse_from_rfc3339("2024-05-01T10:30:00Z")
            .unwrap()
            .with_timezone(&Local)
            .format(TIMESTAMP_FORMAT)
            .to_string();

        assert_eq!(format_timestamp("2024-05-01T10:30:00Z"), expected);
        assert_eq!(format_timestamp("2024-05-01T10:30:00.000Z"), expected);
        assert_eq!(format_timestamp("2024-05-01T10:30:00"), expected);
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }
}
