//! Token Tracker Dashboard - browser view for the token tracker bot
//!
//! A wasm module that signs the user in through the Telegram login widget
//! and shows the tokens and deposits the bot tracks for them.
//!
//! # Architecture
//! - `browser` is the wasm entry point and owns every `web-sys` call
//! - `SessionContext` carries config, session storage and page effects
//! - `ApiClient` talks to the backend; a 401 anywhere ends the session
//! - `Dashboard` picks the anonymous/authenticated view and runs the loads
//!
//! Everything except `browser` is target-independent and tested natively.

#![allow(clippy::doc_markdown)] // Doc style flexibility
#![allow(clippy::if_not_else)] // Readability preference

pub mod auth;
pub mod client;
pub mod config;
pub mod context;
pub mod dashboard;
pub mod error;
pub mod page;
pub mod render;
pub mod storage;
pub mod types;
pub mod view;

#[cfg(target_arch = "wasm32")]
mod browser;

pub use client::ApiClient;
pub use config::{Config, WidgetConfig};
pub use context::{Host, SessionContext};
pub use dashboard::Dashboard;
pub use error::{DashboardError, Result};
pub use storage::{KeyValueStore, MemoryStore, SessionStore};
pub use types::*;
pub use view::{DashboardView, Region, ViewState};
