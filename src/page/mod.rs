//! Page shell - markup and styles for the dashboard
//!
//! Separated into HTML and CSS submodules for maintainability.
//! The wasm module mounts both into the document on start, so the hosting
//! page only needs to load the bundle.
//!
//! # Architecture
//! - `html.rs`: Page structure and layout
//! - `css.rs`: Styling with CSS custom properties

mod css;
mod html;

pub use css::STYLES;
pub use html::TEMPLATE;

/// Id of the template's outer element; its presence means the shell is mounted
pub const ROOT_ID: &str = "dashboard-root";
