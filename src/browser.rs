//! Browser bindings
//!
//! `web-sys` implementations of the storage, host and view seams, plus the
//! wasm entry point and the global callback the Telegram widget invokes.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlScriptElement, Storage, Window};

use crate::auth;
use crate::client::ApiClient;
use crate::config::{Config, WidgetConfig};
use crate::context::{Host, SessionContext};
use crate::dashboard::Dashboard;
use crate::error::{DashboardError, Result};
use crate::page;
use crate::storage::{KeyValueStore, SessionStore};
use crate::view::{DashboardView, Region};

/// Main wasm entry point
#[wasm_bindgen(start)]
pub fn start() -> std::result::Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| DashboardError::Dom("no window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| DashboardError::Dom("no document".into()))?;

    let config = config_from_page(&window, &document)?;
    wasm_logger::init(wasm_logger::Config::new(config.log_level()));
    config.validate()?;

    mount_shell(&document)?;

    let storage = window
        .local_storage()?
        .ok_or_else(|| DashboardError::Storage("localStorage unavailable".into()))?;
    let host: Rc<dyn Host> = Rc::new(BrowserHost { window: window.clone() });
    let callback_name = config.widget.callback_name.clone();
    let ctx = Rc::new(SessionContext::new(
        config,
        SessionStore::new(Box::new(BrowserStore { storage })),
        host,
    ));
    let client = Rc::new(ApiClient::new(ctx));

    install_login_callback(&window, Rc::clone(&client), &callback_name)?;

    let view: Rc<dyn DashboardView> = Rc::new(BrowserView { document });
    let dashboard = Dashboard::new(client, view);
    wasm_bindgen_futures::spawn_local(async move {
        let state = dashboard.boot().await;
        log::debug!("Dashboard ready (authenticated: {})", state.is_authenticated());
    });

    Ok(())
}

/// Defaults for the page origin, overridden by `data-*` attributes on `<body>`
fn config_from_page(window: &Window, document: &Document) -> Result<Config> {
    let origin = window.location().origin()?;
    let body = document.body();
    Ok(Config::from_lookup(&origin, |key| {
        let attr = format!("data-{}", key.to_ascii_lowercase().replace('_', "-"));
        body.as_ref().and_then(|b| b.get_attribute(&attr))
    }))
}

/// Append styles and markup unless the hosting page already carries them
fn mount_shell(document: &Document) -> Result<()> {
    if document.get_element_by_id(page::ROOT_ID).is_some() {
        return Ok(());
    }

    let style = document.create_element("style")?;
    style.set_text_content(Some(page::STYLES));
    let head = document
        .head()
        .ok_or_else(|| DashboardError::Dom("no <head>".into()))?;
    head.append_child(&style)?;

    let body = document
        .body()
        .ok_or_else(|| DashboardError::Dom("no <body>".into()))?;
    body.insert_adjacent_html("beforeend", page::TEMPLATE)?;
    Ok(())
}

/// Expose `window.<name>(user)` for the widget; it forwards into the login flow
fn install_login_callback(window: &Window, client: Rc<ApiClient>, name: &str) -> Result<()> {
    let callback = Closure::<dyn Fn(JsValue)>::new(move |user: JsValue| {
        let client = Rc::clone(&client);
        wasm_bindgen_futures::spawn_local(async move {
            match js_value_to_json(&user) {
                Ok(payload) => auth::handle_widget_payload(&client, payload).await,
                Err(e) => {
                    log::error!("Unreadable widget payload: {e}");
                    client.context().host().alert(&format!("Login failed: {e}"));
                }
            }
        });
    });

    js_sys::Reflect::set(window, &JsValue::from_str(name), callback.as_ref())?;
    // Lives for the page lifetime
    callback.forget();
    log::debug!("Installed window.{name}");
    Ok(())
}

fn js_value_to_json(value: &JsValue) -> Result<serde_json::Value> {
    let text: String = js_sys::JSON::stringify(value)?.into();
    Ok(serde_json::from_str(&text)?)
}

/// `localStorage`-backed store
struct BrowserStore {
    storage: Storage,
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| DashboardError::Storage(format!("get {key}: {e:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| DashboardError::Storage(format!("set {key}: {e:?}")))
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| DashboardError::Storage(format!("remove {key}: {e:?}")))
    }
}

struct BrowserHost {
    window: Window,
}

impl Host for BrowserHost {
    fn alert(&self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            log::warn!("alert failed: {e:?}");
        }
    }

    fn reload(&self) {
        if let Err(e) = self.window.location().reload() {
            log::error!("reload failed: {e:?}");
        }
    }
}

struct BrowserView {
    document: Document,
}

impl BrowserView {
    /// Missing elements are skipped; late results may land after a reset
    fn element(&self, region: Region) -> Option<Element> {
        let element = self.document.get_element_by_id(region.element_id());
        if element.is_none() {
            log::debug!("#{} not in page", region.element_id());
        }
        element
    }

    fn build_widget_script(&self, widget: &WidgetConfig) -> Result<HtmlScriptElement> {
        let script: HtmlScriptElement = self
            .document
            .create_element("script")?
            .dyn_into()
            .map_err(|_| DashboardError::Dom("script element has unexpected type".into()))?;

        for (name, value) in widget.script_attributes() {
            script.set_attribute(name, &value)?;
        }
        Ok(script)
    }
}

impl DashboardView for BrowserView {
    fn set_visible(&self, region: Region, visible: bool) {
        if let Some(element) = self.element(region) {
            if let Err(e) = element.class_list().toggle_with_force("hidden", !visible) {
                log::warn!("toggle #{}: {e:?}", region.element_id());
            }
        }
    }

    fn set_text(&self, region: Region, text: &str) {
        if let Some(element) = self.element(region) {
            element.set_text_content(Some(text));
        }
    }

    fn set_html(&self, region: Region, html: &str) {
        if let Some(element) = self.element(region) {
            element.set_inner_html(html);
        }
    }

    fn inject_login_widget(&self, widget: &WidgetConfig) {
        let Some(container) = self.element(Region::LoginWidgetContainer) else {
            return;
        };
        if matches!(container.query_selector("script[data-telegram-login]"), Ok(Some(_))) {
            return;
        }

        match self.build_widget_script(widget) {
            Ok(script) => {
                if let Err(e) = container.append_child(&script) {
                    log::error!("Failed to insert login widget: {e:?}");
                }
            }
            Err(e) => log::error!("Failed to build login widget: {e}"),
        }
    }

    fn bind_logout(&self, on_logout: Box<dyn Fn()>) {
        let Some(button) = self.element(Region::LogoutButton) else {
            return;
        };
        let handler = Closure::wrap(on_logout);
        if let Err(e) = button.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref()) {
            log::error!("Failed to bind logout: {e:?}");
            return;
        }
        handler.forget();
    }
}
