//! Browser entry points.
//!
//! `start` runs when the wasm module is instantiated: it installs the console
//! logger, reads the optional `window.AuroraBackgroundConfig` object, and runs
//! the startup sequence once the DOM is ready. The remaining exports mirror
//! the session's public operations for page scripts and debugging.

mod host;

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::prelude::*;

pub use host::{BrowserPlatform, DocumentMarkup, GlooTimer, LocalStore, ToastNotifier};

use crate::config::BackgroundConfig;
use crate::controller::Controller;
use crate::mode::PerformanceLevel;
use crate::session::BackgroundSession;

const CONFIG_GLOBAL: &str = "AuroraBackgroundConfig";

thread_local! {
    static SESSION: RefCell<Option<BackgroundSession>> = const { RefCell::new(None) };
}

fn session() -> Option<BackgroundSession> {
    SESSION.with(|slot| slot.borrow().clone())
}

fn read_config() -> BackgroundConfig {
    let value = match Reflect::get(&js_sys::global(), &JsValue::from_str(CONFIG_GLOBAL)) {
        Ok(value) if !value.is_undefined() && !value.is_null() => value,
        Ok(_) => return BackgroundConfig::default(),
        Err(err) => {
            log::warn!("failed to read {CONFIG_GLOBAL}: {err:?}, using defaults");
            return BackgroundConfig::default();
        }
    };
    let raw = match js_sys::JSON::stringify(&value) {
        Ok(raw) => String::from(raw),
        Err(err) => {
            log::warn!("{CONFIG_GLOBAL} is not serializable: {err:?}, using defaults");
            return BackgroundConfig::default();
        }
    };
    match BackgroundConfig::from_json(&raw) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("{err}, using defaults");
            BackgroundConfig::default()
        }
    }
}

/// Build a session wired to the real document.
pub fn browser_session(config: BackgroundConfig) -> BackgroundSession {
    let notifier = ToastNotifier::new(config.toast_path.clone());
    let controller = Controller::new(
        config,
        Box::new(LocalStore),
        Box::new(DocumentMarkup::new()),
        Box::new(BrowserPlatform),
    )
    .with_notifier(Box::new(notifier));
    BackgroundSession::new(controller, Rc::new(GlooTimer))
}

fn run_startup() {
    let session = browser_session(read_config());
    session.start();
    SESSION.with(|slot| *slot.borrow_mut() = Some(session));
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        log::debug!("console logger already installed: {err}");
    }

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::warn!("no document available, background mode controller not started");
        return;
    };
    if document.ready_state() != "loading" {
        run_startup();
        return;
    }

    let on_ready = Closure::once(run_startup);
    if let Err(err) = document.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref()) {
        log::warn!("failed to wait for DOMContentLoaded: {err:?}");
        run_startup();
        return;
    }
    on_ready.forget();
}

/// Re-run the decision from current signals. Returns the applied level class.
#[wasm_bindgen(js_name = init)]
pub fn init() -> Option<String> {
    session().map(|session| session.initialize().as_class().to_owned())
}

/// Apply a level class (`performance-high` / `performance-low`) directly.
#[wasm_bindgen(js_name = applyLevel)]
pub fn apply_level(level: &str) -> bool {
    let Some(level) = PerformanceLevel::parse(level) else {
        log::warn!("unknown performance level {level:?}");
        return false;
    };
    let Some(session) = session() else {
        return false;
    };
    match session.apply_level(level) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("failed to apply {}: {err}", level.as_class());
            false
        }
    }
}

/// Flip the stored override. Returns the new mode, or nothing on failure.
#[wasm_bindgen(js_name = toggleBackground)]
pub fn toggle_background() -> Option<String> {
    session()
        .and_then(|session| session.toggle())
        .map(|mode| mode.as_str().to_owned())
}

/// Re-bind the toggle control, e.g. after the page swapped its markup.
#[wasm_bindgen(js_name = initBackgroundToggle)]
pub fn init_background_toggle() {
    if let Some(session) = session() {
        session.bind_control();
    }
}
