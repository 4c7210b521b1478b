//! web-sys implementations of the storage, markup, platform, notifier, and
//! timer seams.

use std::cell::RefCell;
use std::collections::HashMap;

use gloo_timers::callback::Timeout;
use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{Element, HtmlElement, Storage, Window};

use crate::consts::REDUCED_MOTION_QUERY;
use crate::device::DeviceSignals;
use crate::markup::{ControlHandler, Markup, MarkupError};
use crate::notify::Notifier;
use crate::platform::{Platform, PreferenceHandler};
use crate::retry::{Timer, TimerTask};
use crate::store::{Store, StoreError};

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn dom_error(err: JsValue) -> MarkupError {
    MarkupError::Dom(describe(&err))
}

// =============================================================
// Storage
// =============================================================

/// `window.localStorage`, looked up on every access.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Result<Storage, StoreError> {
        let window = web_sys::window().ok_or(StoreError::Unavailable)?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(storage),
            Ok(None) => Err(StoreError::Unavailable),
            Err(err) => {
                log::debug!("localStorage access denied: {}", describe(&err));
                Err(StoreError::Unavailable)
            }
        }
    }
}

impl Store for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(key)
            .map_err(|err| StoreError::Read { key: key.to_owned(), reason: describe(&err) })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|err| StoreError::Write { key: key.to_owned(), reason: describe(&err) })
    }
}

// =============================================================
// Markup
// =============================================================

/// A click listener together with the element it was attached to.
struct AttachedListener {
    element: Element,
    closure: Closure<dyn FnMut()>,
}

/// `document.body` as the page root, controls looked up by id.
#[derive(Default)]
pub struct DocumentMarkup {
    /// Click listeners currently attached, keyed by control id.
    listeners: RefCell<HashMap<String, AttachedListener>>,
}

impl DocumentMarkup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn document() -> Result<web_sys::Document, MarkupError> {
        web_sys::window()
            .and_then(|w| w.document())
            .ok_or(MarkupError::RootUnavailable)
    }

    fn root() -> Result<HtmlElement, MarkupError> {
        Self::document()?.body().ok_or(MarkupError::RootUnavailable)
    }
}

impl Markup for DocumentMarkup {
    fn remove_root_classes(&self, classes: &[&str]) -> Result<(), MarkupError> {
        let class_list = Self::root()?.class_list();
        for class in classes {
            class_list.remove_1(class).map_err(dom_error)?;
        }
        Ok(())
    }

    fn add_root_class(&self, class: &str) -> Result<(), MarkupError> {
        Self::root()?.class_list().add_1(class).map_err(dom_error)
    }

    fn has_root_class(&self, class: &str) -> Result<bool, MarkupError> {
        Ok(Self::root()?.class_list().contains(class))
    }

    fn set_root_attribute(&self, name: &str, value: &str) -> Result<(), MarkupError> {
        Self::root()?.set_attribute(name, value).map_err(dom_error)
    }

    fn attach_control(&self, id: &str, handler: ControlHandler) -> Result<bool, MarkupError> {
        let Some(element) = Self::document()?.get_element_by_id(id) else {
            return Ok(false);
        };

        let mut listeners = self.listeners.borrow_mut();
        // Detach from the element the old closure was registered on, which is
        // not necessarily the one currently holding the id.
        if let Some(previous) = listeners.remove(id) {
            previous
                .element
                .remove_event_listener_with_callback("click", previous.closure.as_ref().unchecked_ref())
                .map_err(dom_error)?;
        }

        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        element
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .map_err(dom_error)?;
        listeners.insert(id.to_owned(), AttachedListener { element, closure });
        Ok(true)
    }

    fn set_control_attribute(&self, id: &str, name: &str, value: &str) -> Result<(), MarkupError> {
        Self::document()?
            .get_element_by_id(id)
            .ok_or_else(|| MarkupError::ControlMissing(id.to_owned()))?
            .set_attribute(name, value)
            .map_err(dom_error)
    }
}

// =============================================================
// Platform
// =============================================================

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserPlatform;

impl BrowserPlatform {
    fn reduced_motion_query(window: &Window) -> Option<web_sys::MediaQueryList> {
        match window.match_media(REDUCED_MOTION_QUERY) {
            Ok(query) => query,
            Err(err) => {
                log::debug!("{REDUCED_MOTION_QUERY} unsupported: {}", describe(&err));
                None
            }
        }
    }
}

impl Platform for BrowserPlatform {
    fn device_signals(&self) -> DeviceSignals {
        let Some(window) = web_sys::window() else {
            return DeviceSignals::default();
        };
        let user_agent = match window.navigator().user_agent() {
            Ok(ua) => Some(ua),
            Err(err) => {
                log::debug!("user agent unavailable: {}", describe(&err));
                None
            }
        };
        let screen_width = match window.screen().and_then(|screen| screen.width()) {
            Ok(width) => match u32::try_from(width) {
                Ok(width) => Some(width),
                Err(err) => {
                    log::debug!("ignoring screen width {width}: {err}");
                    None
                }
            },
            Err(err) => {
                log::debug!("screen width unavailable: {}", describe(&err));
                None
            }
        };
        let touch = matches!(Reflect::has(&window, &JsValue::from_str("ontouchstart")), Ok(true));
        DeviceSignals { user_agent, screen_width, touch }
    }

    fn prefers_reduced_motion(&self) -> bool {
        web_sys::window()
            .and_then(|window| Self::reduced_motion_query(&window))
            .is_some_and(|query| query.matches())
    }

    fn watch_reduced_motion(&self, handler: PreferenceHandler) -> bool {
        let Some(query) = web_sys::window().and_then(|window| Self::reduced_motion_query(&window)) else {
            return false;
        };
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        if let Err(err) = query.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref()) {
            log::warn!("failed to watch {REDUCED_MOTION_QUERY}: {}", describe(&err));
            return false;
        }
        // Page-lifetime subscription.
        closure.forget();
        true
    }
}

// =============================================================
// Notifier
// =============================================================

/// Calls a global toast function such as `window.anzhiyu.snackbarShow`.
#[derive(Clone, Debug)]
pub struct ToastNotifier {
    path: Vec<String>,
}

impl ToastNotifier {
    #[must_use]
    pub fn new(path: Vec<String>) -> Self {
        Self { path }
    }

    /// Resolve the function and the object it hangs off.
    fn resolve(&self) -> Option<(JsValue, Function)> {
        let mut owner = JsValue::UNDEFINED;
        let mut target: JsValue = js_sys::global().into();
        for segment in &self.path {
            let object = target.dyn_ref::<js_sys::Object>()?;
            let next = match Reflect::get(object, &JsValue::from_str(segment)) {
                Ok(value) if !value.is_undefined() && !value.is_null() => value,
                Ok(_) => return None,
                Err(err) => {
                    log::debug!("toast lookup of {segment:?} failed: {}", describe(&err));
                    return None;
                }
            };
            owner = std::mem::replace(&mut target, next);
        }
        match target.dyn_into::<Function>() {
            Ok(function) => Some((owner, function)),
            Err(value) => {
                log::debug!("toast target {:?} is not a function: {value:?}", self.path.join("."));
                None
            }
        }
    }
}

impl Notifier for ToastNotifier {
    fn show(&self, message: &str) -> bool {
        let Some((owner, function)) = self.resolve() else {
            return false;
        };
        match function.call1(&owner, &JsValue::from_str(message)) {
            Ok(_) => true,
            Err(err) => {
                log::warn!("toast function failed: {}", describe(&err));
                false
            }
        }
    }
}

// =============================================================
// Timer
// =============================================================

#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTimer;

impl Timer for GlooTimer {
    fn schedule(&self, delay_ms: u32, task: TimerTask) {
        Timeout::new(delay_ms, task).forget();
    }
}
