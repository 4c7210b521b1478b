//! Page markup seam: the root element's classes/attributes and the toggle control.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser implementation targets `document.body` and a control element
//! looked up by id. [`MemoryMarkup`] is a small in-memory page used by native
//! tests; it also lets tests "click" the control.

#[cfg(test)]
#[path = "markup_test.rs"]
mod markup_test;

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;

/// Click handler attached to the toggle control.
pub type ControlHandler = Rc<dyn Fn()>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkupError {
    #[error("page root element is unavailable")]
    RootUnavailable,
    #[error("control #{0} is not in the document")]
    ControlMissing(String),
    #[error("dom operation failed: {0}")]
    Dom(String),
}

pub trait Markup {
    /// Remove every listed class from the root. Absent classes are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`MarkupError`] when the root cannot be reached or mutated.
    fn remove_root_classes(&self, classes: &[&str]) -> Result<(), MarkupError>;

    /// # Errors
    ///
    /// Returns [`MarkupError`] when the root cannot be reached or mutated.
    fn add_root_class(&self, class: &str) -> Result<(), MarkupError>;

    /// # Errors
    ///
    /// Returns [`MarkupError::RootUnavailable`] when there is no root.
    fn has_root_class(&self, class: &str) -> Result<bool, MarkupError>;

    /// # Errors
    ///
    /// Returns [`MarkupError`] when the root cannot be reached or mutated.
    fn set_root_attribute(&self, name: &str, value: &str) -> Result<(), MarkupError>;

    /// Attach `handler` as the click handler of control `id`, replacing any
    /// handler attached by an earlier call. Returns `false` when no such
    /// control exists yet.
    ///
    /// # Errors
    ///
    /// Returns [`MarkupError::Dom`] when listener registration fails.
    fn attach_control(&self, id: &str, handler: ControlHandler) -> Result<bool, MarkupError>;

    /// # Errors
    ///
    /// Returns [`MarkupError::ControlMissing`] when control `id` is gone.
    fn set_control_attribute(&self, id: &str, name: &str, value: &str) -> Result<(), MarkupError>;
}

#[derive(Default)]
struct MemoryControl {
    attributes: BTreeMap<String, String>,
    handler: Option<ControlHandler>,
    attach_count: usize,
}

struct MemoryPage {
    root_available: bool,
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
    controls: HashMap<String, MemoryControl>,
    /// Controls swapped out by [`MemoryMarkup::replace_control`], still
    /// holding whatever handler was attached to them.
    detached: Vec<(String, MemoryControl)>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self {
            root_available: true,
            classes: BTreeSet::new(),
            attributes: BTreeMap::new(),
            controls: HashMap::new(),
            detached: Vec::new(),
        }
    }
}

/// In-memory page. Clones share the same page.
#[derive(Clone, Default)]
pub struct MemoryMarkup {
    page: Rc<RefCell<MemoryPage>>,
}

impl MemoryMarkup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a document whose root is missing or detached.
    pub fn set_root_available(&self, available: bool) {
        self.page.borrow_mut().root_available = available;
    }

    /// Add a control element, as if it were rendered late.
    pub fn insert_control(&self, id: &str) {
        self.page.borrow_mut().controls.entry(id.to_owned()).or_default();
    }

    /// Swap control `id` for a fresh element, as a re-render would. The old
    /// element keeps its handler until the next attach for `id` detaches it.
    pub fn replace_control(&self, id: &str) {
        let mut page = self.page.borrow_mut();
        if let Some(old) = page.controls.insert(id.to_owned(), MemoryControl::default()) {
            page.detached.push((id.to_owned(), old));
        }
    }

    /// Root classes in sorted order.
    #[must_use]
    pub fn classes(&self) -> Vec<String> {
        self.page.borrow().classes.iter().cloned().collect()
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.page.borrow().attributes.get(name).cloned()
    }

    #[must_use]
    pub fn control_attribute(&self, id: &str, name: &str) -> Option<String> {
        self.page
            .borrow()
            .controls
            .get(id)
            .and_then(|control| control.attributes.get(name).cloned())
    }

    /// How many times a handler was attached to control `id`.
    #[must_use]
    pub fn attach_count(&self, id: &str) -> usize {
        self.page.borrow().controls.get(id).map_or(0, |control| control.attach_count)
    }

    /// Fire a click on control `id`. Returns `false` when nothing is attached.
    pub fn click(&self, id: &str) -> bool {
        // Release the page borrow before running the handler; it mutates the page.
        let handler = self
            .page
            .borrow()
            .controls
            .get(id)
            .and_then(|control| control.handler.clone());
        match handler {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }

    /// Fire a click on every swapped-out element that had id `id`. Returns
    /// `false` when none of them still has a handler.
    pub fn click_detached(&self, id: &str) -> bool {
        let handlers: Vec<ControlHandler> = self
            .page
            .borrow()
            .detached
            .iter()
            .filter(|(old_id, _)| old_id == id)
            .filter_map(|(_, control)| control.handler.clone())
            .collect();
        for handler in &handlers {
            handler();
        }
        !handlers.is_empty()
    }

    fn with_root<T>(&self, f: impl FnOnce(&mut MemoryPage) -> T) -> Result<T, MarkupError> {
        let mut page = self.page.borrow_mut();
        if !page.root_available {
            return Err(MarkupError::RootUnavailable);
        }
        Ok(f(&mut *page))
    }
}

impl Markup for MemoryMarkup {
    fn remove_root_classes(&self, classes: &[&str]) -> Result<(), MarkupError> {
        self.with_root(|page| {
            for class in classes {
                page.classes.remove(*class);
            }
        })
    }

    fn add_root_class(&self, class: &str) -> Result<(), MarkupError> {
        self.with_root(|page| {
            page.classes.insert(class.to_owned());
        })
    }

    fn has_root_class(&self, class: &str) -> Result<bool, MarkupError> {
        self.with_root(|page| page.classes.contains(class))
    }

    fn set_root_attribute(&self, name: &str, value: &str) -> Result<(), MarkupError> {
        self.with_root(|page| {
            page.attributes.insert(name.to_owned(), value.to_owned());
        })
    }

    fn attach_control(&self, id: &str, handler: ControlHandler) -> Result<bool, MarkupError> {
        let mut page = self.page.borrow_mut();
        if !page.controls.contains_key(id) {
            return Ok(false);
        }
        for (_, old) in page.detached.iter_mut().filter(|(old_id, _)| old_id == id) {
            old.handler = None;
        }
        let Some(control) = page.controls.get_mut(id) else {
            return Ok(false);
        };
        control.handler = Some(handler);
        control.attach_count += 1;
        Ok(true)
    }

    fn set_control_attribute(&self, id: &str, name: &str, value: &str) -> Result<(), MarkupError> {
        let mut page = self.page.borrow_mut();
        let control = page
            .controls
            .get_mut(id)
            .ok_or_else(|| MarkupError::ControlMissing(id.to_owned()))?;
        control.attributes.insert(name.to_owned(), value.to_owned());
        Ok(())
    }
}
