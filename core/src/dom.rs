//! Headless element handles.
//!
//! Widgets receive the elements they drive at construction instead of looking
//! them up by selector. A handle is cheap to clone and every clone refers to
//! the same element, so a page and the widgets wired to it observe each
//! other's changes.

use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

pub const ESCAPE_KEY: u32 = 27;

#[derive(Debug, Default)]
struct ElementState {
    visible: bool,
    text: String,
    html: String,
    classes: BTreeSet<String>,
    attrs: BTreeMap<String, String>,
    removed: bool,
}

#[derive(Clone)]
pub struct Element {
    name: Arc<str>,
    state: Arc<Mutex<ElementState>>,
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.state.lock();
        f.debug_struct("Element").field("name", &self.name).field("visible", &s.visible).field("removed", &s.removed).finish()
    }
}

impl Element {
    /// A new element, initially hidden.
    pub fn new(name: &str) -> Self {
        Self { name: Arc::from(name), state: Arc::new(Mutex::new(ElementState::default())) }
    }

    pub fn visible(name: &str) -> Self {
        let el = Self::new(name);
        el.show();
        el
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn show(&self) { self.state.lock().visible = true; }
    pub fn hide(&self) { self.state.lock().visible = false; }
    pub fn is_visible(&self) -> bool {
        let s = self.state.lock();
        s.visible && !s.removed
    }

    pub fn text(&self) -> String { self.state.lock().text.clone() }
    pub fn set_text(&self, text: impl Into<String>) { self.state.lock().text = text.into(); }

    pub fn html(&self) -> String { self.state.lock().html.clone() }
    pub fn set_html(&self, html: impl Into<String>) { self.state.lock().html = html.into(); }
    pub fn append_html(&self, html: &str) { self.state.lock().html.push_str(html); }
    pub fn empty(&self) {
        let mut s = self.state.lock();
        s.html.clear();
        s.text.clear();
    }

    pub fn add_class(&self, class: &str) { self.state.lock().classes.insert(class.to_string()); }
    pub fn has_class(&self, class: &str) -> bool { self.state.lock().classes.contains(class) }
    pub fn toggle_class(&self, class: &str) {
        let mut s = self.state.lock();
        if !s.classes.remove(class) {
            s.classes.insert(class.to_string());
        }
    }

    pub fn attr(&self, name: &str) -> Option<String> { self.state.lock().attrs.get(name).cloned() }
    pub fn set_attr(&self, name: &str, value: impl Into<String>) {
        self.state.lock().attrs.insert(name.to_string(), value.into());
    }
    pub fn with_attr(self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Detach the element from the page. Removed elements never report visible.
    pub fn remove(&self) { self.state.lock().removed = true; }
    pub fn is_removed(&self) -> bool { self.state.lock().removed }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overflow {
    Auto,
    Hidden,
}

/// The page body. Only its scroll behaviour is modelled.
#[derive(Clone, Debug)]
pub struct Body {
    overflow: Arc<Mutex<Overflow>>,
}

impl Default for Body {
    fn default() -> Self { Self { overflow: Arc::new(Mutex::new(Overflow::Auto)) } }
}

impl Body {
    pub fn new() -> Self { Self::default() }
    pub fn lock_scroll(&self) { *self.overflow.lock() = Overflow::Hidden; }
    pub fn unlock_scroll(&self) { *self.overflow.lock() = Overflow::Auto; }
    pub fn overflow(&self) -> Overflow { *self.overflow.lock() }
    pub fn is_scroll_locked(&self) -> bool { self.overflow() == Overflow::Hidden }
}
