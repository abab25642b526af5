//! In-memory style host for tests and non-browser embedders.
//!
//! # Example
//!
//! ```rust
//! use floem_breakpoints::{Breakpoint, BreakpointTracker, headless::HeadlessStyle};
//!
//! let style = HeadlessStyle::new();
//! style.set_breakpoint("mobile");
//!
//! let tracker = BreakpointTracker::new(style.clone());
//! let mobile = tracker.on(Breakpoint::new("mobile"));
//! assert!(mobile.is_matched());
//! ```

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::content::StyleSource;

/// Handle to an element of a [`HeadlessStyle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(u64);

#[derive(Debug, Default)]
struct HeadlessState {
    next_id: u64,
    root: Option<ElementId>,
    contents: HashMap<ElementId, String>,
}

/// A style host whose computed `:after` content is set by hand.
///
/// Clones share state, so a test can keep one clone and change content after
/// handing another to a tracker.
#[derive(Debug, Clone)]
pub struct HeadlessStyle {
    state: Rc<RefCell<HeadlessState>>,
}

impl Default for HeadlessStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessStyle {
    /// A host with a root element and no content anywhere.
    pub fn new() -> Self {
        let style = Self {
            state: Rc::new(RefCell::new(HeadlessState::default())),
        };
        let root = style.create_element();
        style.state.borrow_mut().root = Some(root);
        style
    }

    /// A host without a root element, like a page before its body exists.
    pub fn without_root() -> Self {
        Self {
            state: Rc::new(RefCell::new(HeadlessState::default())),
        }
    }

    pub fn create_element(&self) -> ElementId {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        ElementId(state.next_id)
    }

    pub fn root(&self) -> Option<ElementId> {
        self.state.borrow().root
    }

    /// Set the raw computed content of `element`, quotes and all.
    pub fn set_content(&self, element: ElementId, content: impl Into<String>) {
        self.state
            .borrow_mut()
            .contents
            .insert(element, content.into());
    }

    pub fn clear_content(&self, element: ElementId) {
        self.state.borrow_mut().contents.remove(&element);
    }

    /// Publish `name` on the root element the way a browser reports string
    /// content: wrapped in double quotes.
    pub fn set_breakpoint(&self, name: &str) {
        if let Some(root) = self.root() {
            self.set_content(root, format!("\"{name}\""));
        }
    }

    /// Publish `name` on `element`, quote-wrapped.
    pub fn set_element_breakpoint(&self, element: ElementId, name: &str) {
        self.set_content(element, format!("\"{name}\""));
    }
}

impl StyleSource for HeadlessStyle {
    type Element = ElementId;

    fn root_element(&self) -> Option<ElementId> {
        self.root()
    }

    fn after_content(&self, element: &ElementId) -> Option<String> {
        self.state.borrow().contents.get(element).cloned()
    }
}
