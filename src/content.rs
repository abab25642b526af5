//! Reading the breakpoint name out of computed generated content.
//!
//! Style rules publish the active breakpoint as the `content` of an element's
//! `:after` pseudo-element, e.g. `body:after { content: "tablet"; }`. Hosts
//! report the computed value, which browsers wrap in literal quotes.

use std::borrow::Cow;

/// The pseudo-element whose generated content carries the breakpoint name.
pub const PSEUDO_ELEMENT: &str = ":after";

/// The computed property read from [`PSEUDO_ELEMENT`].
pub const CONTENT_PROPERTY: &str = "content";

/// Computes styles for a host's elements.
pub trait StyleSource {
    type Element: Clone;

    /// The element inspected when a breakpoint names none, usually the
    /// document body. `None` while the host has no such element.
    fn root_element(&self) -> Option<Self::Element>;

    /// The computed `content` of `element`'s `:after` pseudo-element, as the
    /// host reports it (possibly quote-wrapped). `None` if it has none.
    fn after_content(&self, element: &Self::Element) -> Option<String>;
}

impl<S: StyleSource + ?Sized> StyleSource for &S {
    type Element = S::Element;

    fn root_element(&self) -> Option<Self::Element> {
        (**self).root_element()
    }

    fn after_content(&self, element: &Self::Element) -> Option<String> {
        (**self).after_content(element)
    }
}

/// Strip the double quotes a host wraps string content in.
///
/// Absent content becomes the empty string, so it compares unequal to any
/// non-empty name.
pub fn normalize_content(content: Option<&str>) -> Cow<'_, str> {
    match content {
        Some(content) if content.contains('"') => Cow::Owned(content.replace('"', "")),
        Some(content) => Cow::Borrowed(content),
        None => Cow::Borrowed(""),
    }
}

/// Whether the computed `content` names `name`.
pub fn content_matches(content: Option<&str>, name: &str) -> bool {
    normalize_content(content) == name
}

/// Resolve `element` (or the root) and compare its generated content.
pub(crate) fn evaluate<S: StyleSource>(
    source: &S,
    element: Option<&S::Element>,
    name: &str,
) -> bool {
    let content = match element {
        Some(element) => source.after_content(element),
        None => source
            .root_element()
            .and_then(|root| source.after_content(&root)),
    };
    content_matches(content.as_deref(), name)
}
