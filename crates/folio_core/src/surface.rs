//! Presentation surfaces
//!
//! Components compute their visual state as plain values and then write it
//! to a [`StyleTarget`]: a DOM element in the browser host, or a recorder in
//! headless runs. A [`Surface`] wraps an optional target; writes to a
//! missing target are silently dropped.

/// A presentation element that accepts inline styles, classes and text
pub trait StyleTarget {
    /// Set an inline style property (`height`, `filter`, `transform`, ...)
    fn set_style(&mut self, property: &str, value: &str);

    /// Remove an inline style property, restoring the stylesheet value
    fn clear_style(&mut self, property: &str);

    /// Add or remove a class
    fn set_class(&mut self, class: &str, enabled: bool);

    /// Replace the element's text content
    fn set_text(&mut self, text: &str);

    /// Set an element attribute (`src`, `alt`, `aria-hidden`, ...).
    ///
    /// Targets without attributes ignore it.
    fn set_attribute(&mut self, _name: &str, _value: &str) {}
}

/// An optional [`StyleTarget`]
#[derive(Default)]
pub struct Surface {
    target: Option<Box<dyn StyleTarget>>,
}

impl Surface {
    /// Wrap a present target
    pub fn new(target: impl StyleTarget + 'static) -> Self {
        Self {
            target: Some(Box::new(target)),
        }
    }

    /// A surface whose element does not exist on this page
    pub fn missing() -> Self {
        Self { target: None }
    }

    pub fn is_present(&self) -> bool {
        self.target.is_some()
    }

    pub fn set_style(&mut self, property: &str, value: &str) {
        if let Some(target) = self.target.as_mut() {
            target.set_style(property, value);
        }
    }

    pub fn clear_style(&mut self, property: &str) {
        if let Some(target) = self.target.as_mut() {
            target.clear_style(property);
        }
    }

    pub fn set_class(&mut self, class: &str, enabled: bool) {
        if let Some(target) = self.target.as_mut() {
            target.set_class(class, enabled);
        }
    }

    pub fn set_text(&mut self, text: &str) {
        if let Some(target) = self.target.as_mut() {
            target.set_text(text);
        }
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        if let Some(target) = self.target.as_mut() {
            target.set_attribute(name, value);
        }
    }
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("present", &self.is_present())
            .finish()
    }
}

impl<T: StyleTarget + 'static> From<Option<T>> for Surface {
    fn from(target: Option<T>) -> Self {
        match target {
            Some(target) => Self::new(target),
            None => Self::missing(),
        }
    }
}
