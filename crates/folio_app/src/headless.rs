//! Headless surfaces
//!
//! In-memory stand-ins for page elements, for driving the home page without
//! a browser: tests, the `folio` command and server-side previews.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;
use std::rc::Rc;

use folio_animation::{HeroTargets, TiltSurfaces};
use folio_content::QuoteTargets;
use folio_core::{StyleTarget, Surface};
use folio_widgets::{JumpError, ModalSurfaces, NavSurfaces, PageSlot, PagerView};

use crate::home::HomeSurfaces;

/// Recorded state of one element
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementState {
    pub styles: BTreeMap<String, String>,
    pub classes: BTreeSet<String>,
    pub text: String,
    pub attributes: BTreeMap<String, String>,
    /// Number of writes of any kind
    pub writes: u64,
}

/// A shared, recording element
///
/// Clones share state: hand one clone to a [`Surface`] and inspect the
/// other.
#[derive(Clone, Debug, Default)]
pub struct Element {
    state: Rc<RefCell<ElementState>>,
}

impl Element {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface writing to this element
    pub fn surface(&self) -> Surface {
        Surface::new(self.clone())
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.state.borrow().styles.get(property).cloned()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.state.borrow().classes.contains(class)
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.state.borrow().attributes.get(name).cloned()
    }

    pub fn text(&self) -> String {
        self.state.borrow().text.clone()
    }

    pub fn writes(&self) -> u64 {
        self.state.borrow().writes
    }

    pub fn snapshot(&self) -> ElementState {
        self.state.borrow().clone()
    }
}

impl StyleTarget for Element {
    fn set_style(&mut self, property: &str, value: &str) {
        let mut state = self.state.borrow_mut();
        state.styles.insert(property.to_string(), value.to_string());
        state.writes += 1;
    }

    fn clear_style(&mut self, property: &str) {
        let mut state = self.state.borrow_mut();
        state.styles.remove(property);
        state.writes += 1;
    }

    fn set_class(&mut self, class: &str, enabled: bool) {
        let mut state = self.state.borrow_mut();
        if enabled {
            state.classes.insert(class.to_string());
        } else {
            state.classes.remove(class);
        }
        state.writes += 1;
    }

    fn set_text(&mut self, text: &str) {
        let mut state = self.state.borrow_mut();
        state.text = text.to_string();
        state.writes += 1;
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        let mut state = self.state.borrow_mut();
        state.attributes.insert(name.to_string(), value.to_string());
        state.writes += 1;
    }
}

/// Elements of one contact card
#[derive(Clone, Debug, Default)]
pub struct ContactElements {
    pub card_box: Element,
    pub icon: Element,
    pub icon_shadow: Element,
}

/// Every element of the home page
#[derive(Clone, Debug, Default)]
pub struct HeadlessPage {
    pub hero_container: Element,
    pub hero_background: Element,
    pub hero_icon: Element,
    pub hero_title: Element,
    pub nav: Element,
    pub quote_container: Element,
    pub quote_content: Element,
    pub contacts: Vec<ContactElements>,
    pub modal: Element,
    pub modal_image: Element,
    pub modal_caption: Element,
    pub body: Element,
}

impl HeadlessPage {
    pub fn new(contact_cards: usize) -> Self {
        Self {
            contacts: std::iter::repeat_with(ContactElements::default)
                .take(contact_cards)
                .collect(),
            ..Self::default()
        }
    }

    /// Surfaces backed by these elements
    pub fn surfaces(&self) -> HomeSurfaces {
        HomeSurfaces {
            hero: HeroTargets {
                container: self.hero_container.surface(),
                background: self.hero_background.surface(),
                icon: self.hero_icon.surface(),
                title: self.hero_title.surface(),
            },
            nav: NavSurfaces {
                bar: self.nav.surface(),
            },
            quote: QuoteTargets {
                container: self.quote_container.surface(),
                content: self.quote_content.surface(),
            },
            background: self.hero_background.surface(),
            contacts: self
                .contacts
                .iter()
                .map(|card| TiltSurfaces {
                    card_box: card.card_box.surface(),
                    icon: card.icon.surface(),
                    icon_shadow: card.icon_shadow.surface(),
                })
                .collect(),
            modal: ModalSurfaces {
                modal: self.modal.surface(),
                image: self.modal_image.surface(),
                caption: self.modal_caption.surface(),
                body: self.body.surface(),
            },
        }
    }
}

/// Render a pager window as text, the current page in brackets
pub fn window_text(window: &[PageSlot]) -> String {
    let mut text = String::new();
    for slot in window {
        if !text.is_empty() {
            text.push(' ');
        }
        match slot {
            PageSlot::Page {
                number,
                current: true,
            } => {
                let _ = write!(text, "[{number}]");
            }
            PageSlot::Page { number, .. } => {
                let _ = write!(text, "{number}");
            }
            PageSlot::Ellipsis => text.push('…'),
        }
    }
    text
}

/// Feedback played on the jump input
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JumpCue {
    Error(JumpError),
    Success(usize),
}

/// Pager view that records what it was asked to show
#[derive(Debug, Default)]
pub struct RecordingPagerView {
    pub renders: Vec<String>,
    pub cues: Vec<JumpCue>,
}

impl RecordingPagerView {
    pub fn new() -> Self {
        Self::default()
    }

    /// The window currently on screen
    pub fn current(&self) -> Option<&str> {
        self.renders.last().map(String::as_str)
    }
}

impl PagerView for RecordingPagerView {
    fn render(&mut self, window: &[PageSlot]) {
        self.renders.push(window_text(window));
    }

    fn jump_error(&mut self, error: &JumpError) {
        self.cues.push(JumpCue::Error(error.clone()));
    }

    fn jump_success(&mut self, page: usize) {
        self.cues.push(JumpCue::Success(page));
    }
}
