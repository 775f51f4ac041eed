//! Image viewer modal
//!
//! Contact triggers open a modal showing a configured image (the QQ or
//! WeChat QR card) with a caption. The modal is a two-state machine;
//! `open` while already open swaps the image, `close` while closed does
//! nothing. While open, page scrolling is suspended on the body.

use std::collections::BTreeMap;

use folio_core::fsm::{EventId, StateId, StateMachine};
use folio_core::Surface;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Modal states
pub mod states {
    use super::StateId;

    pub const CLOSED: StateId = 0;
    pub const OPEN: StateId = 1;
}

/// Modal events
pub mod events {
    use super::EventId;

    pub const OPEN: EventId = 1;
    pub const CLOSE: EventId = 2;
}

/// One entry of the image table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalImage {
    pub image: String,
    pub alt: String,
    pub caption: String,
}

impl ModalImage {
    fn new(image: &str, alt: &str, caption: &str) -> Self {
        Self {
            image: image.to_string(),
            alt: alt.to_string(),
            caption: caption.to_string(),
        }
    }
}

/// Images the modal can show, keyed by trigger type
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalConfig {
    pub images: BTreeMap<String, ModalImage>,
}

impl Default for ModalConfig {
    fn default() -> Self {
        let images = [
            (
                "qq",
                ModalImage::new("/assets/images/qq_card.webp", "QQ二维码", "QQ 二维码"),
            ),
            (
                "wechat",
                ModalImage::new("/assets/images/wx_card.webp", "微信二维码", "微信二维码"),
            ),
        ]
        .into_iter()
        .map(|(kind, image)| (kind.to_string(), image))
        .collect();
        Self { images }
    }
}

/// Where a click inside the modal landed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalClick {
    /// The dimmed area around the content
    Backdrop,
    Content,
    CloseButton,
}

/// Surfaces driven by the viewer
#[derive(Debug, Default)]
pub struct ModalSurfaces {
    pub modal: Surface,
    pub image: Surface,
    pub caption: Surface,
    /// Page body; its overflow is locked while the modal is open
    pub body: Surface,
}

/// Opens and closes the image modal
pub struct ModalViewer {
    config: ModalConfig,
    fsm: StateMachine,
    surfaces: ModalSurfaces,
    current: Option<String>,
}

impl ModalViewer {
    pub fn new(config: ModalConfig, surfaces: ModalSurfaces) -> Self {
        let fsm = StateMachine::builder(states::CLOSED)
            .on(states::CLOSED, events::OPEN, states::OPEN)
            .on(states::OPEN, events::OPEN, states::OPEN)
            .on(states::OPEN, events::CLOSE, states::CLOSED)
            .history_limit(0)
            .build();

        Self {
            config,
            fsm,
            surfaces,
            current: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.fsm.is_in(states::OPEN)
    }

    /// Trigger type of the image on screen
    pub fn current_kind(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Show the image configured for `kind`.
    ///
    /// Unknown types leave the modal untouched and return `false`.
    pub fn open(&mut self, kind: &str) -> bool {
        let Some(entry) = self.config.images.get(kind) else {
            warn!(kind, "unknown modal image type");
            return false;
        };

        self.surfaces.image.set_attribute("src", &entry.image);
        self.surfaces.image.set_attribute("alt", &entry.alt);
        self.surfaces.caption.set_text(&entry.caption);

        if !self.is_open() {
            self.surfaces.modal.set_style("display", "block");
            self.surfaces.modal.set_attribute("aria-hidden", "false");
            self.surfaces.body.set_style("overflow", "hidden");
        }
        self.fsm.send(events::OPEN);
        self.current = Some(kind.to_string());
        debug!(kind, "modal opened");
        true
    }

    /// Hide the modal. Returns `false` when it was already closed.
    pub fn close(&mut self) -> bool {
        if !self.fsm.can_send(events::CLOSE) {
            return false;
        }
        self.fsm.send(events::CLOSE);

        self.surfaces.modal.set_style("display", "none");
        self.surfaces.modal.set_attribute("aria-hidden", "true");
        self.surfaces.body.clear_style("overflow");
        self.current = None;
        debug!("modal closed");
        true
    }

    /// Keyboard input; Escape closes an open modal.
    ///
    /// Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: &str) -> bool {
        key == "Escape" && self.close()
    }

    /// Clicks on the backdrop or the close button close the modal
    pub fn handle_click(&mut self, target: ModalClick) -> bool {
        match target {
            ModalClick::Backdrop | ModalClick::CloseButton => self.close(),
            ModalClick::Content => false,
        }
    }
}

impl std::fmt::Debug for ModalViewer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalViewer")
            .field("open", &self.is_open())
            .field("current", &self.current)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::StyleTarget;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Log(Rc<RefCell<Vec<String>>>);

    impl Log {
        fn take(&self) -> Vec<String> {
            std::mem::take(&mut *self.0.borrow_mut())
        }
    }

    impl StyleTarget for Log {
        fn set_style(&mut self, property: &str, value: &str) {
            self.0.borrow_mut().push(format!("{property}={value}"));
        }

        fn clear_style(&mut self, property: &str) {
            self.0.borrow_mut().push(format!("{property}="));
        }

        fn set_class(&mut self, _class: &str, _enabled: bool) {}

        fn set_text(&mut self, text: &str) {
            self.0.borrow_mut().push(text.to_string());
        }

        fn set_attribute(&mut self, name: &str, value: &str) {
            self.0.borrow_mut().push(format!("@{name}={value}"));
        }
    }

    struct Fixture {
        viewer: ModalViewer,
        modal: Log,
        image: Log,
        caption: Log,
        body: Log,
    }

    fn fixture() -> Fixture {
        let (modal, image, caption, body) =
            (Log::default(), Log::default(), Log::default(), Log::default());
        let viewer = ModalViewer::new(
            ModalConfig::default(),
            ModalSurfaces {
                modal: Surface::new(modal.clone()),
                image: Surface::new(image.clone()),
                caption: Surface::new(caption.clone()),
                body: Surface::new(body.clone()),
            },
        );
        Fixture {
            viewer,
            modal,
            image,
            caption,
            body,
        }
    }

    #[test]
    fn test_open_shows_configured_image() {
        let mut f = fixture();

        assert!(f.viewer.open("wechat"));

        assert!(f.viewer.is_open());
        assert_eq!(f.viewer.current_kind(), Some("wechat"));
        assert_eq!(
            f.image.take(),
            vec!["@src=/assets/images/wx_card.webp", "@alt=微信二维码"]
        );
        assert_eq!(f.caption.take(), vec!["微信二维码"]);
        assert_eq!(f.modal.take(), vec!["display=block", "@aria-hidden=false"]);
        assert_eq!(f.body.take(), vec!["overflow=hidden"]);
    }

    #[test]
    fn test_open_while_open_swaps_image() {
        let mut f = fixture();
        f.viewer.open("qq");
        f.modal.take();
        f.body.take();

        assert!(f.viewer.open("wechat"));

        assert_eq!(f.viewer.current_kind(), Some("wechat"));
        assert!(f.modal.take().is_empty());
        assert!(f.body.take().is_empty());
    }

    #[test]
    fn test_unknown_type_is_ignored() {
        let mut f = fixture();

        assert!(!f.viewer.open("telegram"));

        assert!(!f.viewer.is_open());
        assert!(f.image.take().is_empty());
        assert!(f.modal.take().is_empty());
    }

    #[test]
    fn test_escape_while_closed_is_noop() {
        let mut f = fixture();

        assert!(!f.viewer.handle_key("Escape"));
        assert!(f.modal.take().is_empty());
        assert!(f.body.take().is_empty());
    }

    #[test]
    fn test_escape_closes_open_modal() {
        let mut f = fixture();
        f.viewer.open("qq");
        f.modal.take();

        assert!(!f.viewer.handle_key("Enter"));
        assert!(f.viewer.is_open());
        assert!(f.viewer.handle_key("Escape"));

        assert!(!f.viewer.is_open());
        assert_eq!(f.viewer.current_kind(), None);
        assert_eq!(f.modal.take(), vec!["display=none", "@aria-hidden=true"]);
        assert_eq!(f.body.take(), vec!["overflow=hidden", "overflow="]);
    }

    #[test]
    fn test_backdrop_closes_content_does_not() {
        let mut f = fixture();
        f.viewer.open("qq");

        assert!(!f.viewer.handle_click(ModalClick::Content));
        assert!(f.viewer.is_open());
        assert!(f.viewer.handle_click(ModalClick::Backdrop));
        assert!(!f.viewer.is_open());
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut f = fixture();
        f.viewer.open("qq");

        assert!(f.viewer.handle_click(ModalClick::CloseButton));
        f.modal.take();
        assert!(!f.viewer.close());
        assert!(f.modal.take().is_empty());
    }
}
