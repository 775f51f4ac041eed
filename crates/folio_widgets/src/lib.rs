//! Folio widgets
//!
//! Discrete-state page widgets:
//!
//! - [`nav::NavVisibilityController`]: shows the top navigation bar once the
//!   hero is partly collapsed, with edge-triggered class toggling
//! - [`pager::Pager`]: page navigation with a windowed set of page-number
//!   controls and validated jump-to-page input
//! - [`modal::ModalViewer`]: image modal opened from the contact triggers

pub mod modal;
pub mod nav;
pub mod pager;

pub use modal::{ModalClick, ModalConfig, ModalImage, ModalSurfaces, ModalViewer};
pub use nav::{NavConfig, NavSurfaces, NavVisibility, NavVisibilityController};
pub use pager::{JumpError, PageRange, PageSlot, PageWindow, Pager, PagerView};
