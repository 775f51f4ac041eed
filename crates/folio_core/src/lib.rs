//! Folio Core Runtime
//!
//! Foundational primitives shared by the folio page components:
//!
//! - **Frame Scheduling**: Coalesces scroll/resize bursts into one update per frame
//! - **State Machines**: Flat state machines for discrete widget states
//! - **Events**: Host events (scroll, resize, pointer) delivered to page components
//! - **Surfaces**: The presentation targets components write styles and classes to
//!
//! # Example
//!
//! ```rust
//! use folio_core::frame::FrameScheduler;
//!
//! let mut scheduler: FrameScheduler<u32> = FrameScheduler::new();
//! let _id = scheduler.register(|updates, _| *updates += 1);
//!
//! // A burst of scroll events asks the host for a single frame
//! assert!(scheduler.notify());
//! assert!(!scheduler.notify());
//!
//! // The host's animation frame runs the callbacks once
//! let mut updates = 0;
//! assert!(scheduler.run_frame(&mut updates, 16.0));
//! assert!(!scheduler.run_frame(&mut updates, 32.0));
//! assert_eq!(updates, 1);
//! ```

pub mod events;
pub mod frame;
pub mod fsm;
pub mod surface;

pub use events::{Event, Viewport};
pub use frame::{FrameCallbackId, FrameInfo, FrameScheduler};
pub use fsm::{EventId, StateId, StateMachine, StateMachineBuilder, Transition};
pub use surface::{StyleTarget, Surface};
