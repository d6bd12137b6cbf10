//! QuickDeck core: launcher data model, persistence, gesture recognition,
//! and action dispatch. No UI toolkit or OS calls live here; the app crate
//! supplies those behind [`action::SystemBridge`].

pub mod action;
pub mod drag;
pub mod model;
pub mod store;

pub use action::{dispatch, ActionError, Dispatched, SystemBridge};
pub use drag::{DragTracker, Gesture, SlotMap, SlotRect, DRAG_THRESHOLD};
pub use model::{ActionKind, ButtonDescriptor, Tab, Workspace, SLOT_COUNT};
pub use store::{ConfigStore, StoreError};
