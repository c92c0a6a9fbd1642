//! Drag to reorder lists and stacks for egui.
//!
//! Hand a [`ReorderableView`] a [`Binding`] to your items and a closure that draws one of them.
//! While the user drags an item, every time the pointer crosses into another item the collection
//! is rewritten in place: dragging towards the end drops the item just past the hovered one,
//! dragging towards the start puts it in the hovered item's slot.

pub use axis::LayoutAxis;
pub use binding::{Binding, BindingError};
pub use dnd::{DragPayload, DropEvent, DropTracker, FrameRegistry, PayloadType, PointerSample};
pub use item::{position_of, ReorderableItem};
pub use relocate::{DragRelocateDelegate, DropOperation, DropProposal, RelocateError, Relocation};
pub use session::DragSession;
pub use view::{DragPhase, ReorderResponse, ReorderableView};

mod axis;
mod binding;
pub mod dnd;
mod item;
mod relocate;
mod session;
mod view;

pub mod utils;
