use tracing::debug;

use crate::binding::{Binding, BindingError};
use crate::item::{position_of, ReorderableItem};
use crate::session::DragSession;
use crate::utils::{relocation_offset, shift_vec};

/// What a drop target proposes to do with a payload hovering over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOperation {
    Move,
    Copy,
    Forbidden,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropProposal {
    pub operation: DropOperation,
}

impl DropProposal {
    pub fn new(operation: DropOperation) -> Self {
        Self { operation }
    }
}

/// A single completed move, in terms of indices of the collection before and after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relocation {
    pub from: usize,
    pub to: usize,
}

/// Reasons a hover did not move anything. None of these are faults: the host can deliver events
/// late or out of step with the collection, and the answer is always to leave things as they are.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelocateError {
    #[error("no drag in progress")]
    NoActiveDrag,
    #[error("dragged item {0} is no longer in the collection")]
    DraggedItemMissing(String),
    #[error("target item {0} is no longer in the collection")]
    TargetMissing(String),
    #[error(transparent)]
    Binding(#[from] BindingError),
}

/// Drop delegate attached to one item of a reorderable collection.
///
/// The host calls the three entry points as a drag moves over the item: [`Self::drop_entered`]
/// when the pointer crosses into it, [`Self::drop_updated`] while it stays, and
/// [`Self::perform_drop`] when the pointer is released on it.
pub struct DragRelocateDelegate<'a, T: ReorderableItem> {
    target: &'a T::Id,
    data: &'a Binding<Vec<T>>,
    current: &'a mut DragSession<T::Id>,
}

impl<'a, T: ReorderableItem> DragRelocateDelegate<'a, T> {
    pub fn new(
        target: &'a T::Id,
        data: &'a Binding<Vec<T>>,
        current: &'a mut DragSession<T::Id>,
    ) -> Self {
        Self {
            target,
            data,
            current,
        }
    }

    /// Move the dragged item onto the target and report the move, if there was one. Anything that
    /// prevents the move is logged and swallowed.
    pub fn drop_entered(&mut self) -> Option<Relocation> {
        match self.relocate() {
            Ok(Some(relocation)) => {
                debug!(
                    target = %self.target,
                    from = relocation.from,
                    to = relocation.to,
                    "relocated dragged item"
                );
                Some(relocation)
            }
            Ok(None) => None,
            Err(err) => {
                debug!(target = %self.target, "hover ignored: {err}");
                None
            }
        }
    }

    /// Reordering is the only thing on offer, whatever the modifiers.
    pub fn drop_updated(&mut self) -> Option<DropProposal> {
        Some(DropProposal::new(DropOperation::Move))
    }

    /// Ends the drag. Dropping back onto the starting slot still counts as a completed gesture.
    pub fn perform_drop(&mut self) -> bool {
        self.current.clear();
        true
    }

    /// The move behind [`Self::drop_entered`], reporting why nothing happened.
    ///
    /// `Ok(None)` means the dragged item already sits on the target.
    pub fn relocate(&mut self) -> Result<Option<Relocation>, RelocateError> {
        let Some(dragged) = self.current.current() else {
            return Err(RelocateError::NoActiveDrag);
        };
        let target = self.target;

        let moved = self.data.with_mut(|items| -> Result<_, RelocateError> {
            let current_idx = position_of(items, dragged)
                .ok_or_else(|| RelocateError::DraggedItemMissing(dragged.to_string()))?;
            let target_idx = position_of(items, target)
                .ok_or_else(|| RelocateError::TargetMissing(target.to_string()))?;

            if current_idx == target_idx {
                return Ok(None);
            }

            let offset = relocation_offset(current_idx, target_idx);
            if !shift_vec(current_idx, offset, items) {
                return Ok(None);
            }
            Ok(Some(Relocation {
                from: current_idx,
                to: target_idx,
            }))
        })?;
        moved
    }
}
