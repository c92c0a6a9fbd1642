use tracing::debug;

/// Which item, if any, is being dragged right now.
///
/// ```text
/// Idle --begin(x)--> Dragging(x) --clear()/cancel()--> Idle
/// ```
///
/// A relocation does not change the session: the dragged identity stays the same even though its
/// index moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession<Id> {
    current: Option<Id>,
}

impl<Id> Default for DragSession<Id> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<Id: std::fmt::Display> DragSession<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dragging `id`. A drag that was still in flight is replaced.
    pub fn begin(&mut self, id: Id) {
        if let Some(previous) = &self.current {
            debug!(%previous, "replacing unfinished drag");
        }
        debug!(item = %id, "drag started");
        self.current = Some(id);
    }

    /// End the drag after a drop. Clearing an idle session is fine.
    pub fn clear(&mut self) {
        if let Some(id) = self.current.take() {
            debug!(item = %id, "drag finished");
        }
    }

    /// End the drag without a drop, e.g. the pointer was released outside every target or the view
    /// stopped accepting drags. Returns the item that was being dragged.
    pub fn cancel(&mut self) -> Option<Id> {
        let cancelled = self.current.take();
        if let Some(id) = &cancelled {
            debug!(item = %id, "drag cancelled");
        }
        cancelled
    }

    pub fn current(&self) -> Option<&Id> {
        self.current.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.current.is_some()
    }
}
