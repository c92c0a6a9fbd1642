//! The drag and drop plumbing egui doesn't provide: drag sources and drop targets registered while
//! a frame is built, and a tracker that turns pointer movement over those targets into
//! entered/updated/performed callbacks.

use egui::{Id, Pos2, Rect};
use std::fmt::Display;
use tracing::trace;

/// Kinds of payload a drop target can accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadType {
    Text,
}

/// Token handed to the drag system when a drag starts. Only its presence matters; nothing reads
/// the text back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    pub payload_type: PayloadType,
    pub text: String,
}

impl DragPayload {
    pub fn text(text: impl Display) -> Self {
        Self {
            payload_type: PayloadType::Text,
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DragSource<K> {
    pub key: K,
    pub widget_id: Id,
    pub rect: Rect,
}

#[derive(Debug, Clone)]
pub struct DropTarget<K> {
    pub key: K,
    pub widget_id: Id,
    pub rect: Rect,
    /// Clip rect of the ui the target was drawn in. Only the part of `rect` inside it is hit.
    pub clip: Rect,
    pub accepts: &'static [PayloadType],
}

impl<K> DropTarget<K> {
    pub fn accepts(&self, payload: &DragPayload) -> bool {
        self.accepts.contains(&payload.payload_type)
    }

    pub fn contains(&self, pos: Pos2) -> bool {
        self.rect.contains(pos) && self.clip.contains(pos)
    }
}

/// Everything registered for drag and drop while building one frame. `K` identifies the item
/// behind each registration.
#[derive(Debug, Clone)]
pub struct FrameRegistry<K> {
    sources: Vec<DragSource<K>>,
    targets: Vec<DropTarget<K>>,
}

impl<K> Default for FrameRegistry<K> {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            targets: Vec::new(),
        }
    }
}

impl<K> FrameRegistry<K> {
    pub fn register_source(&mut self, key: K, widget_id: Id, rect: Rect) {
        self.sources.push(DragSource {
            key,
            widget_id,
            rect,
        });
    }

    pub fn register_target(
        &mut self,
        key: K,
        widget_id: Id,
        rect: Rect,
        clip: Rect,
        accepts: &'static [PayloadType],
    ) {
        self.targets.push(DropTarget {
            key,
            widget_id,
            rect,
            clip,
            accepts,
        });
    }

    pub fn sources(&self) -> &[DragSource<K>] {
        &self.sources
    }

    pub fn targets(&self) -> &[DropTarget<K>] {
        &self.targets
    }

    /// The topmost target under `pos` that takes `payload`. Targets registered later paint on top;
    /// targets scrolled or clipped out of view are never hit.
    pub fn target_at(&self, pos: Pos2, payload: &DragPayload) -> Option<&DropTarget<K>> {
        self.targets
            .iter()
            .rev()
            .find(|target| target.contains(pos) && target.accepts(payload))
    }
}

/// Callbacks produced by [`DropTracker::track`], in the order they should be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropEvent<K> {
    Entered(K),
    Updated(K),
    Performed(K),
    /// Pointer released over no target at all.
    Released,
}

/// Pointer state sampled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    pub pos: Option<Pos2>,
    pub released: bool,
}

/// Remembers which target the pointer was over last frame so `Entered` fires once per crossing.
#[derive(Debug, Clone, Default)]
pub struct DropTracker {
    hovered: Option<Id>,
}

impl DropTracker {
    pub fn hovered(&self) -> Option<Id> {
        self.hovered
    }

    pub fn reset(&mut self) {
        self.hovered = None;
    }

    /// Produce this frame's events for a drag carrying `payload`. Without a payload there is no
    /// drag and nothing is produced.
    pub fn track<K: Clone + Display>(
        &mut self,
        registry: &FrameRegistry<K>,
        payload: Option<&DragPayload>,
        pointer: PointerSample,
    ) -> Vec<DropEvent<K>> {
        let Some(payload) = payload else {
            self.hovered = None;
            return Vec::new();
        };

        let target = pointer.pos.and_then(|pos| registry.target_at(pos, payload));
        let mut events = Vec::new();

        match target {
            Some(target) => {
                if self.hovered != Some(target.widget_id) {
                    trace!(target = %target.key, "drop target entered");
                    events.push(DropEvent::Entered(target.key.clone()));
                }
                events.push(DropEvent::Updated(target.key.clone()));
                if pointer.released {
                    trace!(target = %target.key, "drop performed");
                    events.push(DropEvent::Performed(target.key.clone()));
                }
                self.hovered = Some(target.widget_id);
            }
            None => {
                if pointer.released {
                    trace!("released outside every drop target");
                    events.push(DropEvent::Released);
                }
                self.hovered = None;
            }
        }

        if pointer.released {
            self.hovered = None;
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    const TEXT: &[PayloadType] = &[PayloadType::Text];

    fn column(keys: &[&'static str]) -> FrameRegistry<&'static str> {
        let mut registry = FrameRegistry::default();
        for (i, key) in keys.iter().enumerate() {
            let rect = Rect::from_min_size(pos2(0.0, i as f32 * 20.0), vec2(100.0, 20.0));
            registry.register_source(*key, Id::new(key), rect);
            registry.register_target(*key, Id::new(key), rect, Rect::EVERYTHING, TEXT);
        }
        registry
    }

    fn at(y: f32) -> PointerSample {
        PointerSample {
            pos: Some(pos2(50.0, y)),
            released: false,
        }
    }

    #[test]
    fn entered_fires_once_per_crossing() {
        let registry = column(&["a", "b", "c"]);
        let payload = DragPayload::text("a");
        let mut tracker = DropTracker::default();

        assert_eq!(
            tracker.track(&registry, Some(&payload), at(5.0)),
            [DropEvent::Entered("a"), DropEvent::Updated("a")]
        );
        assert_eq!(
            tracker.track(&registry, Some(&payload), at(8.0)),
            [DropEvent::Updated("a")]
        );
        assert_eq!(
            tracker.track(&registry, Some(&payload), at(45.0)),
            [DropEvent::Entered("c"), DropEvent::Updated("c")]
        );
    }

    #[test]
    fn release_over_target_performs_drop() {
        let registry = column(&["a", "b"]);
        let payload = DragPayload::text("a");
        let mut tracker = DropTracker::default();
        tracker.track(&registry, Some(&payload), at(25.0));

        let events = tracker.track(
            &registry,
            Some(&payload),
            PointerSample {
                pos: Some(pos2(50.0, 25.0)),
                released: true,
            },
        );

        assert_eq!(events, [DropEvent::Updated("b"), DropEvent::Performed("b")]);
        assert_eq!(tracker.hovered(), None);
    }

    #[test]
    fn release_outside_reports_released() {
        let registry = column(&["a"]);
        let payload = DragPayload::text("a");
        let mut tracker = DropTracker::default();

        let events = tracker.track(
            &registry,
            Some(&payload),
            PointerSample {
                pos: Some(pos2(500.0, 500.0)),
                released: true,
            },
        );
        assert_eq!(events, [DropEvent::Released]);
    }

    #[test]
    fn nothing_happens_without_a_payload() {
        let registry = column(&["a", "b"]);
        let mut tracker = DropTracker::default();

        assert!(tracker.track(&registry, None, at(5.0)).is_empty());
        assert_eq!(tracker.hovered(), None);
    }

    #[test]
    fn topmost_overlapping_target_wins() {
        let mut registry = FrameRegistry::default();
        let rect = Rect::from_min_size(Pos2::ZERO, vec2(10.0, 10.0));
        registry.register_target("bottom", Id::new("bottom"), rect, rect, TEXT);
        registry.register_target("top", Id::new("top"), rect, rect, TEXT);

        let payload = DragPayload::text("x");
        let hit = registry.target_at(pos2(5.0, 5.0), &payload).map(|t| t.key);
        assert_eq!(hit, Some("top"));
    }

    #[test]
    fn targets_ignore_payloads_they_do_not_accept() {
        let mut registry = FrameRegistry::default();
        let rect = Rect::from_min_size(Pos2::ZERO, vec2(10.0, 10.0));
        registry.register_target("picky", Id::new("picky"), rect, rect, &[]);

        let payload = DragPayload::text("x");
        assert!(registry.target_at(pos2(5.0, 5.0), &payload).is_none());
    }

    #[test]
    fn clipped_part_of_a_target_is_not_hit() {
        let mut registry = FrameRegistry::default();
        // half of the item is scrolled out below the visible list
        let rect = Rect::from_min_size(pos2(0.0, 90.0), vec2(100.0, 20.0));
        let clip = Rect::from_min_size(Pos2::ZERO, vec2(100.0, 100.0));
        registry.register_target("edge", Id::new("edge"), rect, clip, TEXT);
        let payload = DragPayload::text("x");
        let mut tracker = DropTracker::default();

        assert_eq!(registry.target_at(pos2(50.0, 95.0), &payload).map(|t| t.key), Some("edge"));
        assert!(registry.target_at(pos2(50.0, 105.0), &payload).is_none());

        let events = tracker.track(
            &registry,
            Some(&payload),
            PointerSample {
                pos: Some(pos2(50.0, 105.0)),
                released: true,
            },
        );
        assert_eq!(events, [DropEvent::Released]);
    }

    #[test]
    fn payload_text_is_the_display_form() {
        assert_eq!(DragPayload::text(42).text, "42");
    }
}
