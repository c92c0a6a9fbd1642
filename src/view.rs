use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use egui::{CursorIcon, Id, Rect, Sense, Shape, Ui, Vec2};
use tracing::{debug, warn};

use crate::axis::{LayoutAxis, Placement};
use crate::binding::Binding;
use crate::dnd::{DragPayload, DropEvent, DropTracker, FrameRegistry, PayloadType, PointerSample};
use crate::item::ReorderableItem;
use crate::relocate::{DragRelocateDelegate, DropOperation, Relocation};
use crate::session::DragSession;

const ACCEPTED_PAYLOADS: &[PayloadType] = &[PayloadType::Text];
const HIGHLIGHT_MARGIN: f32 = 4.0;

/// Where the drag gesture stands after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
    /// Released over one of the items this frame.
    Dropped,
    /// Released outside every item, or dragging was switched off mid-drag.
    Cancelled,
}

/// What happened during one call to [`ReorderableView::ui`].
///
/// `relocations` lists the moves made to the collection this frame, in order; the collection
/// itself has already been updated through its binding.
#[derive(Debug)]
pub struct ReorderResponse {
    pub phase: DragPhase,
    pub relocations: Vec<Relocation>,
    /// Number of items wired up as drag sources this frame.
    pub drag_sources: usize,
    /// Number of items wired up as drop targets this frame.
    pub drop_targets: usize,
    pub response: egui::Response,
}

impl ReorderResponse {
    pub fn changed(&self) -> bool {
        !self.relocations.is_empty()
    }
}

/// [`ReorderableView`] draws a bound collection and lets the user drag its items into a new
/// order. The collection is rewritten through its [`Binding`] while the drag is still going, each
/// time the pointer crosses into another item.
///
/// Keep the view around between frames (it owns the drag state) and call [`Self::ui`] every frame
/// with a closure that draws one item.
///
/// # Example
/// ```rust,no_run
/// use eframe::egui::{self, CentralPanel};
/// use egui_reorder::{Binding, LayoutAxis, ReorderableView};
///
/// struct App {
///     items: Binding<Vec<String>>,
///     view: ReorderableView<String>,
/// }
///
/// impl eframe::App for App {
///     fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
///         CentralPanel::default().show(ctx, |ui| {
///             let response = self.view.ui(ui, |ui, item| {
///                 ui.label(item.as_str());
///             });
///             if response.changed() {
///                 println!("new order: {:?}", self.items.borrow());
///             }
///         });
///     }
/// }
///
/// fn main() -> eframe::Result<()> {
///     let items = Binding::new(vec!["a".to_string(), "b".to_string(), "c".to_string()]);
///     let view = ReorderableView::new(items.clone(), Binding::new(true)).axis(LayoutAxis::Column);
///     eframe::run_native(
///         "Reorder",
///         eframe::NativeOptions::default(),
///         Box::new(|_| Box::new(App { items, view })),
///     )
/// }
/// ```
pub struct ReorderableView<T: ReorderableItem> {
    data: Binding<Vec<T>>,
    drag_enabled: Binding<bool>,
    axis: LayoutAxis,
    id_source: Id,
    highlight_drop_area: bool,

    session: DragSession<T::Id>,
    payload: Option<DragPayload>,
    tracker: DropTracker,
    /// Last built size of each item, keyed by widget id. Lets lazy axes skip what is out of view.
    sizes: HashMap<Id, Vec2>,
}

impl<T: ReorderableItem> ReorderableView<T> {
    pub fn new(data: Binding<Vec<T>>, drag_enabled: Binding<bool>) -> Self {
        Self {
            data,
            drag_enabled,
            axis: LayoutAxis::default(),
            id_source: Id::new("egui_reorder"),
            highlight_drop_area: false,

            session: DragSession::default(),
            payload: None,
            tracker: DropTracker::default(),
            sizes: HashMap::new(),
        }
    }

    pub fn axis(mut self, axis: LayoutAxis) -> Self {
        self.axis = axis;
        self
    }

    /// Needed when more than one view shares a parent ui.
    pub fn id_source(mut self, id_source: impl Hash) -> Self {
        self.id_source = Id::new(id_source);
        self
    }

    /// Paint a background behind the items, highlighted while a drag hovers over them.
    pub fn highlight_drop_area(mut self, highlight: bool) -> Self {
        self.highlight_drop_area = highlight;
        self
    }

    pub fn set_axis(&mut self, axis: LayoutAxis) {
        self.axis = axis;
    }

    pub fn current_axis(&self) -> LayoutAxis {
        self.axis
    }

    pub fn data(&self) -> &Binding<Vec<T>> {
        &self.data
    }

    pub fn drag_enabled(&self) -> &Binding<bool> {
        &self.drag_enabled
    }

    pub fn session(&self) -> &DragSession<T::Id> {
        &self.session
    }

    /// Draw the collection. `item_ui` draws a single item and must not write to the collection's
    /// binding; that write would fail with [`BindingError::AlreadyBorrowed`](crate::BindingError).
    pub fn ui(&mut self, ui: &mut Ui, mut item_ui: impl FnMut(&mut Ui, &T)) -> ReorderResponse {
        let id = ui.make_persistent_id(self.id_source);
        let drag_enabled = match self.drag_enabled.get() {
            Ok(enabled) => enabled,
            Err(err) => {
                warn!("drag flag unreadable, treating as disabled: {err}");
                false
            }
        };

        let mut phase = DragPhase::Idle;
        if !drag_enabled && (self.session.is_dragging() || self.payload.is_some()) {
            self.end_drag();
            phase = DragPhase::Cancelled;
        }

        let mut registry = FrameRegistry::default();
        let mut drag_started = None;
        let is_drop_target = drag_enabled && self.payload.is_some();
        let data = self.data.clone();
        let axis = self.axis;
        let sizes = &mut self.sizes;

        let response = Self::draw_list(ui, self.highlight_drop_area, is_drop_target, |ui| {
            let rendered = data.with(|items| {
                axis.show(ui, id, |ui, placer| {
                    for item in items {
                        let item_id = item.id();
                        let widget_id = id.with(&item_id);

                        let placement = placer.place(ui, sizes.get(&widget_id).copied(), |ui| {
                            ui.scope(|ui| item_ui(ui, item)).response.rect
                        });
                        if let Placement::Built(rect) = placement {
                            sizes.insert(widget_id, rect.size());
                        }

                        if !drag_enabled {
                            continue;
                        }
                        if let Placement::Built(rect) = placement {
                            if Self::drag_source(ui, widget_id, rect) {
                                drag_started = Some(item_id.clone());
                            }
                            registry.register_source(item_id.clone(), widget_id, rect);
                        }
                        registry.register_target(
                            item_id,
                            widget_id,
                            placement.rect(),
                            ui.clip_rect(),
                            ACCEPTED_PAYLOADS,
                        );
                    }
                })
            });
            if let Err(err) = rendered {
                warn!("collection unreadable, skipping frame: {err}");
            }
        });

        if let Some(item_id) = drag_started {
            self.payload = Some(DragPayload::text(&item_id));
            self.session.begin(item_id);
            self.tracker.reset();
        }

        let pointer = ui.input(|i| PointerSample {
            pos: i.pointer.hover_pos().or(i.pointer.interact_pos()),
            released: i.pointer.any_released() || !i.pointer.any_down(),
        });
        let events = self
            .tracker
            .track(&registry, self.payload.as_ref(), pointer);

        let mut relocations = Vec::new();
        for event in events {
            match event {
                DropEvent::Entered(target) => {
                    let mut delegate =
                        DragRelocateDelegate::new(&target, &self.data, &mut self.session);
                    relocations.extend(delegate.drop_entered());
                }
                DropEvent::Updated(target) => {
                    let mut delegate =
                        DragRelocateDelegate::new(&target, &self.data, &mut self.session);
                    let operation = delegate.drop_updated().map(|proposal| proposal.operation);
                    ui.ctx().set_cursor_icon(match operation {
                        Some(DropOperation::Move) => CursorIcon::Grabbing,
                        Some(DropOperation::Copy) => CursorIcon::Copy,
                        Some(DropOperation::Forbidden | DropOperation::Cancel) | None => {
                            CursorIcon::NotAllowed
                        }
                    });
                }
                DropEvent::Performed(target) => {
                    let mut delegate =
                        DragRelocateDelegate::new(&target, &self.data, &mut self.session);
                    if delegate.perform_drop() {
                        phase = DragPhase::Dropped;
                    }
                    self.payload = None;
                }
                DropEvent::Released => {
                    self.end_drag();
                    phase = DragPhase::Cancelled;
                }
            }
        }

        if phase == DragPhase::Idle && self.payload.is_some() {
            phase = DragPhase::Dragging;
        }
        if !relocations.is_empty() {
            ui.ctx().request_repaint();
        }
        self.forget_removed_items(id);

        ReorderResponse {
            phase,
            relocations,
            drag_sources: registry.sources().len(),
            drop_targets: registry.targets().len(),
            response,
        }
    }

    /// Make `rect` draggable. Returns whether a drag started on it this frame. No preview is
    /// painted: the item itself moving through the list is the feedback.
    fn drag_source(ui: &mut Ui, widget_id: Id, rect: Rect) -> bool {
        let response = ui.interact(rect, widget_id, Sense::drag());

        if response.dragged() {
            ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
        } else if response.hovered() {
            ui.ctx().set_cursor_icon(CursorIcon::Grab);
        }
        response.drag_started()
    }

    fn end_drag(&mut self) {
        if self.session.cancel().is_none() && self.payload.is_some() {
            debug!("dropping payload of a drag with no session");
        }
        self.payload = None;
        self.tracker.reset();
    }

    fn forget_removed_items(&mut self, id: Id) {
        let Ok(live) = self.data.with(|items| {
            items
                .iter()
                .map(|item| id.with(item.id()))
                .collect::<HashSet<_>>()
        }) else {
            return;
        };
        self.sizes.retain(|widget_id, _| live.contains(widget_id));
    }

    /// Run `list_body`, then paint a background behind whatever it drew. The background uses the
    /// active widget visuals while a drag in flight hovers the list, inactive visuals otherwise.
    fn draw_list(
        ui: &mut Ui,
        highlight: bool,
        is_drop_target: bool,
        list_body: impl FnOnce(&mut Ui),
    ) -> egui::Response {
        // reserve the paint slot first so the background ends up under the items
        let background = highlight.then(|| ui.painter().add(Shape::Noop));
        let response = ui.scope(list_body).response;
        let Some(background) = background else {
            return response;
        };

        let area = response.rect.expand(HIGHLIGHT_MARGIN);
        let visuals = if is_drop_target && ui.rect_contains_pointer(area) {
            ui.visuals().widgets.active
        } else {
            ui.visuals().widgets.inactive
        };
        ui.painter().set(
            background,
            epaint::RectShape::new(area, visuals.rounding, visuals.bg_fill, visuals.bg_stroke),
        );

        response
    }
}
