use egui::{Id, Rect, ScrollArea, Sense, Ui, Vec2};

/// How a [`ReorderableView`](crate::ReorderableView) lays out its items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutAxis {
    /// Left to right.
    Row,
    /// Left to right in a horizontal scroll area, only building the items in view.
    RowLazy,
    /// Top to bottom.
    #[default]
    Column,
    /// Top to bottom in a vertical scroll area, only building the items in view.
    ColumnLazy,
    /// Every item at the same origin, later items on top.
    OverlayStack,
}

impl LayoutAxis {
    pub const ALL: [LayoutAxis; 5] = [
        LayoutAxis::Row,
        LayoutAxis::RowLazy,
        LayoutAxis::Column,
        LayoutAxis::ColumnLazy,
        LayoutAxis::OverlayStack,
    ];

    pub fn is_lazy(self) -> bool {
        matches!(self, LayoutAxis::RowLazy | LayoutAxis::ColumnLazy)
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, LayoutAxis::Row | LayoutAxis::RowLazy)
    }

    pub fn label(self) -> &'static str {
        match self {
            LayoutAxis::Row => "Row",
            LayoutAxis::RowLazy => "Row (lazy)",
            LayoutAxis::Column => "Column",
            LayoutAxis::ColumnLazy => "Column (lazy)",
            LayoutAxis::OverlayStack => "Overlay stack",
        }
    }

    /// Open the container for this axis and run `add_items` inside it with a fresh [`ItemPlacer`].
    pub(crate) fn show<R>(
        self,
        ui: &mut Ui,
        id: Id,
        add_items: impl FnOnce(&mut Ui, &mut ItemPlacer) -> R,
    ) -> R {
        match self {
            LayoutAxis::Row => ui
                .horizontal(|ui| add_items(ui, &mut ItemPlacer::flow(None)))
                .inner,
            LayoutAxis::Column => ui
                .vertical(|ui| add_items(ui, &mut ItemPlacer::flow(None)))
                .inner,
            LayoutAxis::RowLazy | LayoutAxis::ColumnLazy => {
                let scroll = if self.is_horizontal() {
                    ScrollArea::horizontal()
                } else {
                    ScrollArea::vertical()
                };
                // pressing on an item starts a reorder, never a scroll
                scroll
                    .id_source(id)
                    .drag_to_scroll(false)
                    .show_viewport(ui, |ui, viewport| {
                        // viewport is relative to the content origin
                        let visible = viewport.translate(ui.min_rect().min.to_vec2());
                        let mut placer = ItemPlacer::flow(Some(visible));
                        if self.is_horizontal() {
                            ui.horizontal(|ui| add_items(ui, &mut placer)).inner
                        } else {
                            ui.vertical(|ui| add_items(ui, &mut placer)).inner
                        }
                    })
                    .inner
            }
            LayoutAxis::OverlayStack => {
                let origin = ui.available_rect_before_wrap();
                let mut placer = ItemPlacer::overlay(origin);
                let inner = add_items(ui, &mut placer);
                if let Some(covered) = placer.covered {
                    ui.allocate_rect(covered, Sense::hover());
                }
                inner
            }
        }
    }
}

/// Where an item ended up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Placement {
    /// The item's ui ran and took this rect.
    Built(Rect),
    /// Out of view: space was reserved from the cached size, nothing was built.
    Skipped(Rect),
}

impl Placement {
    pub(crate) fn rect(self) -> Rect {
        match self {
            Placement::Built(rect) | Placement::Skipped(rect) => rect,
        }
    }
}

/// Positions items one at a time for a [`LayoutAxis`].
pub(crate) struct ItemPlacer {
    /// Visible part of the scroll content, lazy axes only.
    visible: Option<Rect>,
    /// Shared origin, overlay stack only.
    overlay_origin: Option<Rect>,
    covered: Option<Rect>,
}

impl ItemPlacer {
    fn flow(visible: Option<Rect>) -> Self {
        Self {
            visible,
            overlay_origin: None,
            covered: None,
        }
    }

    fn overlay(origin: Rect) -> Self {
        Self {
            visible: None,
            overlay_origin: Some(origin),
            covered: None,
        }
    }

    /// Place one item. `cached_size` is the size it had last time it was built, if ever; lazy
    /// axes use it to skip items that would land outside the viewport.
    pub(crate) fn place(
        &mut self,
        ui: &mut Ui,
        cached_size: Option<Vec2>,
        build: impl FnOnce(&mut Ui) -> Rect,
    ) -> Placement {
        if let Some(origin) = self.overlay_origin {
            let mut child = ui.child_ui(origin, *ui.layout());
            let rect = build(&mut child);
            self.covered = Some(self.covered.map_or(rect, |covered| covered.union(rect)));
            return Placement::Built(rect);
        }

        if let (Some(visible), Some(size)) = (self.visible, cached_size) {
            let predicted = Rect::from_min_size(ui.cursor().min, size);
            if !visible.intersects(predicted) {
                let (_id, rect) = ui.allocate_space(size);
                return Placement::Skipped(rect);
            }
        }

        Placement::Built(build(ui))
    }
}
