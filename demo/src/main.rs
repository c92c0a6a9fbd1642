use eframe::egui::{self, CentralPanel, Color32, Frame, RichText, Stroke, TopBottomPanel};
use egui::ecolor::hex_color;
use egui_extras::{Size, StripBuilder};
use egui_reorder::{Binding, DragPhase, LayoutAxis, ReorderableItem, ReorderableView};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug)]
struct Card {
    id: u64,
    title: String,
    color: Color32,
}

impl ReorderableItem for Card {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

fn palette() -> [Color32; 5] {
    [
        hex_color!("#e76f51"),
        hex_color!("#f4a261"),
        hex_color!("#e9c46a"),
        hex_color!("#2a9d8f"),
        hex_color!("#264653"),
    ]
}

struct DemoApp {
    cards: Binding<Vec<Card>>,
    drag_enabled: Binding<bool>,
    view: ReorderableView<Card>,
    next_id: u64,
    last_phase: DragPhase,
}

impl DemoApp {
    fn new() -> Self {
        let cards = Binding::new(Vec::new());
        let drag_enabled = Binding::new(true);
        let view = ReorderableView::new(cards.clone(), drag_enabled.clone())
            .id_source("demo_cards")
            .highlight_drop_area(true);
        let mut app = Self {
            cards,
            drag_enabled,
            view,
            next_id: 0,
            last_phase: DragPhase::Idle,
        };
        for _ in 0..6 {
            app.add_card();
        }
        app
    }

    fn add_card(&mut self) {
        let id = self.next_id;
        self.next_id += 1;
        let card = Card {
            id,
            title: format!("Card {id}"),
            color: palette()[id as usize % 5],
        };
        if let Err(err) = self.cards.with_mut(|cards| cards.push(card)) {
            tracing::warn!("could not add card: {err}");
        }
    }

    fn remove_first(&mut self) {
        // removing the card being dragged is allowed; the drag just stops moving anything
        if let Err(err) = self.cards.with_mut(|cards| {
            if !cards.is_empty() {
                cards.remove(0);
            }
        }) {
            tracing::warn!("could not remove card: {err}");
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut enabled = self.drag_enabled.get().unwrap_or(false);
            if ui.checkbox(&mut enabled, "Drag enabled").changed() {
                if let Err(err) = self.drag_enabled.set(enabled) {
                    tracing::warn!("could not toggle dragging: {err}");
                }
            }

            let mut axis = self.view.current_axis();
            egui::ComboBox::from_label("Axis")
                .selected_text(axis.label())
                .show_ui(ui, |ui| {
                    for option in LayoutAxis::ALL {
                        ui.selectable_value(&mut axis, option, option.label());
                    }
                });
            self.view.set_axis(axis);

            if ui.button("Add").clicked() {
                self.add_card();
            }
            if ui.button("Remove first").clicked() {
                self.remove_first();
            }
        });
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        TopBottomPanel::top("controls").show(ctx, |ui| self.controls(ui));

        CentralPanel::default().show(ctx, |ui| {
            StripBuilder::new(ui)
                .size(Size::remainder())
                .size(Size::exact(24.0))
                .vertical(|mut strip| {
                    strip.cell(|ui| {
                        let response = self.view.ui(ui, |ui, card| {
                            Frame::none()
                                .fill(card.color)
                                .stroke(Stroke::new(1.0, Color32::BLACK))
                                .inner_margin(8.0)
                                .rounding(4.0)
                                .show(ui, |ui| {
                                    ui.label(RichText::new(&card.title).color(Color32::BLACK));
                                });
                        });
                        if response.phase != self.last_phase {
                            tracing::debug!(phase = ?response.phase, "drag phase changed");
                            self.last_phase = response.phase;
                        }
                    });
                    strip.cell(|ui| {
                        let order = self
                            .cards
                            .with(|cards| {
                                cards
                                    .iter()
                                    .map(|card| card.id.to_string())
                                    .collect::<Vec<_>>()
                                    .join(", ")
                            })
                            .unwrap_or_default();
                        ui.label(format!("Order: {order}"));
                    });
                });
        });
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("egui_reorder=debug")),
        )
        .init();

    eframe::run_native(
        "egui_reorder demo",
        eframe::NativeOptions::default(),
        Box::new(|_| Box::new(DemoApp::new())),
    )
}
