use eframe::egui::{
    self, Align2, Color32, FontId, Painter, Rect, Sense, Stroke, StrokeKind, Ui, Vec2, vec2,
};

use crate::color::{self, CategoryPalette, phase_border};
use crate::data::grid::{GRID_COLUMNS, GRID_ROWS};
use crate::data::model::Element;
use crate::state::AppState;

/// Tiles never shrink below this; the view scrolls instead.
const MIN_CELL: f32 = 34.0;
const CORNER: f32 = 4.0;

// ---------------------------------------------------------------------------
// Periodic grid (central panel)
// ---------------------------------------------------------------------------

/// Paint every element at its fixed grid cell. Non-matching elements are
/// dimmed, never hidden, so positions do not move while filters change.
pub fn periodic_table(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No elements to display");
        });
        return;
    }

    let avail = ui.available_size();
    let cell = (avail.x / GRID_COLUMNS as f32)
        .min(avail.y / GRID_ROWS as f32)
        .max(MIN_CELL);
    let mut clicked = None;

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let size = vec2(cell * GRID_COLUMNS as f32, cell * GRID_ROWS as f32);
            let (response, painter) = ui.allocate_painter(size, Sense::hover());
            let origin = response.rect.min;
            let gap = (cell * 0.05).max(1.0);

            for (grid_cell, idx) in state.grid.cells() {
                let el = &state.dataset.elements()[idx];
                let min = origin + vec2(grid_cell.column as f32 * cell, grid_cell.row as f32 * cell);
                let rect = Rect::from_min_size(min, Vec2::splat(cell)).shrink(gap);

                let tile = ui.interact(rect, ui.id().with(("element", el.number)), Sense::click());
                let look = TileLook {
                    highlighted: state.is_highlighted(idx),
                    hovered: tile.hovered(),
                    selected: state.selected == Some(el.number),
                };
                paint_tile(&painter, rect, el, look, &state.palette);

                if tile.on_hover_ui(|ui: &mut Ui| element_details(ui, el)).clicked() {
                    clicked = Some(el.number);
                }
            }
        });

    if let Some(number) = clicked {
        state.select(number);
    }
}

#[derive(Debug, Clone, Copy)]
struct TileLook {
    highlighted: bool,
    hovered: bool,
    selected: bool,
}

fn paint_tile(painter: &Painter, rect: Rect, el: &Element, look: TileLook, palette: &CategoryPalette) {
    let base = palette.color_for(&el.category);
    let border = phase_border(&el.phase);

    let (fill, border, text) = if look.highlighted {
        let fill = if look.hovered { color::hovered(base) } else { base };
        (fill, border, Color32::WHITE)
    } else {
        (color::dimmed(base), color::dimmed(border), Color32::from_gray(150))
    };
    let stroke_width = if look.selected { 3.0 } else { 1.5 };

    painter.rect_filled(rect, CORNER, fill);
    painter.rect_stroke(rect, CORNER, Stroke::new(stroke_width, border), StrokeKind::Inside);

    let size = rect.height();
    let pad = size * 0.08;
    painter.text(
        rect.left_top() + vec2(pad, pad * 0.6),
        Align2::LEFT_TOP,
        el.number.to_string(),
        FontId::proportional(size * 0.17),
        text,
    );
    painter.text(
        rect.center() + vec2(0.0, size * 0.02),
        Align2::CENTER_CENTER,
        &el.symbol,
        FontId::proportional(size * 0.36),
        text,
    );
    if size > 52.0 {
        painter.text(
            rect.center_bottom() - vec2(0.0, pad * 0.6),
            Align2::CENTER_BOTTOM,
            &el.name,
            FontId::proportional(size * 0.12),
            text,
        );
    }
}

/// Name, identity, physical data and configuration of one element.
pub fn element_details(ui: &mut Ui, el: &Element) {
    ui.set_max_width(360.0);
    ui.heading(format!("{} ({})", el.name, el.symbol));

    egui::Grid::new(("element_details", el.number))
        .num_columns(2)
        .spacing([16.0, 4.0])
        .show(ui, |ui: &mut Ui| {
            ui.label(format!("Atomic #: {}", el.number));
            ui.label(format!("Mass: {}", el.mass_label()));
            ui.end_row();
            ui.label(format!("Category: {}", el.category));
            ui.label(format!("Phase: {}", el.phase));
            ui.end_row();
            ui.label(format!("Melting Point: {}", el.melt_label()));
            ui.label(format!("Boiling Point: {}", el.boil_label()));
            ui.end_row();
        });

    if let Some(summary) = &el.summary {
        ui.add_space(4.0);
        ui.label(summary);
    }

    ui.add_space(4.0);
    ui.weak("Electron Configuration");
    ui.monospace(el.configuration_label());
    if let (Some(_), Some(simplified)) =
        (&el.electron_configuration, &el.electron_configuration_semantic)
    {
        ui.label(format!("Simplified: {simplified}"));
    }
}

/// Shown while the initial fetch is in flight.
pub fn loading_screen(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(ui.available_height() * 0.4);
        ui.spinner();
        ui.heading("Loading elements…");
    });
}
