use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::filter::ALL;
use crate::data::loader::DataSource;
use crate::data::model::Element;
use crate::state::AppState;
use crate::ui::table::element_details;

// ---------------------------------------------------------------------------
// Left side panel – search and filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.loading {
        ui.label("Loading…");
        return;
    }

    // ---- Search ----
    ui.strong("Search");
    let mut search = state.filters.search.clone();
    ui.add(
        egui::TextEdit::singleline(&mut search)
            .hint_text("Name or symbol…")
            .desired_width(f32::INFINITY),
    );
    state.set_search(&search);
    ui.add_space(6.0);

    // ---- Category / phase selectors ----
    let categories = state.dataset.categories.clone();
    let phases = state.dataset.phases.clone();

    ui.strong("Filter by Category");
    let mut category = state.filters.category.clone();
    choice_box(ui, "category_filter", &mut category, &categories, "All Categories");
    state.set_category(&category);
    ui.add_space(6.0);

    ui.strong("Filter by Phase");
    let mut phase = state.filters.phase.clone();
    choice_box(ui, "phase_filter", &mut phase, &phases, "All Phases");
    state.set_phase(&phase);
    ui.add_space(6.0);

    if ui
        .add_enabled(!state.filters.is_default(), egui::Button::new("Reset Filters"))
        .clicked()
    {
        state.reset_filters();
    }
    ui.separator();

    // ---- Legend ----
    egui::CollapsingHeader::new(RichText::new("Categories").strong())
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            for (name, color) in state.palette.legend_entries(&categories) {
                ui.horizontal(|ui: &mut Ui| {
                    let (rect, _) =
                        ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                    ui.painter().rect_filled(rect, 2.0, color);
                    ui.label(name);
                });
            }
        });

    // ---- Selected element ----
    if let Some(el) = state.selected_element() {
        ui.separator();
        element_details(ui, el);
    }

    // ---- Matches ----
    ui.separator();
    let matches: Vec<&Element> = state.highlighted_elements().collect();
    ui.strong(format!("Matches ({})", matches.len()));
    matches_table(ui, &matches);
}

fn choice_box(ui: &mut Ui, id: &str, current: &mut String, choices: &[String], all_label: &str) {
    let label = |value: &str| {
        if value == ALL {
            all_label.to_string()
        } else {
            value.to_string()
        }
    };
    egui::ComboBox::from_id_salt(id)
        .selected_text(label(current.as_str()))
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for choice in choices {
                ui.selectable_value(current, choice.clone(), label(choice.as_str()));
            }
        });
}

/// Highlighted elements as a compact table.
fn matches_table(ui: &mut Ui, matches: &[&Element]) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(false)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::exact(32.0))
        .column(Column::exact(36.0))
        .column(Column::remainder())
        .column(Column::auto())
        .max_scroll_height(260.0)
        .header(18.0, |mut header| {
            header.col(|ui| {
                ui.strong("#");
            });
            header.col(|ui| {
                ui.strong("Sym");
            });
            header.col(|ui| {
                ui.strong("Name");
            });
            header.col(|ui| {
                ui.strong("Mass");
            });
        })
        .body(|body| {
            body.rows(18.0, matches.len(), |mut row| {
                let el = matches[row.index()];
                row.col(|ui| {
                    ui.label(el.number.to_string());
                });
                row.col(|ui| {
                    ui.label(&el.symbol);
                });
                row.col(|ui| {
                    ui.label(&el.name);
                });
                row.col(|ui| {
                    ui.label(el.mass_label());
                });
            });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    let ctx = ui.ctx().clone();
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state, &ctx);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                let source = state.source.clone();
                state.begin_load(source, &ctx);
                ui.close_menu();
            }
            if ui.button("Bundled table").clicked() {
                state.begin_load(DataSource::Bundled, &ctx);
                ui.close_menu();
            }
        });

        ui.separator();

        if !state.loading {
            ui.label(format!(
                "{} elements, {} highlighted",
                state.dataset.len(),
                state.highlight_count()
            ));
            ui.separator();
            ui.label(RichText::new(state.source.to_string()).weak());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState, ctx: &egui::Context) {
    let file = rfd::FileDialog::new()
        .set_title("Open element table")
        .add_filter("Supported files", &["json", "csv"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.begin_load(DataSource::File(path), ctx);
    }
}
