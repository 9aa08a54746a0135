//! Shared egui widgets for the component sidebar and info panel

use bevy_egui::egui;

use crate::models::{ModelPhase, ModelState};
use crate::types::{ComponentList, PendingVisibility, UiLayout, VisibilityRequest};

/// Render the model load status line
pub fn render_model_status(ui: &mut egui::Ui, state: &ModelState) {
    let text = state.status_text();
    match state.phase {
        ModelPhase::Failed(_) => {
            ui.colored_label(egui::Color32::from_rgb(200, 50, 50), text);
        }
        ModelPhase::Ready => {
            ui.label(egui::RichText::new(text).small().color(egui::Color32::GRAY));
        }
        _ => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(text);
            });
        }
    }
}

/// Render the search box, "Toggle All" and one checkbox per component.
///
/// Checkbox changes are queued on `requests`; the scene is updated by the
/// visibility system.
pub fn render_component_list(
    ui: &mut egui::Ui,
    list: &ComponentList,
    query: &mut String,
    requests: &mut PendingVisibility,
    ui_layout: &UiLayout,
) {
    let ui_scale = ui_layout.ui_scale();

    ui.add(
        egui::TextEdit::singleline(query)
            .hint_text("Search components...")
            .desired_width(f32::INFINITY),
    );
    ui.add_space(4.0);

    let mut all_visible = list.all_visible();
    let toggle_all = egui::RichText::new("Toggle All").strong().size(14.0 * ui_scale);
    if ui.checkbox(&mut all_visible, toggle_all).changed() {
        requests.push(VisibilityRequest::All(all_visible));
    }

    ui.separator();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .max_height(ui.available_height() - 24.0 * ui_scale)
        .show(ui, |ui| {
            let mut shown = 0;
            for (index, component) in list.filtered(query) {
                let mut visible = list.is_visible(index);
                if ui
                    .checkbox(&mut visible, egui::RichText::new(&component.name).size(13.0 * ui_scale))
                    .changed()
                {
                    requests.push(VisibilityRequest::Component {
                        name: component.name.clone(),
                        visible,
                    });
                }
                shown += 1;
            }
            if shown == 0 && !list.registry.is_empty() {
                ui.label(egui::RichText::new("No matching components").italics().color(egui::Color32::GRAY));
            }
        });

    ui.separator();
    ui.label(
        egui::RichText::new(format!(
            "{} components, {} meshes",
            list.registry.len(),
            list.registry.mesh_count()
        ))
        .small()
        .color(egui::Color32::GRAY),
    );
}

/// Render the selection info panel.
///
/// Returns `true` when the close button was pressed.
pub fn render_info_panel(ctx: &egui::Context, text: &str, ui_layout: &UiLayout) -> bool {
    let mut close = false;
    let width = if ui_layout.is_mobile {
        ui_layout.screen_width * 0.8
    } else {
        320.0
    };

    egui::Window::new("Component Info")
        .id(egui::Id::new("component_info"))
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-12.0, 12.0))
        .default_width(width)
        .resizable(false)
        .collapsible(false)
        .title_bar(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(egui::RichText::new("Component").size(16.0 * ui_layout.ui_scale()));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("✕").clicked() {
                        close = true;
                    }
                });
            });
            ui.separator();
            ui.label(text);
        });

    close
}
