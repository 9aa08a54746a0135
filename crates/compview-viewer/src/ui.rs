//! UI overlays using bevy_egui

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};
use compview_scene::ui::{render_component_list, render_info_panel, render_model_status};
use compview_scene::{
    ActiveSelection, ComponentFilter, ComponentList, ModelScene, ModelState, PendingVisibility, UiLayout,
};

/// Grouped system parameters for the main UI system
#[derive(SystemParam)]
pub struct UiParams<'w, 's> {
    pub contexts: EguiContexts<'w, 's>,
    pub model: Res<'w, ModelState>,
    pub list: Res<'w, ComponentList>,
    pub filter: ResMut<'w, ComponentFilter>,
    pub pending: ResMut<'w, PendingVisibility>,
    pub selection: ResMut<'w, ActiveSelection>,
    pub scene: ModelScene<'w, 's>,
    pub ui_layout: ResMut<'w, UiLayout>,
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // bevy_egui 0.38 draws in EguiPrimaryContextPass
        app.add_systems(EguiPrimaryContextPass, ui_system);
    }
}

fn ui_system(mut params: UiParams) {
    let is_mobile = params.ui_layout.is_mobile;
    let panel_width = params.ui_layout.left_panel_width();
    let ui_scale = params.ui_layout.ui_scale();

    let Ok(ctx) = params.contexts.ctx_mut() else { return };

    if is_mobile {
        let mut style = (*ctx.style()).clone();
        style.spacing.button_padding = egui::vec2(6.0, 4.0);
        style.spacing.item_spacing = egui::vec2(4.0, 3.0);
        ctx.set_style(style);

        egui::TopBottomPanel::bottom("mobile_toolbar").show(ctx, |ui| {
            let text = if params.ui_layout.show_left_panel { "☰ Components ✕" } else { "☰ Components" };
            if ui.button(egui::RichText::new(text).size(16.0 * ui_scale)).clicked() {
                params.ui_layout.show_left_panel = !params.ui_layout.show_left_panel;
            }
        });
    }

    if !is_mobile || params.ui_layout.show_left_panel {
        egui::SidePanel::left("components_panel")
            .default_width(panel_width)
            .resizable(!is_mobile)
            .show(ctx, |ui| {
                ui.heading(egui::RichText::new("Components").size(18.0 * ui_scale));
                render_model_status(ui, &params.model);
                ui.separator();

                if params.model.is_ready() {
                    render_component_list(
                        ui,
                        &params.list,
                        &mut params.filter.query,
                        &mut params.pending,
                        &params.ui_layout,
                    );
                }
            });
    }

    let panel_text = params.selection.0.selection().panel_text().map(str::to_string);
    if let Some(text) = panel_text {
        if render_info_panel(ctx, &text, &params.ui_layout) {
            params.selection.0.clear(&mut params.scene);
        }
    }
}
