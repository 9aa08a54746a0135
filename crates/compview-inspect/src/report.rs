//! Text report of components and the zoom limit

use std::fmt::Write;

use compview_core::glam::Vec3;
use compview_core::{
    min_distance_for, set_component_visibility, ComponentRegistry, DescriptionTable, SceneGraph, ZoomSettings,
};

/// What to compute for a scene
pub struct ReportOptions<'a> {
    pub camera: Vec3,
    pub zoom: &'a ZoomSettings,
    /// Components hidden before the zoom limit is computed
    pub hidden: &'a [String],
    /// Include each component's description
    pub descriptions: Option<&'a DescriptionTable>,
}

/// Build the registry, apply hidden components and render the report
pub fn render<S: SceneGraph>(scene: &mut S, options: &ReportOptions) -> String {
    let registry = ComponentRegistry::build(scene, options.camera);

    for name in options.hidden {
        if set_component_visibility(scene, name, false) == 0 {
            tracing::warn!("No component named '{}'", name);
        }
    }
    let min_distance = min_distance_for(registry.components(), scene, options.zoom);

    let mut out = String::new();
    let _ = writeln!(out, "Selectable meshes: {}", registry.mesh_count());
    let _ = writeln!(out, "Components (farthest first): {}", registry.len());

    for (rank, component) in registry.iter().enumerate() {
        let distance = if component.has_distance() {
            format!("{:.4} units", component.distance)
        } else {
            "no geometry".to_string()
        };
        let hidden = if scene.is_visible(component.representative) {
            ""
        } else {
            " [hidden]"
        };
        let _ = write!(
            out,
            "{:>4}. {}: {} ({} meshes){}",
            rank + 1,
            component.name,
            distance,
            component.members.len(),
            hidden
        );
        if let Some(table) = options.descriptions {
            let raw = scene.raw_name(component.representative);
            let _ = write!(out, " - {}", table.describe(raw));
        }
        out.push('\n');
    }

    let _ = writeln!(out, "Minimum zoom distance: {:.6}", min_distance);
    out
}
