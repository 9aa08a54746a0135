//! Nearest-vertex distance between a mesh and the camera

use glam::{Affine3A, Vec3};

/// Distance reported for geometry without vertices.
///
/// Never lowers a running minimum, and a component whose only source is
/// empty geometry keeps this value.
pub const UNDEFINED_DISTANCE: f32 = f32::INFINITY;

/// Minimum distance from any vertex of a mesh, transformed to world space,
/// to `camera`.
pub fn nearest_vertex_distance(positions: &[[f32; 3]], world: &Affine3A, camera: Vec3) -> f32 {
    positions
        .iter()
        .map(|p| world.transform_point3(Vec3::from_array(*p)).distance(camera))
        .fold(UNDEFINED_DISTANCE, f32::min)
}

/// Whether a distance came from real geometry
pub fn is_defined(distance: f32) -> bool {
    distance.is_finite()
}
