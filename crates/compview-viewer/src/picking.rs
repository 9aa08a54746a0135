//! Click selection of model meshes
//!
//! A press and release with little pointer travel is a click; anything longer
//! is an orbit drag and never selects. Clicks cast a ray through the camera
//! against the model meshes and hand the nearest visible hit to the
//! selection controller.

use bevy::prelude::*;
use bevy_egui::EguiContexts;
use bevy_picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings, RayCastVisibility};
use compview_core::nearest_visible_hit;
use compview_scene::{ActiveSelection, MainCamera, ModelMesh, ModelScene, ModelState, ViewerSettings};

/// Pointer travel (in logical pixels) beyond which a press becomes a drag
const CLICK_SLOP: f32 = 5.0;

pub struct SelectionPlugin;

impl Plugin for SelectionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ClickTracker>()
            .add_systems(Update, (handle_pointer_clicks, handle_deselection));
    }
}

/// Pointer that started a press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerId {
    Mouse,
    Touch(u64),
}

/// Touch input for one frame, as (touch id, position) pairs
#[derive(Debug, Default)]
pub struct TouchFrame {
    pub pressed: Vec<(u64, Vec2)>,
    pub just_pressed: Vec<(u64, Vec2)>,
    pub just_released: Vec<(u64, Vec2)>,
}

impl TouchFrame {
    fn from_touches(touches: &Touches) -> Self {
        Self {
            pressed: touches.iter().map(|t| (t.id(), t.position())).collect(),
            just_pressed: touches.iter_just_pressed().map(|t| (t.id(), t.position())).collect(),
            just_released: touches.iter_just_released().map(|t| (t.id(), t.position())).collect(),
        }
    }

    /// Fingers down this frame, counting those lifted this frame
    fn active(&self) -> usize {
        self.pressed.len() + self.just_released.len()
    }
}

/// Distinguishes clicks from drags for one pointer at a time
#[derive(Debug, Clone, Resource, Default)]
pub struct ClickTracker {
    /// Pointer being tracked
    pointer: Option<PointerId>,
    /// Where the current press started
    start: Option<Vec2>,
    /// Whether the press has travelled past the slop
    dragging: bool,
}

impl ClickTracker {
    pub fn press(&mut self, pointer: PointerId, position: Vec2) {
        self.pointer = Some(pointer);
        self.start = Some(position);
        self.dragging = false;
    }

    /// Track movement of the pressed pointer; other pointers are ignored
    pub fn moved(&mut self, pointer: PointerId, position: Vec2) {
        if self.pointer != Some(pointer) {
            return;
        }
        if let Some(start) = self.start {
            if position.distance(start) > CLICK_SLOP {
                self.dragging = true;
            }
        }
    }

    /// End the press; returns the click position when it was not a drag.
    /// Releasing a pointer other than the tracked one changes nothing.
    pub fn release(&mut self, pointer: PointerId, position: Option<Vec2>) -> Option<Vec2> {
        if self.pointer != Some(pointer) {
            return None;
        }
        if let Some(position) = position {
            self.moved(pointer, position);
        }
        let click = if self.dragging { None } else { self.start };
        self.cancel();
        click
    }

    pub fn cancel(&mut self) {
        self.pointer = None;
        self.start = None;
        self.dragging = false;
    }

    fn is_touch(&self) -> bool {
        matches!(self.pointer, Some(PointerId::Touch(_)))
    }

    /// Feed one frame of touch input; returns a tap position.
    ///
    /// Only a single finger can tap. A second finger at any point turns the
    /// gesture into a pinch and drops the press.
    pub fn touch_frame(&mut self, frame: &TouchFrame, blocked: bool) -> Option<Vec2> {
        if frame.active() > 1 {
            if self.is_touch() {
                self.cancel();
            }
            return None;
        }

        for &(id, position) in &frame.just_pressed {
            if blocked {
                self.cancel();
            } else {
                self.press(PointerId::Touch(id), position);
            }
        }
        for &(id, position) in &frame.pressed {
            self.moved(PointerId::Touch(id), position);
        }
        frame
            .just_released
            .iter()
            .find_map(|&(id, position)| self.release(PointerId::Touch(id), Some(position)))
    }
}

fn handle_pointer_clicks(
    mut tracker: ResMut<ClickTracker>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    windows: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    model_meshes: Query<(), With<ModelMesh>>,
    mut ray_cast: MeshRayCast,
    mut scene: ModelScene,
    mut selection: ResMut<ActiveSelection>,
    settings: Res<ViewerSettings>,
    state: Res<ModelState>,
    mut contexts: EguiContexts,
) {
    let egui_wants_pointer = contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_pointer_input() || ctx.is_pointer_over_area())
        .unwrap_or(false);
    let cursor = windows.single().ok().and_then(|w| w.cursor_position());
    let mut click: Option<Vec2> = None;

    // Mouse
    if mouse_button.just_pressed(MouseButton::Left) {
        match cursor {
            Some(position) if !egui_wants_pointer => tracker.press(PointerId::Mouse, position),
            _ => tracker.cancel(),
        }
    } else if mouse_button.pressed(MouseButton::Left) {
        if let Some(position) = cursor {
            tracker.moved(PointerId::Mouse, position);
        }
    }
    if mouse_button.just_released(MouseButton::Left) {
        click = tracker.release(PointerId::Mouse, cursor);
    }

    // Touch
    let touches = TouchFrame::from_touches(&touch_input);
    click = click.or(tracker.touch_frame(&touches, egui_wants_pointer));

    let Some(position) = click else {
        return;
    };
    if !state.is_ready() {
        return;
    }
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, position) else {
        return;
    };

    let filter = |entity: Entity| model_meshes.contains(entity);
    let keep_going = |_: Entity| false;
    let ray_settings = MeshRayCastSettings::default()
        .with_filter(&filter)
        .with_early_exit_test(&keep_going)
        .with_visibility(RayCastVisibility::Any);
    let hits: Vec<(Entity, f32)> = ray_cast
        .cast_ray(ray, &ray_settings)
        .iter()
        .map(|(entity, hit)| (*entity, hit.distance))
        .collect();

    let hit = nearest_visible_hit(&scene, hits);
    selection.0.click(hit, &mut scene, &settings.0.descriptions);
}

/// Escape clears the current selection
fn handle_deselection(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut selection: ResMut<ActiveSelection>,
    mut scene: ModelScene,
) {
    if keyboard.just_pressed(KeyCode::Escape) && !selection.0.selection().is_idle() {
        selection.0.clear(&mut scene);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOUSE: PointerId = PointerId::Mouse;

    fn frame(
        pressed: &[(u64, Vec2)],
        just_pressed: &[(u64, Vec2)],
        just_released: &[(u64, Vec2)],
    ) -> TouchFrame {
        TouchFrame {
            pressed: pressed.to_vec(),
            just_pressed: just_pressed.to_vec(),
            just_released: just_released.to_vec(),
        }
    }

    #[test]
    fn test_press_release_in_place_is_click() {
        let mut tracker = ClickTracker::default();
        tracker.press(MOUSE, Vec2::new(100.0, 100.0));
        tracker.moved(MOUSE, Vec2::new(102.0, 101.0));
        assert_eq!(
            tracker.release(MOUSE, Some(Vec2::new(103.0, 101.0))),
            Some(Vec2::new(100.0, 100.0))
        );
    }

    #[test]
    fn test_drag_is_not_click() {
        let mut tracker = ClickTracker::default();
        tracker.press(MOUSE, Vec2::new(100.0, 100.0));
        tracker.moved(MOUSE, Vec2::new(150.0, 100.0));
        // Returning to the start does not turn a drag back into a click
        tracker.moved(MOUSE, Vec2::new(100.0, 100.0));
        assert_eq!(tracker.release(MOUSE, Some(Vec2::new(100.0, 100.0))), None);
    }

    #[test]
    fn test_release_far_away_is_not_click() {
        let mut tracker = ClickTracker::default();
        tracker.press(MOUSE, Vec2::ZERO);
        assert_eq!(tracker.release(MOUSE, Some(Vec2::new(0.0, 20.0))), None);
    }

    #[test]
    fn test_release_without_press() {
        let mut tracker = ClickTracker::default();
        assert_eq!(tracker.release(MOUSE, Some(Vec2::ZERO)), None);

        tracker.press(MOUSE, Vec2::ONE);
        tracker.cancel();
        assert_eq!(tracker.release(MOUSE, None), None);
    }

    #[test]
    fn test_release_resets_state() {
        let mut tracker = ClickTracker::default();
        tracker.press(MOUSE, Vec2::ZERO);
        tracker.moved(MOUSE, Vec2::new(50.0, 0.0));
        assert_eq!(tracker.release(MOUSE, None), None);

        tracker.press(MOUSE, Vec2::ZERO);
        assert_eq!(tracker.release(MOUSE, None), Some(Vec2::ZERO));
    }

    #[test]
    fn test_other_pointer_does_not_release() {
        let mut tracker = ClickTracker::default();
        tracker.press(PointerId::Touch(1), Vec2::ZERO);
        tracker.moved(PointerId::Touch(2), Vec2::new(80.0, 0.0));
        assert_eq!(tracker.release(PointerId::Touch(2), Some(Vec2::ZERO)), None);
        assert_eq!(tracker.release(PointerId::Touch(1), Some(Vec2::ZERO)), Some(Vec2::ZERO));
    }

    #[test]
    fn test_single_finger_tap() {
        let mut tracker = ClickTracker::default();
        let at = Vec2::new(40.0, 60.0);

        assert_eq!(tracker.touch_frame(&frame(&[(7, at)], &[(7, at)], &[]), false), None);
        assert_eq!(tracker.touch_frame(&frame(&[(7, at + Vec2::ONE)], &[], &[]), false), None);
        assert_eq!(tracker.touch_frame(&frame(&[], &[], &[(7, at + Vec2::ONE)]), false), Some(at));
    }

    #[test]
    fn test_single_finger_drag_is_not_tap() {
        let mut tracker = ClickTracker::default();
        tracker.touch_frame(&frame(&[(7, Vec2::ZERO)], &[(7, Vec2::ZERO)], &[]), false);
        tracker.touch_frame(&frame(&[(7, Vec2::new(30.0, 0.0))], &[], &[]), false);
        assert_eq!(tracker.touch_frame(&frame(&[], &[], &[(7, Vec2::ZERO)]), false), None);
    }

    #[test]
    fn test_pinch_with_anchored_finger_never_taps() {
        let mut tracker = ClickTracker::default();
        let thumb = Vec2::new(100.0, 100.0);
        let finger = Vec2::new(200.0, 200.0);

        // Thumb down alone
        tracker.touch_frame(&frame(&[(1, thumb)], &[(1, thumb)], &[]), false);
        // Second finger joins and spreads while the thumb stays put
        tracker.touch_frame(&frame(&[(1, thumb), (2, finger)], &[(2, finger)], &[]), false);
        tracker.touch_frame(&frame(&[(1, thumb), (2, finger * 1.5)], &[], &[]), false);
        // Thumb lifts first, then the finger
        assert_eq!(tracker.touch_frame(&frame(&[(2, finger * 1.5)], &[], &[(1, thumb)]), false), None);
        assert_eq!(tracker.touch_frame(&frame(&[], &[], &[(2, finger * 1.5)]), false), None);
    }

    #[test]
    fn test_pinch_order_does_not_matter() {
        let mut tracker = ClickTracker::default();
        let thumb = Vec2::new(100.0, 100.0);
        let finger = Vec2::new(200.0, 200.0);

        // Pressed list order differs from press order
        tracker.touch_frame(&frame(&[(1, thumb)], &[(1, thumb)], &[]), false);
        tracker.touch_frame(&frame(&[(2, finger), (1, thumb)], &[(2, finger)], &[]), false);
        assert_eq!(tracker.touch_frame(&frame(&[], &[], &[(2, finger), (1, thumb)]), false), None);
    }

    #[test]
    fn test_touch_over_ui_is_ignored() {
        let mut tracker = ClickTracker::default();
        tracker.touch_frame(&frame(&[(3, Vec2::ZERO)], &[(3, Vec2::ZERO)], &[]), true);
        assert_eq!(tracker.touch_frame(&frame(&[], &[], &[(3, Vec2::ZERO)]), false), None);
    }
}
