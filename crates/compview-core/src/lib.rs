//! Compview Core - Engine-independent logic for the component viewer
//!
//! This crate provides the pieces of the viewer that do not depend on the
//! rendering engine:
//! - Name normalization that groups repeated mesh nodes into components
//! - Nearest-vertex distance estimation against the camera position
//! - The component registry built once after a model loads
//! - Visibility toggling and the zoom-limit coordinator
//! - The single-selection state machine and the description table
//! - Viewer configuration loading
//!
//! Scene access goes through the [`SceneGraph`] trait so the same logic runs
//! against the Bevy ECS in the browser, a glTF document in the inspect CLI,
//! and the in-memory [`MemoryScene`] in tests.

pub mod config;
pub mod descriptions;
pub mod distance;
pub mod naming;
pub mod registry;
pub mod scene;
pub mod selection;
pub mod visibility;
pub mod zoom;

pub use glam;

pub use config::{ConfigError, ViewerConfig};
pub use descriptions::{DescriptionEntry, DescriptionTable};
pub use distance::{nearest_vertex_distance, UNDEFINED_DISTANCE};
pub use naming::normalize_name;
pub use registry::{Component, ComponentRegistry};
pub use scene::{MemoryNode, MemoryScene, NodeIndex, SceneGraph};
pub use selection::{nearest_visible_hit, Selection, SelectionController};
pub use visibility::{set_all_visibility, set_component_visibility};
pub use zoom::{min_distance_for, ZoomBounds, ZoomSettings};
