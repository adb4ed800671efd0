//! PathInk Core Library
//!
//! Platform-agnostic scene graph and editing tools for the PathInk
//! vector editor.

pub mod camera;
pub mod guides;
pub mod hit;
pub mod input;
pub mod path;
pub mod scene;
pub mod selection;
pub mod snap;
pub mod tools;

pub use camera::Camera;
pub use guides::{GuideLayer, SelectionBox};
pub use hit::{hit_test, HitKind, HitOptions, HitResult};
pub use input::{Modifiers, ToolEvent};
pub use path::{CompoundPath, Handle, Item, ItemId, Path, Segment};
pub use scene::{Scene, SceneError};
pub use snap::{snap_angle, snap_delta_to_angle, ANGLE_SNAP_INCREMENT};
pub use tools::{DetailSelectTool, Tool, ToolCtx, DOUBLE_CLICK_MS, HIT_TOLERANCE};
