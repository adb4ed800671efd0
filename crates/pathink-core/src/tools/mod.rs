//! Tool system: pointer-event dispatch into editing tools.

mod detail_select;

pub use detail_select::{DetailSelectTool, DOUBLE_CLICK_MS};

use crate::camera::Camera;
use crate::guides::GuideLayer;
use crate::hit::HitOptions;
use crate::input::ToolEvent;
use crate::scene::Scene;

/// Hit tolerance in screen pixels; divided by the camera zoom so the
/// pick radius stays constant on screen.
pub const HIT_TOLERANCE: f64 = 3.0;

/// Everything a tool handler may touch: the scene graph, the camera and
/// the guide overlay. Handlers run to completion on the host event loop;
/// exclusive borrows rule out re-entrancy by construction.
pub struct ToolCtx<'a> {
    pub scene: &'a mut Scene,
    pub camera: &'a Camera,
    pub guides: &'a mut GuideLayer,
}

impl ToolCtx<'_> {
    /// Hit options for the current zoom, with every geometry kind
    /// participating.
    pub fn hit_options(&self) -> HitOptions {
        HitOptions::all(self.camera.world_tolerance(HIT_TOLERANCE))
    }
}

/// A pointer-driven editing tool.
///
/// Tools are plain structs holding their own gesture state; capabilities
/// are composed through this trait rather than inheritance chains.
pub trait Tool {
    /// Pointer button pressed.
    fn on_pointer_down(&mut self, ctx: &mut ToolCtx<'_>, event: &ToolEvent);

    /// Pointer moved with the button held.
    fn on_pointer_drag(&mut self, ctx: &mut ToolCtx<'_>, event: &ToolEvent);

    /// Pointer moved with no button held.
    fn on_pointer_move(&mut self, ctx: &mut ToolCtx<'_>, event: &ToolEvent);

    /// Pointer button released.
    fn on_pointer_up(&mut self, ctx: &mut ToolCtx<'_>, event: &ToolEvent);
}
