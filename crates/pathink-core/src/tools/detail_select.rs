//! Detail selection tool: selects and drags paths, segments, curves and
//! handles, preserving handle co-linearity and compound-path semantics.

use std::collections::HashMap;

use kurbo::Point;

use crate::hit::{self, HitKind};
use crate::input::ToolEvent;
use crate::path::{Item, ItemId};
use crate::selection;
use crate::snap::{snap_delta_to_angle, ANGLE_SNAP_INCREMENT};
use crate::tools::{Tool, ToolCtx};

/// Two pointer-downs closer together than this count as a double-click.
pub const DOUBLE_CLICK_MS: u64 = 250;

/// Side table of pre-drag positions, keyed by item identity. Owned by
/// the active gesture and cleared on pointer-up; geometry objects never
/// carry this state themselves.
#[derive(Debug, Default)]
struct DragOrigins {
    items: HashMap<ItemId, Point>,
    segments: HashMap<(ItemId, usize), Point>,
}

impl DragOrigins {
    /// Pre-drag position of an item, captured lazily on first touch.
    fn item_origin(&mut self, id: ItemId, current: Point) -> Point {
        *self.items.entry(id).or_insert(current)
    }

    /// Pre-drag anchor of a segment, captured lazily on first touch.
    fn segment_origin(&mut self, id: ItemId, index: usize, current: Point) -> Point {
        *self.segments.entry((id, index)).or_insert(current)
    }

    fn clear(&mut self) {
        self.items.clear();
        self.segments.clear();
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty() && self.segments.is_empty()
    }
}

/// Selection tool that allows modification of segments and handles.
#[derive(Debug, Default)]
pub struct DetailSelectTool {
    do_rect_selection: bool,
    hit_kind: Option<HitKind>,
    last_down_ms: Option<u64>,
    selection_dragged: bool,
    origins: DragOrigins,
}

impl DetailSelectTool {
    /// Create the tool in its idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the current gesture has moved the selection.
    pub fn selection_dragged(&self) -> bool {
        self.selection_dragged
    }

    /// Whether a marquee gesture is in progress.
    pub fn is_rect_selecting(&self) -> bool {
        self.do_rect_selection
    }

    /// Whether any pre-drag origins are still cached.
    pub fn has_drag_origins(&self) -> bool {
        !self.origins.is_empty()
    }

    fn on_fill_down(
        &mut self,
        ctx: &mut ToolCtx<'_>,
        item: ItemId,
        event: &ToolEvent,
        double_clicked: bool,
    ) {
        self.hit_kind = Some(HitKind::Fill);
        let modifiers = event.modifiers;

        if selection::is_item_selected(ctx.scene, item) {
            if modifiers.shift {
                selection::set_item_fully_selected(ctx.scene, item, false);
            }
            if double_clicked {
                set_plain_selected_flag(ctx, item, false);
                selection::set_item_fully_selected(ctx.scene, item, true);
            }
            if modifiers.option {
                selection::clone_selected_items(ctx.scene);
            }
        } else if modifiers.shift {
            selection::set_item_fully_selected(ctx.scene, item, true);
        } else {
            selection::deselect_all(ctx.scene);
            selection::set_item_fully_selected(ctx.scene, item, true);
            if modifiers.option {
                selection::clone_selected_items(ctx.scene);
            }
        }
    }

    fn on_segment_down(&mut self, ctx: &mut ToolCtx<'_>, item: ItemId, index: usize, event: &ToolEvent) {
        self.hit_kind = Some(HitKind::Segment);
        let modifiers = event.modifiers;

        let already_selected = ctx
            .scene
            .path(item)
            .and_then(|p| p.segments.get(index))
            .is_some_and(|s| s.selected);

        if already_selected {
            if let Some(path) = ctx.scene.path_mut(item) {
                // Selected points with no handles get handles back when
                // selected again.
                path.select_segment(index);
                if modifiers.shift {
                    path.segments[index].selected = false;
                }
            }
        } else {
            if !modifiers.shift {
                selection::deselect_all(ctx.scene);
            }
            if let Some(path) = ctx.scene.path_mut(item) {
                path.select_segment(index);
            }
        }

        if modifiers.option {
            selection::clone_selected_items(ctx.scene);
        }
    }

    fn on_curve_down(&mut self, ctx: &mut ToolCtx<'_>, item: ItemId, index: usize, event: &ToolEvent) {
        self.hit_kind = Some(HitKind::Curve);
        let modifiers = event.modifiers;

        let selected = ctx
            .scene
            .path(item)
            .is_some_and(|p| p.is_curve_selected(index));

        if modifiers.shift {
            if let Some(path) = ctx.scene.path_mut(item) {
                path.set_curve_selected(index, !selected);
            }
        } else if !selected {
            selection::deselect_all(ctx.scene);
            if let Some(path) = ctx.scene.path_mut(item) {
                path.set_curve_selected(index, true);
            }
        }

        if modifiers.option {
            selection::clone_selected_items(ctx.scene);
        }
    }

    fn on_handle_down(
        &mut self,
        ctx: &mut ToolCtx<'_>,
        kind: HitKind,
        item: ItemId,
        index: usize,
        event: &ToolEvent,
    ) {
        self.hit_kind = Some(kind);
        if !event.modifiers.shift {
            selection::deselect_all(ctx.scene);
        }
        // Both handles of the hit segment become visible together.
        if let Some(path) = ctx.scene.path_mut(item) {
            path.select_handles(index);
        }
    }

    fn drag_selection(&mut self, ctx: &mut ToolCtx<'_>, event: &ToolEvent) {
        let modifiers = event.modifiers;
        let drag_vector = event.drag_vector();

        for id in selection::selected_paths(ctx.scene) {
            let whole_item = self.hit_kind == Some(HitKind::Fill)
                || !matches!(ctx.scene.get(id), Some(Item::Path(_)));

            if whole_item {
                // Children of a selected compound ride along with the
                // container; moving them too would displace them twice.
                if ctx.scene.has_compound_parent(id) {
                    continue;
                }
                let Some(current) = ctx.scene.position_of(id) else {
                    continue;
                };
                let origin = self.origins.item_origin(id, current);
                if modifiers.shift {
                    let snapped = snap_delta_to_angle(drag_vector, ANGLE_SNAP_INCREMENT);
                    ctx.scene.set_item_position(id, origin + snapped);
                } else {
                    ctx.scene.translate_item(id, event.delta);
                }
                continue;
            }

            let Some(path) = ctx.scene.path_mut(id) else {
                continue;
            };
            for (i, seg) in path.segments.iter_mut().enumerate() {
                let origin = self.origins.segment_origin(id, i, seg.point);
                match self.hit_kind {
                    Some(HitKind::Segment | HitKind::Stroke | HitKind::Curve) if seg.selected => {
                        if modifiers.shift {
                            seg.point = origin + snap_delta_to_angle(drag_vector, ANGLE_SNAP_INCREMENT);
                        } else {
                            seg.point += event.delta;
                        }
                    }
                    Some(HitKind::HandleOut) if seg.handle_out.selected => {
                        // Option, or handles already split: they move
                        // independently. Otherwise keep them mirrored.
                        if modifiers.option || !seg.handles_colinear() {
                            seg.handle_out.vector += event.delta;
                        } else {
                            seg.handle_in.vector -= event.delta;
                            seg.handle_out.vector += event.delta;
                        }
                    }
                    Some(HitKind::HandleIn) if seg.handle_in.selected => {
                        if modifiers.option || !seg.handles_colinear() {
                            seg.handle_in.vector += event.delta;
                        } else {
                            seg.handle_in.vector += event.delta;
                            seg.handle_out.vector -= event.delta;
                        }
                    }
                    _ => {}
                }
            }
        }
    }
}

/// Clear or set just the plain selection flag, without touching segment
/// or child state.
fn set_plain_selected_flag(ctx: &mut ToolCtx<'_>, item: ItemId, selected: bool) {
    match ctx.scene.get_mut(item) {
        Some(Item::Path(p)) => p.selected = selected,
        Some(Item::Compound(c)) => c.selected = selected,
        None => {}
    }
}

impl Tool for DetailSelectTool {
    fn on_pointer_down(&mut self, ctx: &mut ToolCtx<'_>, event: &ToolEvent) {
        self.selection_dragged = false;
        self.hit_kind = None;

        let double_clicked = self
            .last_down_ms
            .is_some_and(|last| event.timestamp_ms.saturating_sub(last) < DOUBLE_CLICK_MS);
        if double_clicked && !event.modifiers.shift {
            selection::deselect_all(ctx.scene);
        }
        self.last_down_ms = Some(event.timestamp_ms);

        ctx.guides.hide_hover_path();

        let Some(hit) = hit::hit_test(ctx.scene, event.point, &ctx.hit_options()) else {
            // Empty spot: a normal outcome, the drag becomes a marquee.
            if !event.modifiers.shift {
                selection::deselect_all(ctx.scene);
            }
            self.do_rect_selection = true;
            return;
        };
        log::trace!("pointer down hit {:?} on {}", hit.kind, hit.item);

        if hit.kind == HitKind::Fill || double_clicked {
            self.on_fill_down(ctx, hit.item, event, double_clicked);
            return;
        }
        match hit.kind {
            HitKind::Segment => {
                if let Some(index) = hit.segment {
                    self.on_segment_down(ctx, hit.item, index, event);
                }
            }
            HitKind::Stroke | HitKind::Curve => {
                if let Some(index) = hit.curve {
                    self.on_curve_down(ctx, hit.item, index, event);
                }
            }
            HitKind::HandleIn | HitKind::HandleOut => {
                if let Some(index) = hit.segment {
                    self.on_handle_down(ctx, hit.kind, hit.item, index, event);
                }
            }
            HitKind::Fill => {}
        }
    }

    fn on_pointer_drag(&mut self, ctx: &mut ToolCtx<'_>, event: &ToolEvent) {
        if self.do_rect_selection {
            let sel_box = ctx.guides.show_selection_box(event.down_point, event.point);
            sel_box.remove_on_drag = true;
            sel_box.remove_on_up = true;
            return;
        }
        self.selection_dragged = true;
        self.drag_selection(ctx, event);
    }

    fn on_pointer_move(&mut self, ctx: &mut ToolCtx<'_>, event: &ToolEvent) {
        ctx.guides.hide_hover_path();
        let Some(hit) = hit::hit_test(ctx.scene, event.point, &ctx.hit_options()) else {
            return;
        };
        let Some(item) = ctx.scene.get(hit.item) else {
            return;
        };
        if !item.is_selected() && matches!(item, Item::Path(_)) {
            ctx.guides.show_hover_path(hit.item);
        }
    }

    fn on_pointer_up(&mut self, ctx: &mut ToolCtx<'_>, event: &ToolEvent) {
        if self.do_rect_selection {
            if let Some(sel_box) = ctx.guides.take_selection_box() {
                log::debug!("marquee selection over {:?}", sel_box.rect());
                selection::process_rectangular_selection(ctx.scene, sel_box.rect(), event.modifiers);
            }
        } else {
            self.selection_dragged = false;
            // Drag origins are single-gesture state; a stale origin
            // would corrupt the next gesture's snap calculations.
            self.origins.clear();
        }
        self.do_rect_selection = false;
    }
}
