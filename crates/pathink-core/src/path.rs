//! Path, segment and handle definitions for the scene graph.

use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a scene item.
pub type ItemId = Uuid;

/// Cross-product tolerance for treating two handles as co-linear.
const COLINEAR_EPSILON: f64 = 1e-6;

/// A tangent handle, stored as a vector offset from its segment's anchor.
///
/// Two handles on one segment are co-linear when they point in exactly
/// opposite directions, which produces a smooth (non-corner) curve join.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Handle {
    /// Offset from the owning segment's anchor point.
    pub vector: Vec2,
    /// Whether this handle is individually selected.
    #[serde(default)]
    pub selected: bool,
}

impl Handle {
    /// Create a handle from an offset vector.
    pub fn new(vector: Vec2) -> Self {
        Self {
            vector,
            selected: false,
        }
    }

    /// A zero-length handle (straight join).
    pub fn zero() -> Self {
        Self::new(Vec2::ZERO)
    }

    /// Check if the handle has no extent.
    pub fn is_zero(&self) -> bool {
        self.vector.x == 0.0 && self.vector.y == 0.0
    }

    /// Check if this handle is co-linear with another: both non-zero,
    /// parallel, and pointing in opposite directions.
    pub fn is_colinear(&self, other: &Handle) -> bool {
        if self.is_zero() || other.is_zero() {
            return false;
        }
        let cross = self.vector.x * other.vector.y - self.vector.y * other.vector.x;
        cross.abs() < COLINEAR_EPSILON && self.vector.dot(other.vector) < 0.0
    }
}

/// An anchor point on a path with its two tangent handles.
///
/// The segment's selection flag and its handles' flags are independent:
/// a segment can be selected without its handles and vice versa.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    /// Anchor point in world coordinates.
    pub point: Point,
    /// Handle controlling the incoming curve.
    pub handle_in: Handle,
    /// Handle controlling the outgoing curve.
    pub handle_out: Handle,
    /// Whether this segment's anchor is selected.
    #[serde(default)]
    pub selected: bool,
}

impl Segment {
    /// Create a corner segment with zero-length handles.
    pub fn new(point: Point) -> Self {
        Self {
            point,
            handle_in: Handle::zero(),
            handle_out: Handle::zero(),
            selected: false,
        }
    }

    /// Create a segment with explicit handle offsets.
    pub fn with_handles(point: Point, handle_in: Vec2, handle_out: Vec2) -> Self {
        Self {
            point,
            handle_in: Handle::new(handle_in),
            handle_out: Handle::new(handle_out),
            selected: false,
        }
    }

    /// Create a smooth segment whose handles mirror each other.
    pub fn smooth(point: Point, handle_out: Vec2) -> Self {
        Self::with_handles(point, -handle_out, handle_out)
    }

    /// World position of the incoming handle's endpoint.
    pub fn handle_in_point(&self) -> Point {
        self.point + self.handle_in.vector
    }

    /// World position of the outgoing handle's endpoint.
    pub fn handle_out_point(&self) -> Point {
        self.point + self.handle_out.vector
    }

    /// Check if the two handles of this segment mirror each other.
    pub fn handles_colinear(&self) -> bool {
        self.handle_out.is_colinear(&self.handle_in)
    }

    /// Clear the segment's and both handles' selection flags.
    pub fn deselect(&mut self) {
        self.selected = false;
        self.handle_in.selected = false;
        self.handle_out.selected = false;
    }
}

/// An editable vector path: an ordered sequence of segments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Path {
    pub(crate) id: ItemId,
    /// Ordered anchor segments.
    pub segments: Vec<Segment>,
    /// Whether the last segment connects back to the first.
    pub closed: bool,
    /// Plain outline-only selection flag.
    pub selected: bool,
    /// Full selection: segments and handles are shown for editing.
    pub(crate) fully_selected: bool,
    /// Owning compound path, if this path is a child of one.
    pub(crate) parent: Option<ItemId>,
}

impl Path {
    /// Create a path from segments.
    pub fn new(segments: Vec<Segment>, closed: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            segments,
            closed,
            selected: false,
            fully_selected: false,
            parent: None,
        }
    }

    /// Create a closed rectangular path (corner segments only).
    pub fn rectangle(rect: Rect) -> Self {
        Self::new(
            vec![
                Segment::new(Point::new(rect.x0, rect.y0)),
                Segment::new(Point::new(rect.x1, rect.y0)),
                Segment::new(Point::new(rect.x1, rect.y1)),
                Segment::new(Point::new(rect.x0, rect.y1)),
            ],
            true,
        )
    }

    /// Get the path's id.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// The compound path owning this path, if any.
    pub fn parent(&self) -> Option<ItemId> {
        self.parent
    }

    /// Whether this path participates in the current selection
    /// (either plain-selected or fully selected).
    pub fn is_selected(&self) -> bool {
        self.selected || self.fully_selected
    }

    /// Whether segments and handles are shown for editing.
    pub fn is_fully_selected(&self) -> bool {
        self.fully_selected
    }

    /// Turn full selection on or off.
    ///
    /// Turning it on selects every segment and handle. Turning it off
    /// deselects segments and handles but leaves the plain `selected`
    /// flag untouched.
    pub fn set_fully_selected(&mut self, fully: bool) {
        self.fully_selected = fully;
        for seg in &mut self.segments {
            seg.selected = fully;
            seg.handle_in.selected = fully;
            seg.handle_out.selected = fully;
        }
    }

    /// Clear every selection flag on the path, its segments and handles.
    pub fn deselect(&mut self) {
        self.selected = false;
        self.fully_selected = false;
        for seg in &mut self.segments {
            seg.deselect();
        }
    }

    /// Select a segment's anchor. Also marks the path itself selected so
    /// the segment's handles become visible again.
    pub fn select_segment(&mut self, index: usize) {
        if let Some(seg) = self.segments.get_mut(index) {
            seg.selected = true;
            self.selected = true;
        }
    }

    /// Select both handles of a segment (they become visible together).
    pub fn select_handles(&mut self, index: usize) {
        if let Some(seg) = self.segments.get_mut(index) {
            seg.handle_in.selected = true;
            seg.handle_out.selected = true;
            self.selected = true;
        }
    }

    /// Number of curves on this path.
    pub fn curve_count(&self) -> usize {
        match self.segments.len() {
            0 | 1 => 0,
            n if self.closed => n,
            n => n - 1,
        }
    }

    /// Segment indices at the two ends of curve `index`.
    pub fn curve_segments(&self, index: usize) -> Option<(usize, usize)> {
        if index >= self.curve_count() {
            return None;
        }
        Some((index, (index + 1) % self.segments.len()))
    }

    /// Whether both end segments of curve `index` are selected.
    pub fn is_curve_selected(&self, index: usize) -> bool {
        self.curve_segments(index)
            .map(|(a, b)| self.segments[a].selected && self.segments[b].selected)
            .unwrap_or(false)
    }

    /// Select or deselect a curve by (de)selecting both its end segments.
    pub fn set_curve_selected(&mut self, index: usize, selected: bool) {
        if let Some((a, b)) = self.curve_segments(index) {
            self.segments[a].selected = selected;
            self.segments[b].selected = selected;
            if selected {
                self.selected = true;
            }
        }
    }

    /// Bounding box over anchor points and handle endpoints.
    ///
    /// This is the control-polygon bound, which always contains the true
    /// curve and is stable under translation.
    pub fn bounds(&self) -> Rect {
        let mut bounds: Option<Rect> = None;
        for seg in &self.segments {
            for p in [seg.point, seg.handle_in_point(), seg.handle_out_point()] {
                let r = Rect::from_points(p, p);
                bounds = Some(match bounds {
                    Some(b) => b.union(r),
                    None => r,
                });
            }
        }
        bounds.unwrap_or(Rect::ZERO)
    }

    /// Center of the path's bounds (the item's position).
    pub fn position(&self) -> Point {
        self.bounds().center()
    }

    /// Move every anchor by `delta`. Handles are relative offsets and
    /// therefore unaffected.
    pub fn translate(&mut self, delta: Vec2) {
        for seg in &mut self.segments {
            seg.point += delta;
        }
    }

    /// Build the cubic Bezier outline for hit testing.
    pub fn to_bez(&self) -> BezPath {
        let mut bez = BezPath::new();
        if self.segments.is_empty() {
            return bez;
        }
        bez.move_to(self.segments[0].point);
        for i in 0..self.curve_count() {
            let Some((a, b)) = self.curve_segments(i) else {
                break;
            };
            let from = &self.segments[a];
            let to = &self.segments[b];
            bez.curve_to(from.handle_out_point(), to.handle_in_point(), to.point);
        }
        if self.closed {
            bez.close_path();
        }
        bez
    }
}

/// A container path whose children are combined with even-odd winding.
///
/// When the container itself is the selection target its children must
/// not be moved individually, or they would be displaced twice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundPath {
    pub(crate) id: ItemId,
    /// Child path ids, in draw order.
    pub children: Vec<ItemId>,
    /// Plain outline-only selection flag.
    pub selected: bool,
    /// Full selection flag; cascades to children via the scene.
    pub(crate) fully_selected: bool,
}

impl CompoundPath {
    /// Create an empty compound path. Children are attached by the scene.
    pub(crate) fn new(children: Vec<ItemId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            children,
            selected: false,
            fully_selected: false,
        }
    }

    /// Get the compound path's id.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Whether this item participates in the current selection.
    pub fn is_selected(&self) -> bool {
        self.selected || self.fully_selected
    }

    /// Whether the container is fully selected.
    pub fn is_fully_selected(&self) -> bool {
        self.fully_selected
    }
}

/// A top-level scene item: either a plain path or a compound container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Item {
    Path(Path),
    Compound(CompoundPath),
}

impl Item {
    /// Get the item's id.
    pub fn id(&self) -> ItemId {
        match self {
            Item::Path(p) => p.id,
            Item::Compound(c) => c.id,
        }
    }

    /// Whether this item participates in the current selection.
    pub fn is_selected(&self) -> bool {
        match self {
            Item::Path(p) => p.is_selected(),
            Item::Compound(c) => c.is_selected(),
        }
    }

    /// The path variant, if this item is a plain path.
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Item::Path(p) => Some(p),
            Item::Compound(_) => None,
        }
    }

    /// Mutable access to the path variant.
    pub fn as_path_mut(&mut self) -> Option<&mut Path> {
        match self {
            Item::Path(p) => Some(p),
            Item::Compound(_) => None,
        }
    }

    /// The owning compound path, for child paths.
    pub fn parent(&self) -> Option<ItemId> {
        match self {
            Item::Path(p) => p.parent,
            Item::Compound(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colinear_handles() {
        let seg = Segment::smooth(Point::new(10.0, 10.0), Vec2::new(5.0, 0.0));
        assert!(seg.handles_colinear());

        let corner = Segment::with_handles(
            Point::new(0.0, 0.0),
            Vec2::new(-5.0, 0.0),
            Vec2::new(0.0, 5.0),
        );
        assert!(!corner.handles_colinear());

        // Parallel but same direction is not a smooth join.
        let folded = Segment::with_handles(
            Point::new(0.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::new(10.0, 0.0),
        );
        assert!(!folded.handles_colinear());

        // Zero handles never count as co-linear.
        let flat = Segment::new(Point::new(0.0, 0.0));
        assert!(!flat.handles_colinear());
    }

    #[test]
    fn test_fully_selected_cascades_to_segments() {
        let mut path = Path::rectangle(Rect::new(0.0, 0.0, 100.0, 100.0));
        path.set_fully_selected(true);

        assert!(path.is_fully_selected());
        assert!(path.segments.iter().all(|s| s.selected));
        assert!(path.segments.iter().all(|s| s.handle_in.selected));

        // Clearing full selection leaves the plain flag alone.
        path.selected = true;
        path.set_fully_selected(false);
        assert!(!path.is_fully_selected());
        assert!(path.selected);
        assert!(path.segments.iter().all(|s| !s.selected));
    }

    #[test]
    fn test_select_segment_redisplays_path() {
        let mut path = Path::rectangle(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(!path.is_selected());

        path.select_segment(2);
        assert!(path.segments[2].selected);
        assert!(path.is_selected());
    }

    #[test]
    fn test_curve_selection_spans_both_segments() {
        let mut path = Path::rectangle(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(path.curve_count(), 4);

        path.set_curve_selected(3, true);
        // Curve 3 on a closed 4-segment path wraps to segment 0.
        assert!(path.segments[3].selected);
        assert!(path.segments[0].selected);
        assert!(path.is_curve_selected(3));

        path.set_curve_selected(3, false);
        assert!(!path.is_curve_selected(3));
    }

    #[test]
    fn test_translate_moves_anchors_only() {
        let mut path = Path::new(
            vec![Segment::smooth(Point::new(0.0, 0.0), Vec2::new(5.0, 0.0))],
            false,
        );
        path.translate(Vec2::new(10.0, 20.0));

        assert_eq!(path.segments[0].point, Point::new(10.0, 20.0));
        assert_eq!(path.segments[0].handle_out.vector, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_bounds_include_handles() {
        let path = Path::new(
            vec![
                Segment::with_handles(Point::new(0.0, 0.0), Vec2::ZERO, Vec2::new(0.0, -30.0)),
                Segment::new(Point::new(100.0, 0.0)),
            ],
            false,
        );
        let bounds = path.bounds();
        assert_eq!(bounds.y0, -30.0);
        assert_eq!(bounds.x1, 100.0);
    }
}
