//! Hit testing against scene geometry.

use crate::path::{Item, ItemId, Path};
use crate::scene::Scene;
use kurbo::{CubicBez, ParamCurveNearest, Point, Shape};

/// Accuracy for nearest-point queries on curves, in world units.
const NEAREST_ACCURACY: f64 = 1e-4;

/// Classification of what the pointer intersects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitKind {
    Fill,
    Stroke,
    Curve,
    Segment,
    HandleIn,
    HandleOut,
}

/// Which geometry kinds participate in a hit test, and the tolerance
/// in world units.
#[derive(Debug, Clone, Copy)]
pub struct HitOptions {
    pub fill: bool,
    pub stroke: bool,
    pub curves: bool,
    pub segments: bool,
    pub handles: bool,
    pub tolerance: f64,
}

impl HitOptions {
    /// Test against every geometry kind.
    pub fn all(tolerance: f64) -> Self {
        Self {
            fill: true,
            stroke: true,
            curves: true,
            segments: true,
            handles: true,
            tolerance,
        }
    }
}

/// The topmost geometry feature under a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResult {
    /// Kind of feature hit.
    pub kind: HitKind,
    /// The item that was hit. Fill hits on a compound child report the
    /// compound container, since that is the selection target.
    pub item: ItemId,
    /// Segment index for segment and handle hits.
    pub segment: Option<usize>,
    /// Curve index for stroke/curve hits.
    pub curve: Option<usize>,
}

/// Hit test the scene at `point`, walking items front to back.
///
/// Per item, anchors win over handles, handles over the stroke/curve
/// outline, and the outline over the fill. Returning `None` is a normal
/// outcome (empty canvas spot), never an error.
pub fn hit_test(scene: &Scene, point: Point, options: &HitOptions) -> Option<HitResult> {
    for id in scene.z_order.iter().rev() {
        let Some(Item::Path(path)) = scene.get(*id) else {
            continue;
        };
        if let Some(hit) = hit_test_path(scene, path, point, options) {
            return Some(hit);
        }
    }
    None
}

fn hit_test_path(
    scene: &Scene,
    path: &Path,
    point: Point,
    options: &HitOptions,
) -> Option<HitResult> {
    let tol_sq = options.tolerance * options.tolerance;

    if options.segments {
        for (i, seg) in path.segments.iter().enumerate() {
            if dist_sq(seg.point, point) <= tol_sq {
                return Some(HitResult {
                    kind: HitKind::Segment,
                    item: path.id(),
                    segment: Some(i),
                    curve: None,
                });
            }
        }
    }

    if options.handles {
        for (i, seg) in path.segments.iter().enumerate() {
            if !seg.handle_in.is_zero() && dist_sq(seg.handle_in_point(), point) <= tol_sq {
                return Some(HitResult {
                    kind: HitKind::HandleIn,
                    item: path.id(),
                    segment: Some(i),
                    curve: None,
                });
            }
            if !seg.handle_out.is_zero() && dist_sq(seg.handle_out_point(), point) <= tol_sq {
                return Some(HitResult {
                    kind: HitKind::HandleOut,
                    item: path.id(),
                    segment: Some(i),
                    curve: None,
                });
            }
        }
    }

    if options.curves || options.stroke {
        if let Some(i) = nearest_curve(path, point, options.tolerance) {
            return Some(HitResult {
                kind: if options.curves {
                    HitKind::Curve
                } else {
                    HitKind::Stroke
                },
                item: path.id(),
                segment: None,
                curve: Some(i),
            });
        }
    }

    if options.fill && path.closed && fill_contains(scene, path, point) {
        // The compound container owns fill hits on its children.
        let item = path.parent().unwrap_or(path.id());
        return Some(HitResult {
            kind: HitKind::Fill,
            item,
            segment: None,
            curve: None,
        });
    }

    None
}

fn dist_sq(a: Point, b: Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Index of the first curve whose outline passes within `tolerance`.
fn nearest_curve(path: &Path, point: Point, tolerance: f64) -> Option<usize> {
    let tol_sq = tolerance * tolerance;
    for i in 0..path.curve_count() {
        let (a, b) = path.curve_segments(i)?;
        let from = &path.segments[a];
        let to = &path.segments[b];
        let bez = CubicBez::new(
            from.point,
            from.handle_out_point(),
            to.handle_in_point(),
            to.point,
        );
        if bez.nearest(point, NEAREST_ACCURACY).distance_sq <= tol_sq {
            return Some(i);
        }
    }
    None
}

/// Fill containment. Plain paths use non-zero winding; compound children
/// combine the whole container with even-odd winding so holes stay empty.
fn fill_contains(scene: &Scene, path: &Path, point: Point) -> bool {
    match path.parent().and_then(|pid| scene.get(pid)) {
        Some(Item::Compound(compound)) => {
            let mut winding = 0;
            for &child in &compound.children {
                if let Some(p) = scene.path(child) {
                    winding += p.to_bez().winding(point);
                }
            }
            winding % 2 != 0
        }
        _ => path.to_bez().winding(point) != 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Segment;
    use kurbo::{Rect, Vec2};

    fn scene_with_square() -> (Scene, ItemId) {
        let mut scene = Scene::new();
        let id = scene.add_path(Path::rectangle(Rect::new(0.0, 0.0, 100.0, 100.0)));
        (scene, id)
    }

    #[test]
    fn test_segment_beats_fill() {
        let (scene, id) = scene_with_square();
        let hit = hit_test(&scene, Point::new(1.0, 1.0), &HitOptions::all(3.0)).unwrap();
        assert_eq!(hit.kind, HitKind::Segment);
        assert_eq!(hit.item, id);
        assert_eq!(hit.segment, Some(0));
    }

    #[test]
    fn test_fill_inside() {
        let (scene, id) = scene_with_square();
        let hit = hit_test(&scene, Point::new(50.0, 50.0), &HitOptions::all(3.0)).unwrap();
        assert_eq!(hit.kind, HitKind::Fill);
        assert_eq!(hit.item, id);
    }

    #[test]
    fn test_curve_on_edge() {
        let (scene, _) = scene_with_square();
        let hit = hit_test(&scene, Point::new(50.0, 1.0), &HitOptions::all(3.0)).unwrap();
        assert_eq!(hit.kind, HitKind::Curve);
        assert_eq!(hit.curve, Some(0));
    }

    #[test]
    fn test_handle_hit() {
        let mut scene = Scene::new();
        let path = Path::new(
            vec![
                Segment::smooth(Point::new(0.0, 0.0), Vec2::new(20.0, 0.0)),
                Segment::new(Point::new(100.0, 100.0)),
            ],
            false,
        );
        let id = scene.add_path(path);

        let hit = hit_test(&scene, Point::new(20.0, 0.5), &HitOptions::all(3.0)).unwrap();
        assert_eq!(hit.kind, HitKind::HandleOut);
        assert_eq!(hit.item, id);
        assert_eq!(hit.segment, Some(0));

        let hit = hit_test(&scene, Point::new(-20.0, 0.0), &HitOptions::all(3.0)).unwrap();
        assert_eq!(hit.kind, HitKind::HandleIn);
    }

    #[test]
    fn test_miss_is_none() {
        let (scene, _) = scene_with_square();
        assert!(hit_test(&scene, Point::new(500.0, 500.0), &HitOptions::all(3.0)).is_none());
    }

    #[test]
    fn test_topmost_item_wins() {
        let mut scene = Scene::new();
        let _back = scene.add_path(Path::rectangle(Rect::new(0.0, 0.0, 100.0, 100.0)));
        let front = scene.add_path(Path::rectangle(Rect::new(25.0, 25.0, 75.0, 75.0)));

        let hit = hit_test(&scene, Point::new(50.0, 50.0), &HitOptions::all(3.0)).unwrap();
        assert_eq!(hit.item, front);
    }

    #[test]
    fn test_compound_fill_promotes_to_container_and_holes_stay_empty() {
        let mut scene = Scene::new();
        let compound = scene.add_compound(vec![
            Path::rectangle(Rect::new(0.0, 0.0, 100.0, 100.0)),
            Path::rectangle(Rect::new(25.0, 25.0, 75.0, 75.0)),
        ]);

        // Inside the outer ring but outside the hole.
        let hit = hit_test(&scene, Point::new(10.0, 50.0), &HitOptions::all(3.0)).unwrap();
        assert_eq!(hit.kind, HitKind::Fill);
        assert_eq!(hit.item, compound);

        // The hole is covered by both children: even-odd leaves it empty.
        assert!(hit_test(&scene, Point::new(50.0, 50.0), &HitOptions::all(3.0)).is_none());
    }

    #[test]
    fn test_disabled_kinds_skipped() {
        let (scene, _) = scene_with_square();
        let mut options = HitOptions::all(3.0);
        options.segments = false;
        options.curves = false;
        options.stroke = false;

        let hit = hit_test(&scene, Point::new(1.0, 1.0), &options).unwrap();
        assert_eq!(hit.kind, HitKind::Fill);
    }
}
