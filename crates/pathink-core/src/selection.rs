//! Selection registry: scene-wide selection queries and mutations.

use crate::input::Modifiers;
use crate::path::{CompoundPath, Item, ItemId};
use crate::scene::Scene;
use kurbo::Rect;

/// Clear selection state on every item, segment and handle. Idempotent.
pub fn deselect_all(scene: &mut Scene) {
    for item in scene.items.values_mut() {
        match item {
            Item::Path(p) => p.deselect(),
            Item::Compound(c) => {
                c.selected = false;
                c.fully_selected = false;
            }
        }
    }
}

/// All currently selected items in z-order (back to front). The order is
/// stable across calls absent scene mutation.
pub fn selected_paths(scene: &Scene) -> Vec<ItemId> {
    scene
        .items_ordered()
        .filter(|item| item.is_selected())
        .map(Item::id)
        .collect()
}

/// Set an item's plain selection flag. Deselecting also clears segment
/// and handle flags.
pub fn set_item_selected(scene: &mut Scene, id: ItemId, selected: bool) {
    let children = match scene.get_mut(id) {
        Some(Item::Path(p)) => {
            if selected {
                p.selected = true;
            } else {
                p.deselect();
            }
            return;
        }
        Some(Item::Compound(c)) => {
            c.selected = selected;
            if selected {
                return;
            }
            c.fully_selected = false;
            c.children.clone()
        }
        None => return,
    };
    for child in children {
        if let Some(p) = scene.path_mut(child) {
            p.deselect();
        }
    }
}

/// Set an item's full selection (segments and handles shown). On a
/// compound path this cascades to every child.
pub fn set_item_fully_selected(scene: &mut Scene, id: ItemId, fully: bool) {
    let children = match scene.get_mut(id) {
        Some(Item::Path(p)) => {
            p.set_fully_selected(fully);
            return;
        }
        Some(Item::Compound(c)) => {
            c.fully_selected = fully;
            c.children.clone()
        }
        None => return,
    };
    for child in children {
        if let Some(p) = scene.path_mut(child) {
            p.set_fully_selected(fully);
        }
    }
}

/// Whether the item participates in the current selection.
pub fn is_item_selected(scene: &Scene, id: ItemId) -> bool {
    scene.get(id).is_some_and(Item::is_selected)
}

/// Duplicate every selected item in place. Clones become the new
/// selection; the originals are deselected.
pub fn clone_selected_items(scene: &mut Scene) {
    let targets: Vec<ItemId> = selected_paths(scene)
        .into_iter()
        .filter(|&id| {
            // Children ride along with a selected compound parent.
            match scene.get(id).and_then(Item::parent) {
                Some(parent) => !is_item_selected(scene, parent),
                None => true,
            }
        })
        .collect();

    for id in targets {
        match scene.get(id).cloned() {
            Some(Item::Path(path)) => {
                let mut clone = Scene::clone_path(&path);
                // A child cloned without its container becomes top-level.
                clone.parent = None;
                scene.insert_after(id, Item::Path(clone));
                set_item_selected(scene, id, false);
            }
            Some(Item::Compound(compound)) => {
                let mut clone = CompoundPath::new(Vec::new());
                clone.selected = compound.selected;
                clone.fully_selected = compound.fully_selected;
                let clone_id = clone.id();

                let mut anchor = id;
                let mut child_clones = Vec::with_capacity(compound.children.len());
                for &child in &compound.children {
                    let cloned = scene.path(child).map(Scene::clone_path);
                    if let Some(mut child_clone) = cloned {
                        child_clone.parent = Some(clone_id);
                        anchor = scene.insert_after(anchor, Item::Path(child_clone));
                        child_clones.push(anchor);
                    }
                }
                clone.children = child_clones;
                scene.insert_after(anchor, Item::Compound(clone));
                set_item_selected(scene, id, false);
            }
            None => {}
        }
    }
}

/// Select all top-level items whose bounds intersect the marquee
/// rectangle. Shift is additive; otherwise the selection is replaced.
pub fn process_rectangular_selection(scene: &mut Scene, rect: Rect, modifiers: Modifiers) {
    if !modifiers.shift {
        deselect_all(scene);
    }
    let hits: Vec<ItemId> = scene
        .items_ordered()
        .filter(|item| item.parent().is_none())
        .map(Item::id)
        .filter(|&id| {
            // Inclusive overlap: a straight line path has zero-area
            // bounds but must still be selectable.
            scene.bounds_of(id).is_some_and(|b| rect.overlaps(b))
        })
        .collect();
    for id in hits {
        set_item_selected(scene, id, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{Path, Segment};
    use kurbo::Point;

    fn square(x: f64, y: f64, size: f64) -> Path {
        Path::rectangle(Rect::new(x, y, x + size, y + size))
    }

    #[test]
    fn test_deselect_all_is_idempotent() {
        let mut scene = Scene::new();
        let id = scene.add_path(square(0.0, 0.0, 10.0));
        set_item_fully_selected(&mut scene, id, true);
        scene.path_mut(id).unwrap().segments[1].handle_out.selected = true;

        deselect_all(&mut scene);
        deselect_all(&mut scene);

        let path = scene.path(id).unwrap();
        assert!(!path.is_selected());
        assert!(path.segments.iter().all(|s| !s.selected));
        assert!(path.segments.iter().all(|s| !s.handle_out.selected));
    }

    #[test]
    fn test_selected_paths_order_is_stable() {
        let mut scene = Scene::new();
        let a = scene.add_path(square(0.0, 0.0, 10.0));
        let b = scene.add_path(square(20.0, 0.0, 10.0));
        let c = scene.add_path(square(40.0, 0.0, 10.0));

        set_item_selected(&mut scene, c, true);
        set_item_selected(&mut scene, a, true);
        let _ = b;

        assert_eq!(selected_paths(&scene), vec![a, c]);
        assert_eq!(selected_paths(&scene), vec![a, c]);
    }

    #[test]
    fn test_fully_selecting_compound_cascades() {
        let mut scene = Scene::new();
        let compound = scene.add_compound(vec![square(0.0, 0.0, 40.0), square(10.0, 10.0, 20.0)]);

        set_item_fully_selected(&mut scene, compound, true);

        // Container plus both children report as selected.
        assert_eq!(selected_paths(&scene).len(), 3);
        for item in scene.items_ordered() {
            if let Item::Path(p) = item {
                assert!(p.is_fully_selected());
            }
        }
    }

    #[test]
    fn test_clone_selected_items() {
        let mut scene = Scene::new();
        let a = scene.add_path(square(0.0, 0.0, 10.0));
        let b = scene.add_path(square(20.0, 0.0, 10.0));
        set_item_fully_selected(&mut scene, a, true);

        clone_selected_items(&mut scene);

        assert_eq!(scene.len(), 3);
        // The original is deselected, exactly one clone is selected.
        assert!(!is_item_selected(&scene, a));
        assert!(!is_item_selected(&scene, b));
        let selected = selected_paths(&scene);
        assert_eq!(selected.len(), 1);
        assert_ne!(selected[0], a);

        // The clone sits directly above the original in z-order.
        let ids: Vec<ItemId> = scene.ids_ordered().collect();
        assert_eq!(ids[0], a);
        assert_eq!(ids[1], selected[0]);

        // And occupies the same position.
        assert_eq!(scene.position_of(selected[0]), scene.position_of(a));
    }

    #[test]
    fn test_clone_selected_compound_clones_children_once() {
        let mut scene = Scene::new();
        let compound = scene.add_compound(vec![square(0.0, 0.0, 40.0), square(10.0, 10.0, 20.0)]);
        set_item_fully_selected(&mut scene, compound, true);

        clone_selected_items(&mut scene);

        // 3 originals + 3 clones; children were not cloned separately.
        assert_eq!(scene.len(), 6);
        assert!(!is_item_selected(&scene, compound));

        let selected = selected_paths(&scene);
        assert_eq!(selected.len(), 3);
        let clone_id = selected
            .iter()
            .copied()
            .find(|&id| matches!(scene.get(id), Some(Item::Compound(_))))
            .expect("cloned compound");
        assert!(scene
            .get(clone_id)
            .and_then(|i| match i {
                Item::Compound(c) => Some(c.children.len()),
                _ => None,
            })
            .is_some_and(|n| n == 2));
    }

    #[test]
    fn test_rectangular_selection_includes_degenerate_bounds() {
        let mut scene = Scene::new();
        let line = scene.add_path(Path::new(
            vec![
                Segment::new(Point::new(20.0, 20.0)),
                Segment::new(Point::new(80.0, 20.0)),
            ],
            false,
        ));

        // A horizontal line has zero-height bounds; it must still be
        // caught by a marquee that contains it.
        process_rectangular_selection(
            &mut scene,
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Modifiers::NONE,
        );
        assert_eq!(selected_paths(&scene), vec![line]);
    }

    #[test]
    fn test_rectangular_selection_exclusive_and_additive() {
        let mut scene = Scene::new();
        let a = scene.add_path(square(0.0, 0.0, 10.0));
        let b = scene.add_path(square(200.0, 200.0, 10.0));
        let c = scene.add_path(square(400.0, 0.0, 10.0));

        set_item_selected(&mut scene, c, true);

        // Exclusive: prior selection is dropped.
        process_rectangular_selection(
            &mut scene,
            Rect::new(-5.0, -5.0, 50.0, 50.0),
            Modifiers::NONE,
        );
        assert_eq!(selected_paths(&scene), vec![a]);

        // Additive with shift.
        process_rectangular_selection(
            &mut scene,
            Rect::new(150.0, 150.0, 250.0, 250.0),
            Modifiers::SHIFT,
        );
        assert_eq!(selected_paths(&scene), vec![a, b]);
    }
}
