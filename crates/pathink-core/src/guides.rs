//! Transient visual affordances: hover outline, marquee box, selection
//! bounds. Pure presentation state, driven by the active tool.

use crate::path::ItemId;
use crate::scene::Scene;
use crate::selection;
use kurbo::{Point, Rect};

/// A drag-drawn marquee rectangle.
#[derive(Debug, Clone, Copy)]
pub struct SelectionBox {
    /// Corner where the drag started.
    pub from: Point,
    /// Corner under the pointer.
    pub to: Point,
    /// Remove the box when the next drag sample replaces it.
    pub remove_on_drag: bool,
    /// Remove the box when the pointer is released.
    pub remove_on_up: bool,
}

impl SelectionBox {
    /// The marquee rectangle spanned by the two corners.
    pub fn rect(&self) -> Rect {
        Rect::from_points(self.from, self.to)
    }
}

/// Overlay state for hover, marquee and selection-bounds guides.
#[derive(Debug, Clone, Default)]
pub struct GuideLayer {
    hover: Option<ItemId>,
    selection_box: Option<SelectionBox>,
    selection_bounds: Option<Rect>,
}

impl GuideLayer {
    /// Create an empty guide layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the hover outline for an item. At most one hover path exists
    /// at a time, so any previous one is hidden first.
    pub fn show_hover_path(&mut self, item: ItemId) {
        self.hover = Some(item);
    }

    /// Hide the hover outline.
    pub fn hide_hover_path(&mut self) {
        self.hover = None;
    }

    /// The currently hovered item, if any.
    pub fn hover_path(&self) -> Option<ItemId> {
        self.hover
    }

    /// Show (or update) the marquee box spanning `from` to `to`.
    /// Each call replaces the previous box, which is how the
    /// remove-on-drag contract is honored.
    pub fn show_selection_box(&mut self, from: Point, to: Point) -> &mut SelectionBox {
        self.selection_box.insert(SelectionBox {
            from,
            to,
            remove_on_drag: false,
            remove_on_up: false,
        })
    }

    /// The current marquee box, if one is shown.
    pub fn selection_box(&self) -> Option<&SelectionBox> {
        self.selection_box.as_ref()
    }

    /// Remove and return the marquee box.
    pub fn take_selection_box(&mut self) -> Option<SelectionBox> {
        self.selection_box.take()
    }

    /// Show the bounding outline around the selection.
    pub fn show_selection_bounds(&mut self, bounds: Rect) {
        self.selection_bounds = Some(bounds);
    }

    /// Hide the selection bounds outline.
    pub fn hide_selection_bounds(&mut self) {
        self.selection_bounds = None;
    }

    /// The selection bounds outline, if shown.
    pub fn selection_bounds(&self) -> Option<Rect> {
        self.selection_bounds
    }

    /// Recompute the selection bounds from the scene: the union of all
    /// selected items' bounds, or hidden when nothing is selected.
    pub fn refresh_selection_bounds(&mut self, scene: &Scene) {
        self.hide_selection_bounds();
        let mut bounds: Option<Rect> = None;
        for id in selection::selected_paths(scene) {
            if let Some(r) = scene.bounds_of(id) {
                bounds = Some(match bounds {
                    Some(b) => b.union(r),
                    None => r,
                });
            }
        }
        if let Some(b) = bounds {
            self.show_selection_bounds(b);
        }
    }
}
