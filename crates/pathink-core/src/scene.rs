//! Scene graph: item store, z-order, and whole-item transforms.

use crate::path::{CompoundPath, Item, ItemId, Path};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

/// Scene errors.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Unknown item: {0}")]
    UnknownItem(ItemId),
}

/// The scene graph: all items keyed by id, plus a stable z-order.
///
/// Iteration order is back-to-front and only changes under explicit
/// mutation, so selection queries are stable across calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// All items in the scene, keyed by id.
    pub items: HashMap<ItemId, Item>,
    /// Z-order of items (back to front). Compound children are listed
    /// like any other item; their parent link marks the ownership.
    pub z_order: Vec<ItemId>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            z_order: Vec::new(),
        }
    }

    /// Add a path to the scene, returning its id.
    pub fn add_path(&mut self, path: Path) -> ItemId {
        let id = path.id();
        self.z_order.push(id);
        self.items.insert(id, Item::Path(path));
        id
    }

    /// Combine paths into a compound container. The children stay in the
    /// scene as items of their own with their parent link set; the
    /// container is appended on top.
    pub fn add_compound(&mut self, children: Vec<Path>) -> ItemId {
        let mut child_ids = Vec::with_capacity(children.len());
        let compound = CompoundPath::new(Vec::new());
        let compound_id = compound.id();
        for mut child in children {
            child.parent = Some(compound_id);
            child_ids.push(self.add_path(child));
        }
        let mut compound = compound;
        compound.children = child_ids;
        self.z_order.push(compound_id);
        self.items.insert(compound_id, Item::Compound(compound));
        compound_id
    }

    /// Remove an item. Removing a compound also removes its children.
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let item = self.items.remove(&id)?;
        self.z_order.retain(|&zid| zid != id);
        if let Item::Compound(ref c) = item {
            for child in c.children.clone() {
                self.remove(child);
            }
        }
        Some(item)
    }

    /// Get an item by id.
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    /// Get a mutable item by id.
    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(&id)
    }

    /// Get a path by id.
    pub fn path(&self, id: ItemId) -> Option<&Path> {
        self.items.get(&id).and_then(Item::as_path)
    }

    /// Get a mutable path by id.
    pub fn path_mut(&mut self, id: ItemId) -> Option<&mut Path> {
        self.items.get_mut(&id).and_then(Item::as_path_mut)
    }

    /// Item ids in z-order (back to front).
    pub fn ids_ordered(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.z_order.iter().copied()
    }

    /// Items in z-order (back to front).
    pub fn items_ordered(&self) -> impl Iterator<Item = &Item> {
        self.z_order.iter().filter_map(|id| self.items.get(id))
    }

    /// Whether the item's parent is a compound path.
    pub fn has_compound_parent(&self, id: ItemId) -> bool {
        self.items
            .get(&id)
            .and_then(Item::parent)
            .and_then(|pid| self.items.get(&pid))
            .is_some_and(|item| matches!(item, Item::Compound(_)))
    }

    /// Bounding box of an item. For compounds this is the union of the
    /// children's bounds.
    pub fn bounds_of(&self, id: ItemId) -> Option<Rect> {
        match self.items.get(&id)? {
            Item::Path(p) => Some(p.bounds()),
            Item::Compound(c) => {
                let mut bounds: Option<Rect> = None;
                for &child in &c.children {
                    if let Some(r) = self.bounds_of(child) {
                        bounds = Some(match bounds {
                            Some(b) => b.union(r),
                            None => r,
                        });
                    }
                }
                bounds
            }
        }
    }

    /// Position of an item: the center of its bounds.
    pub fn position_of(&self, id: ItemId) -> Option<Point> {
        self.bounds_of(id).map(|b| b.center())
    }

    /// Move an item by `delta`. Compounds move all of their children.
    pub fn translate_item(&mut self, id: ItemId, delta: Vec2) {
        let children = match self.items.get_mut(&id) {
            Some(Item::Path(p)) => {
                p.translate(delta);
                return;
            }
            Some(Item::Compound(c)) => c.children.clone(),
            None => return,
        };
        for child in children {
            if let Some(p) = self.path_mut(child) {
                p.translate(delta);
            }
        }
    }

    /// Reposition an item so the center of its bounds lands on `position`.
    pub fn set_item_position(&mut self, id: ItemId, position: Point) {
        if let Some(current) = self.position_of(id) {
            self.translate_item(id, position - current);
        }
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items, compound children included.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Insert a cloned item directly after `after` in z-order.
    pub(crate) fn insert_after(&mut self, after: ItemId, item: Item) -> ItemId {
        let id = item.id();
        let pos = self
            .z_order
            .iter()
            .position(|&zid| zid == after)
            .map(|p| p + 1)
            .unwrap_or(self.z_order.len());
        self.z_order.insert(pos, id);
        self.items.insert(id, item);
        id
    }

    /// Clone a path with a fresh id (selection flags carried over).
    pub(crate) fn clone_path(path: &Path) -> Path {
        let mut clone = path.clone();
        clone.id = Uuid::new_v4();
        clone
    }

    /// Serialize the scene to JSON.
    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a scene from JSON.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }
}
