//! Arena of menu items addressed by handles.
//!
//! Children are owned by the arena and listed in order by their parent;
//! each node keeps a plain parent handle instead of a back-reference.

use std::collections::HashMap;

use shared::domain::{MenuItem, MenuItemId, MenuItemSpec};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemHandle(usize);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuTreeError {
    #[error("menu item {0:?} already exists")]
    DuplicateId(MenuItemId),
    #[error("parent handle does not belong to this menu")]
    UnknownParent,
}

#[derive(Debug, Clone)]
struct MenuItemNode {
    item: MenuItem,
    parent: Option<ItemHandle>,
    position: usize,
    children: Vec<ItemHandle>,
}

/// Result of moving an item inside its sibling list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiblingMove {
    pub parent: Option<ItemHandle>,
    pub from: usize,
    pub to: usize,
}

impl SiblingMove {
    /// Inclusive span of sibling positions that were renumbered.
    pub fn affected_range(&self) -> (usize, usize) {
        (self.from.min(self.to), self.from.max(self.to))
    }
}

#[derive(Debug, Clone, Default)]
pub struct MenuItemTree {
    nodes: Vec<MenuItemNode>,
    roots: Vec<ItemHandle>,
    by_id: HashMap<MenuItemId, ItemHandle>,
}

impl MenuItemTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_specs(specs: &[MenuItemSpec]) -> Result<Self, MenuTreeError> {
        let mut tree = Self::new();
        for spec in specs {
            tree.insert_spec(None, spec)?;
        }
        Ok(tree)
    }

    fn insert_spec(
        &mut self,
        parent: Option<ItemHandle>,
        spec: &MenuItemSpec,
    ) -> Result<ItemHandle, MenuTreeError> {
        let item = MenuItem::new(spec.id, spec.name.clone(), spec.type_tag.clone());
        let handle = self.insert(parent, usize::MAX, item)?;
        for child in &spec.children {
            self.insert_spec(Some(handle), child)?;
        }
        Ok(handle)
    }

    /// Inserts `item` under `parent` (or at the root) at `index`, clamped to
    /// the end of the sibling list.
    pub fn insert(
        &mut self,
        parent: Option<ItemHandle>,
        index: usize,
        item: MenuItem,
    ) -> Result<ItemHandle, MenuTreeError> {
        if self.by_id.contains_key(&item.id) {
            return Err(MenuTreeError::DuplicateId(item.id));
        }
        if let Some(parent) = parent {
            if !self.contains(parent) {
                return Err(MenuTreeError::UnknownParent);
            }
        }

        let handle = ItemHandle(self.nodes.len());
        self.by_id.insert(item.id, handle);
        self.nodes.push(MenuItemNode {
            item,
            parent,
            position: 0,
            children: Vec::new(),
        });

        let siblings = self.sibling_list_mut(parent);
        let index = index.min(siblings.len());
        siblings.insert(index, handle);
        self.renumber(parent);
        Ok(handle)
    }

    /// Moves `handle` to `new_index` among its siblings. The index is
    /// clamped to `[0, sibling_count - 1]` once the item is taken out, so
    /// the move never fails and never loses an item.
    pub fn move_within_siblings(
        &mut self,
        handle: ItemHandle,
        new_index: i64,
    ) -> Option<SiblingMove> {
        let node = self.nodes.get(handle.0)?;
        let parent = node.parent;
        let from = node.position;

        let siblings = self.sibling_list_mut(parent);
        siblings.remove(from);
        let upper = siblings.len() as i64;
        let to = new_index.clamp(0, upper) as usize;
        siblings.insert(to, handle);
        self.renumber(parent);

        Some(SiblingMove { parent, from, to })
    }

    fn sibling_list_mut(&mut self, parent: Option<ItemHandle>) -> &mut Vec<ItemHandle> {
        match parent {
            Some(parent) => &mut self.nodes[parent.0].children,
            None => &mut self.roots,
        }
    }

    fn renumber(&mut self, parent: Option<ItemHandle>) {
        let siblings = match parent {
            Some(parent) => self.nodes[parent.0].children.clone(),
            None => self.roots.clone(),
        };
        for (position, handle) in siblings.into_iter().enumerate() {
            self.nodes[handle.0].position = position;
        }
    }

    /// Handles are only meaningful for the tree that issued them; a handle
    /// from another tree that happens to be in bounds is not detected.
    pub fn contains(&self, handle: ItemHandle) -> bool {
        handle.0 < self.nodes.len()
    }

    pub fn get(&self, handle: ItemHandle) -> Option<&MenuItem> {
        self.nodes.get(handle.0).map(|node| &node.item)
    }

    pub fn find(&self, id: MenuItemId) -> Option<ItemHandle> {
        self.by_id.get(&id).copied()
    }

    pub fn id_of(&self, handle: ItemHandle) -> Option<MenuItemId> {
        self.get(handle).map(|item| item.id)
    }

    pub fn parent_of(&self, handle: ItemHandle) -> Option<ItemHandle> {
        self.nodes.get(handle.0).and_then(|node| node.parent)
    }

    pub fn position_of(&self, handle: ItemHandle) -> Option<usize> {
        self.nodes.get(handle.0).map(|node| node.position)
    }

    pub fn children_of(&self, handle: ItemHandle) -> &[ItemHandle] {
        self.nodes
            .get(handle.0)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    pub fn roots(&self) -> &[ItemHandle] {
        &self.roots
    }

    pub fn siblings_of(&self, handle: ItemHandle) -> &[ItemHandle] {
        match self.nodes.get(handle.0) {
            Some(MenuItemNode {
                parent: Some(parent),
                ..
            }) => self.children_of(*parent),
            Some(_) => &self.roots,
            None => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All items in display order, paired with their nesting depth.
    pub fn depth_first(&self) -> Vec<(ItemHandle, usize)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(ItemHandle, usize)> =
            self.roots.iter().rev().map(|handle| (*handle, 0)).collect();
        while let Some((handle, depth)) = stack.pop() {
            out.push((handle, depth));
            for child in self.children_of(handle).iter().rev() {
                stack.push((*child, depth + 1));
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "tests/menu_tree_tests.rs"]
mod tests;
