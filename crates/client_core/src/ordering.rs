//! Selection, add-mode, and reorder mediation for the menu editor rows.

use shared::{
    domain::{MenuItem, MenuItemId},
    protocol::MenuEvent,
};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    menu_tree::{ItemHandle, MenuItemTree, MenuTreeError, SiblingMove},
    observer::ObserverSlot,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderingState {
    Idle,
    ItemSelected(ItemHandle),
    Adding { anchor: ItemHandle },
}

/// Taps forwarded by an item row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Selected,
    AddPressed,
    CancelPressed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowOptions {
    pub is_selected: bool,
    pub shows_editing_buttons: bool,
    pub shows_cancel_button: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddItemError {
    #[error("no add is in progress")]
    NotAdding,
    #[error(transparent)]
    Tree(#[from] MenuTreeError),
}

pub struct MenuItemOrderingController {
    tree: MenuItemTree,
    state: OrderingState,
    editing: bool,
    observer: ObserverSlot<MenuEvent>,
}

impl MenuItemOrderingController {
    pub fn new(tree: MenuItemTree) -> Self {
        Self {
            tree,
            state: OrderingState::Idle,
            editing: false,
            observer: ObserverSlot::new("menu_ordering"),
        }
    }

    pub fn attach_observer(&mut self) -> mpsc::UnboundedReceiver<MenuEvent> {
        self.observer.attach()
    }

    /// Screen teardown: back to `Idle` with no observer.
    pub fn reset(&mut self) {
        self.state = OrderingState::Idle;
        self.editing = false;
        self.observer.detach();
    }

    pub fn tree(&self) -> &MenuItemTree {
        &self.tree
    }

    pub fn state(&self) -> OrderingState {
        self.state
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn selected_item(&self) -> Option<ItemHandle> {
        match self.state {
            OrderingState::ItemSelected(handle) => Some(handle),
            _ => None,
        }
    }

    pub fn adding_anchor(&self) -> Option<ItemHandle> {
        match self.state {
            OrderingState::Adding { anchor } => Some(anchor),
            _ => None,
        }
    }

    /// Returns `true` when the selection actually changed.
    pub fn select_item(&mut self, item: Option<ItemHandle>) -> bool {
        if let OrderingState::Adding { .. } = self.state {
            debug!("ignoring selection while adding an item");
            return false;
        }
        if let Some(handle) = item {
            if !self.tree.contains(handle) {
                warn!(?handle, "selection requested for unknown menu item");
                return false;
            }
        }

        let previous = self.selected_item();
        if previous == item {
            return false;
        }

        self.state = match item {
            Some(handle) => OrderingState::ItemSelected(handle),
            None => OrderingState::Idle,
        };
        self.notify_selection(previous, item);
        true
    }

    pub fn begin_adding_item(&mut self, anchor: ItemHandle) -> bool {
        if let OrderingState::Adding { .. } = self.state {
            debug!("already adding an item");
            return false;
        }
        let Some(anchor_id) = self.tree.id_of(anchor) else {
            warn!(?anchor, "add requested around unknown menu item");
            return false;
        };

        if let Some(previous) = self.selected_item() {
            self.state = OrderingState::Idle;
            self.notify_selection(Some(previous), None);
        }
        self.state = OrderingState::Adding { anchor };
        self.observer.notify(MenuEvent::AddingStarted { anchor: anchor_id });
        true
    }

    pub fn cancel_adding(&mut self) -> bool {
        let OrderingState::Adding { anchor } = self.state else {
            return false;
        };
        self.state = OrderingState::Idle;
        if let Some(anchor_id) = self.tree.id_of(anchor) {
            self.observer.notify(MenuEvent::AddingCancelled { anchor: anchor_id });
        }
        true
    }

    /// Inserts `item` directly after the adding anchor, among its siblings,
    /// and leaves add mode.
    pub fn commit_adding(&mut self, item: MenuItem) -> Result<ItemHandle, AddItemError> {
        let OrderingState::Adding { anchor } = self.state else {
            return Err(AddItemError::NotAdding);
        };
        let parent = self.tree.parent_of(anchor);
        let position = self.tree.position_of(anchor).unwrap_or_default() + 1;
        let item_id = item.id;

        let handle = self.tree.insert(parent, position, item)?;
        self.state = OrderingState::Idle;

        let parent_id = parent.and_then(|parent| self.tree.id_of(parent));
        let last = self.tree.siblings_of(handle).len().saturating_sub(1);
        info!(item_id = item_id.0, position, "menu item added");
        self.observer.notify(MenuEvent::ItemAdded {
            item_id,
            parent: parent_id,
            position,
        });
        self.observer.notify(MenuEvent::OrderChanged {
            parent: parent_id,
            first: position,
            last,
        });
        Ok(handle)
    }

    /// Moves `item` to `new_index` among its siblings, clamping the index.
    /// Returns `None` only for a handle that is not part of this menu.
    pub fn commit_order_change(
        &mut self,
        item: ItemHandle,
        new_index: i64,
    ) -> Option<SiblingMove> {
        let moved = self.tree.move_within_siblings(item, new_index)?;
        if moved.from == moved.to {
            return Some(moved);
        }

        let (first, last) = moved.affected_range();
        let parent = moved.parent.and_then(|parent| self.tree.id_of(parent));
        debug!(from = moved.from, to = moved.to, "menu item reordered");
        self.observer.notify(MenuEvent::OrderChanged {
            parent,
            first,
            last,
        });
        Some(moved)
    }

    pub fn set_editing(&mut self, editing: bool) {
        if self.editing == editing {
            return;
        }
        if !editing {
            self.cancel_adding();
        }
        self.editing = editing;
        self.observer.notify(MenuEvent::EditingChanged { editing });
    }

    pub fn row_options(&self, item: ItemHandle) -> RowOptions {
        let adding_anchor = self.adding_anchor();
        RowOptions {
            is_selected: self.selected_item() == Some(item),
            shows_editing_buttons: self.editing && adding_anchor.is_none(),
            shows_cancel_button: adding_anchor == Some(item),
        }
    }

    pub fn handle_row_action(&mut self, item: ItemHandle, action: RowAction) -> bool {
        match action {
            RowAction::Selected => self.select_item(Some(item)),
            RowAction::AddPressed => self.begin_adding_item(item),
            RowAction::CancelPressed => self.cancel_adding(),
        }
    }

    fn notify_selection(&mut self, previous: Option<ItemHandle>, current: Option<ItemHandle>) {
        let id = |handle: Option<ItemHandle>| -> Option<MenuItemId> {
            handle.and_then(|handle| self.tree.id_of(handle))
        };
        let event = MenuEvent::SelectionChanged {
            previous: id(previous),
            current: id(current),
        };
        self.observer.notify(event);
    }
}

#[cfg(test)]
#[path = "tests/ordering_tests.rs"]
mod tests;
