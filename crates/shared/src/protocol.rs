use serde::{Deserialize, Serialize};

use crate::{
    domain::{MenuItemId, ModerationAction, SiteId},
    error::ErrorReport,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum MenuEvent {
    SelectionChanged {
        previous: Option<MenuItemId>,
        current: Option<MenuItemId>,
    },
    AddingStarted {
        anchor: MenuItemId,
    },
    AddingCancelled {
        anchor: MenuItemId,
    },
    ItemAdded {
        item_id: MenuItemId,
        parent: Option<MenuItemId>,
        position: usize,
    },
    /// Sibling positions `first..=last` under `parent` were renumbered.
    OrderChanged {
        parent: Option<MenuItemId>,
        first: usize,
        last: usize,
    },
    EditingChanged {
        editing: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum CatalogEvent {
    TypesLoaded { site: SiteId, count: usize },
    LoadFailed(ErrorReport),
    TypeSelectionChanged { tag: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ModerationEvent {
    SelectionCountChanged {
        count: usize,
    },
    ModerationCompleted {
        action: ModerationAction,
        succeeded: usize,
        failed: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ScrollTarget {
    ItemType(String),
    MenuItem(MenuItemId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_events_use_tagged_snake_case_encoding() {
        let event = MenuEvent::OrderChanged {
            parent: Some(MenuItemId(4)),
            first: 0,
            last: 2,
        };
        let encoded = serde_json::to_value(&event).expect("encode");
        assert_eq!(encoded["type"], "order_changed");
        assert_eq!(encoded["payload"]["parent"], 4);
    }

    #[test]
    fn moderation_actions_decode_from_lowercase_names() {
        let action: ModerationAction = serde_json::from_str("\"unapprove\"").expect("decode");
        assert_eq!(action, ModerationAction::Unapprove);
    }
}
