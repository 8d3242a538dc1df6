use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(pub i64);
    };
}

id_newtype!(SiteId);
id_newtype!(PostId);
id_newtype!(CommentId);
id_newtype!(MenuItemId);

pub const MENU_ITEM_TYPE_PAGE: &str = "page";
pub const MENU_ITEM_TYPE_CUSTOM: &str = "custom";
pub const MENU_ITEM_TYPE_CATEGORY: &str = "category";
pub const MENU_ITEM_TYPE_TAG: &str = "post_tag";
pub const MENU_ITEM_TYPE_POST: &str = "post";

/// Item types every site offers, in their default display order.
pub const STANDARD_MENU_ITEM_TYPES: [&str; 5] = [
    MENU_ITEM_TYPE_PAGE,
    MENU_ITEM_TYPE_CUSTOM,
    MENU_ITEM_TYPE_CATEGORY,
    MENU_ITEM_TYPE_TAG,
    MENU_ITEM_TYPE_POST,
];

pub fn is_standard_menu_item_type(tag: &str) -> bool {
    STANDARD_MENU_ITEM_TYPES.contains(&tag)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuItemTypeKind {
    Standard,
    /// A custom post type registered by the site.
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItemType {
    pub tag: String,
    pub display_name: String,
    pub kind: MenuItemTypeKind,
}

impl MenuItemType {
    /// Builds a type, classifying it as standard when the tag is one of
    /// [`STANDARD_MENU_ITEM_TYPES`].
    pub fn new(tag: impl Into<String>, display_name: impl Into<String>) -> Self {
        let tag = tag.into();
        let kind = if is_standard_menu_item_type(&tag) {
            MenuItemTypeKind::Standard
        } else {
            MenuItemTypeKind::Custom
        };
        Self {
            tag,
            display_name: display_name.into(),
            kind,
        }
    }

    pub fn is_custom(&self) -> bool {
        self.kind == MenuItemTypeKind::Custom
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub type_tag: String,
}

impl MenuItem {
    pub fn new(id: MenuItemId, name: impl Into<String>, type_tag: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            type_tag: type_tag.into(),
        }
    }
}

/// Nested menu description as delivered by a fetch or a fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemSpec {
    pub id: MenuItemId,
    pub name: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(default)]
    pub children: Vec<MenuItemSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentStatus {
    Pending,
    Approved,
    Spam,
    Deleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationAction {
    Approve,
    Unapprove,
    Spam,
    Delete,
}

impl ModerationAction {
    pub const ALL: [ModerationAction; 4] = [
        ModerationAction::Approve,
        ModerationAction::Unapprove,
        ModerationAction::Spam,
        ModerationAction::Delete,
    ];

    pub fn target_status(self) -> CommentStatus {
        match self {
            ModerationAction::Approve => CommentStatus::Approved,
            ModerationAction::Unapprove => CommentStatus::Pending,
            ModerationAction::Spam => CommentStatus::Spam,
            ModerationAction::Delete => CommentStatus::Deleted,
        }
    }

    pub fn is_destructive(self) -> bool {
        self == ModerationAction::Delete
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ModerationAction::Approve => "approve",
            ModerationAction::Unapprove => "unapprove",
            ModerationAction::Spam => "spam",
            ModerationAction::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub comment_id: CommentId,
    pub post_id: PostId,
    pub author: String,
    pub status: CommentStatus,
    pub created_at: DateTime<Utc>,
}
