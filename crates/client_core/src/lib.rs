use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::{
    domain::{CommentId, CommentStatus, MenuItemType, SiteId},
    protocol::ScrollTarget,
};
use tracing::debug;

pub mod config;
pub mod menu_tree;
pub mod moderation;
pub mod observer;
pub mod ordering;
pub mod type_catalog;

pub use menu_tree::{ItemHandle, MenuItemTree, MenuTreeError, SiblingMove};
pub use moderation::{ApplyOutcome, AvailableActions, CommentModerationSelection, ModerationReport};
pub use observer::ObserverSlot;
pub use ordering::{
    AddItemError, MenuItemOrderingController, OrderingState, RowAction, RowOptions,
};
pub use type_catalog::{LoadOutcome, MenuItemTypeCatalog};

/// Source of the item types a site offers, custom post types included.
#[async_trait]
pub trait SiteDataSource: Send + Sync {
    async fn fetch_item_types(&self, site: SiteId) -> Result<Vec<MenuItemType>>;
}

pub struct MissingSiteDataSource;

#[async_trait]
impl SiteDataSource for MissingSiteDataSource {
    async fn fetch_item_types(&self, site: SiteId) -> Result<Vec<MenuItemType>> {
        Err(anyhow!("site data source unavailable for site {}", site.0))
    }
}

#[async_trait]
pub trait CommentService: Send + Sync {
    async fn set_comment_status(&self, comment_id: CommentId, status: CommentStatus)
        -> Result<()>;
}

pub struct MissingCommentService;

#[async_trait]
impl CommentService for MissingCommentService {
    async fn set_comment_status(
        &self,
        comment_id: CommentId,
        _status: CommentStatus,
    ) -> Result<()> {
        Err(anyhow!(
            "comment service unavailable for comment {}",
            comment_id.0
        ))
    }
}

/// On-screen side of the components: scrolling hints and confirmation
/// prompts.
#[async_trait]
pub trait Renderer: Send + Sync {
    fn scroll_to_visible(&self, target: ScrollTarget, animated: bool);
    async fn confirm_destructive_action(&self, prompt: &str) -> bool;
}

/// Renderer with no screen attached; it never confirms destructive actions.
pub struct HeadlessRenderer;

#[async_trait]
impl Renderer for HeadlessRenderer {
    fn scroll_to_visible(&self, target: ScrollTarget, animated: bool) {
        debug!(?target, animated, "headless renderer ignoring scroll");
    }

    async fn confirm_destructive_action(&self, prompt: &str) -> bool {
        debug!(prompt, "headless renderer declining destructive action");
        false
    }
}
