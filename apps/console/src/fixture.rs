//! JSON-described site used to drive the core without a real backend.

use std::{collections::HashSet, fs, path::Path};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use client_core::{CommentService, Renderer, SiteDataSource};
use serde::Deserialize;
use shared::{
    domain::{Comment, CommentId, CommentStatus, MenuItemSpec, MenuItemType, SiteId},
    protocol::ScrollTarget,
};
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct SiteFixture {
    pub site_id: SiteId,
    #[serde(default)]
    pub item_types: Vec<MenuItemType>,
    #[serde(default)]
    pub fetch_fails: bool,
    #[serde(default)]
    pub menu: Vec<MenuItemSpec>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub failing_comment_ids: HashSet<CommentId>,
}

impl SiteFixture {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read fixture '{}'", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse fixture '{}'", path.display()))
    }
}

pub struct FixtureSiteData {
    pub fixture: SiteFixture,
}

#[async_trait]
impl SiteDataSource for FixtureSiteData {
    async fn fetch_item_types(&self, site: SiteId) -> Result<Vec<MenuItemType>> {
        if self.fixture.fetch_fails || site != self.fixture.site_id {
            return Err(anyhow!("site {} did not answer", site.0));
        }
        Ok(self.fixture.item_types.clone())
    }
}

pub struct FixtureCommentService {
    pub failing: HashSet<CommentId>,
}

#[async_trait]
impl CommentService for FixtureCommentService {
    async fn set_comment_status(
        &self,
        comment_id: CommentId,
        status: CommentStatus,
    ) -> Result<()> {
        if self.failing.contains(&comment_id) {
            return Err(anyhow!("comment {} rejected by server", comment_id.0));
        }
        info!(comment_id = comment_id.0, ?status, "comment status updated");
        Ok(())
    }
}

/// Prints scroll hints and answers confirmation prompts from `--yes`.
pub struct ConsoleRenderer {
    pub assume_yes: bool,
}

#[async_trait]
impl Renderer for ConsoleRenderer {
    fn scroll_to_visible(&self, target: ScrollTarget, animated: bool) {
        println!("scroll to {target:?} (animated={animated})");
    }

    async fn confirm_destructive_action(&self, prompt: &str) -> bool {
        println!("{prompt} [{}]", if self.assume_yes { "yes" } else { "no" });
        self.assume_yes
    }
}
