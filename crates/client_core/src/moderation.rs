//! Multi-select over a comment list and bulk moderation of the selection.

use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    sync::Arc,
};

use futures::{stream, StreamExt};
use shared::{
    domain::{Comment, CommentId, CommentStatus, ModerationAction, PostId},
    error::CoreError,
    protocol::ModerationEvent,
};
use tokio::sync::{mpsc, Mutex};
use tracing::{info, warn};

use crate::{config::Settings, observer::ObserverSlot, CommentService, Renderer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationReport {
    pub action: ModerationAction,
    pub succeeded: BTreeSet<CommentId>,
    pub failed: BTreeMap<CommentId, CoreError>,
}

impl ModerationReport {
    fn empty(action: ModerationAction) -> Self {
        Self {
            action,
            succeeded: BTreeSet::new(),
            failed: BTreeMap::new(),
        }
    }

    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied(ModerationReport),
    /// The user turned down the confirmation prompt; nothing was sent.
    Declined,
}

/// Which toolbar actions make sense for the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AvailableActions {
    pub approve: bool,
    pub unapprove: bool,
    pub spam: bool,
    pub delete: bool,
}

impl AvailableActions {
    pub fn allows(&self, action: ModerationAction) -> bool {
        match action {
            ModerationAction::Approve => self.approve,
            ModerationAction::Unapprove => self.unapprove,
            ModerationAction::Spam => self.spam,
            ModerationAction::Delete => self.delete,
        }
    }
}

struct SelectionState {
    comments: Vec<Comment>,
    selected: HashSet<CommentId>,
    editing: bool,
    observer: ObserverSlot<ModerationEvent>,
}

impl SelectionState {
    fn notify_count(&mut self) {
        let count = self.selected.len();
        self.observer
            .notify(ModerationEvent::SelectionCountChanged { count });
    }
}

pub struct CommentModerationSelection {
    service: Arc<dyn CommentService>,
    renderer: Arc<dyn Renderer>,
    concurrency: usize,
    delete_prompt: String,
    inner: Mutex<SelectionState>,
}

impl CommentModerationSelection {
    pub fn new(
        service: Arc<dyn CommentService>,
        renderer: Arc<dyn Renderer>,
        settings: &Settings,
    ) -> Self {
        Self {
            service,
            renderer,
            concurrency: settings.moderation_concurrency.max(1),
            delete_prompt: settings.delete_prompt.clone(),
            inner: Mutex::new(SelectionState {
                comments: Vec::new(),
                selected: HashSet::new(),
                editing: false,
                observer: ObserverSlot::new("comment_moderation"),
            }),
        }
    }

    pub async fn attach_observer(&self) -> mpsc::UnboundedReceiver<ModerationEvent> {
        self.inner.lock().await.observer.attach()
    }

    pub async fn detach_observer(&self) {
        self.inner.lock().await.observer.detach();
    }

    /// Replaces the list, newest comments first. Selected ids that are no
    /// longer listed are dropped from the selection.
    pub async fn load_comments(&self, mut comments: Vec<Comment>) {
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let listed: HashSet<CommentId> = comments.iter().map(|c| c.comment_id).collect();

        let mut state = self.inner.lock().await;
        state.comments = comments;
        let before = state.selected.len();
        state.selected.retain(|id| listed.contains(id));
        if state.selected.len() != before {
            state.notify_count();
        }
    }

    pub async fn comments(&self) -> Vec<Comment> {
        self.inner.lock().await.comments.clone()
    }

    pub async fn comments_for_post(&self, post: PostId) -> Vec<Comment> {
        self.inner
            .lock()
            .await
            .comments
            .iter()
            .filter(|comment| comment.post_id == post)
            .cloned()
            .collect()
    }

    /// Flips membership of `comment_id`; returns whether it is now selected.
    /// Ids missing from the loaded list are ignored.
    pub async fn toggle(&self, comment_id: CommentId) -> bool {
        let mut state = self.inner.lock().await;
        if !state.comments.iter().any(|c| c.comment_id == comment_id) {
            warn!(comment_id = comment_id.0, "toggle requested for unlisted comment");
            return false;
        }
        let selected = if state.selected.remove(&comment_id) {
            false
        } else {
            state.selected.insert(comment_id);
            true
        };
        state.notify_count();
        selected
    }

    pub async fn clear(&self) {
        let mut state = self.inner.lock().await;
        if state.selected.is_empty() {
            return;
        }
        state.selected.clear();
        state.notify_count();
    }

    pub async fn set_editing(&self, editing: bool) {
        let mut state = self.inner.lock().await;
        state.editing = editing;
        if !editing && !state.selected.is_empty() {
            state.selected.clear();
            state.notify_count();
        }
    }

    pub async fn is_editing(&self) -> bool {
        self.inner.lock().await.editing
    }

    pub async fn selected(&self) -> BTreeSet<CommentId> {
        self.inner.lock().await.selected.iter().copied().collect()
    }

    pub async fn selection_count(&self) -> usize {
        self.inner.lock().await.selected.len()
    }

    pub async fn is_selected(&self, comment_id: CommentId) -> bool {
        self.inner.lock().await.selected.contains(&comment_id)
    }

    pub async fn available_actions(&self) -> AvailableActions {
        let state = self.inner.lock().await;
        if state.selected.is_empty() {
            return AvailableActions::default();
        }

        let statuses: Vec<CommentStatus> = state
            .comments
            .iter()
            .filter(|comment| state.selected.contains(&comment.comment_id))
            .map(|comment| comment.status)
            .collect();
        AvailableActions {
            approve: statuses.iter().any(|s| *s != CommentStatus::Approved),
            unapprove: statuses.contains(&CommentStatus::Approved),
            spam: statuses.iter().any(|s| *s != CommentStatus::Spam),
            delete: true,
        }
    }

    /// Sends `action` for every selected comment. Failures do not stop the
    /// batch; only comments whose request succeeded leave the selection.
    pub async fn apply_action(&self, action: ModerationAction) -> ApplyOutcome {
        let ids: BTreeSet<CommentId> = self.selected().await;
        if ids.is_empty() {
            return ApplyOutcome::Applied(ModerationReport::empty(action));
        }

        if action.is_destructive()
            && !self
                .renderer
                .confirm_destructive_action(&self.delete_prompt)
                .await
        {
            info!(action = action.as_str(), count = ids.len(), "moderation declined");
            return ApplyOutcome::Declined;
        }

        let status = action.target_status();
        let results: Vec<(CommentId, anyhow::Result<()>)> = stream::iter(ids)
            .map(|comment_id| {
                let service = Arc::clone(&self.service);
                async move {
                    let result = service.set_comment_status(comment_id, status).await;
                    (comment_id, result)
                }
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let mut report = ModerationReport::empty(action);
        for (comment_id, result) in results {
            match result {
                Ok(()) => {
                    report.succeeded.insert(comment_id);
                }
                Err(err) => {
                    warn!(
                        comment_id = comment_id.0,
                        action = action.as_str(),
                        error = %err,
                        "moderation request failed"
                    );
                    report
                        .failed
                        .insert(comment_id, CoreError::ModerationFailure(err.to_string()));
                }
            }
        }

        let mut state = self.inner.lock().await;
        let before = state.selected.len();
        for comment_id in &report.succeeded {
            state.selected.remove(comment_id);
        }
        if action == ModerationAction::Delete {
            state
                .comments
                .retain(|comment| !report.succeeded.contains(&comment.comment_id));
        } else {
            for comment in state
                .comments
                .iter_mut()
                .filter(|comment| report.succeeded.contains(&comment.comment_id))
            {
                comment.status = status;
            }
        }
        if state.selected.len() != before {
            state.notify_count();
        }
        state.observer.notify(ModerationEvent::ModerationCompleted {
            action,
            succeeded: report.succeeded.len(),
            failed: report.failed.len(),
        });

        info!(
            action = action.as_str(),
            succeeded = report.succeeded.len(),
            failed = report.failed.len(),
            "moderation batch finished"
        );
        ApplyOutcome::Applied(report)
    }
}

#[cfg(test)]
#[path = "tests/moderation_tests.rs"]
mod tests;
