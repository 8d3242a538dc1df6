//! Selectable menu item types for one site, with last-request-wins loading.

use std::{collections::HashSet, sync::Arc};

use shared::{
    domain::{MenuItemType, SiteId},
    error::{CoreError, ErrorReport},
    protocol::{CatalogEvent, ScrollTarget},
};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

use crate::{observer::ObserverSlot, Renderer, SiteDataSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied { count: usize },
    /// A later `load_types` call was issued before this one completed.
    Superseded,
}

struct CatalogState {
    types: Vec<MenuItemType>,
    selected: Option<String>,
    issued_seq: u64,
    observer: ObserverSlot<CatalogEvent>,
}

pub struct MenuItemTypeCatalog {
    source: Arc<dyn SiteDataSource>,
    renderer: Arc<dyn Renderer>,
    inner: Mutex<CatalogState>,
}

impl MenuItemTypeCatalog {
    pub fn new(source: Arc<dyn SiteDataSource>, renderer: Arc<dyn Renderer>) -> Self {
        Self {
            source,
            renderer,
            inner: Mutex::new(CatalogState {
                types: Vec::new(),
                selected: None,
                issued_seq: 0,
                observer: ObserverSlot::new("item_type_catalog"),
            }),
        }
    }

    pub async fn attach_observer(&self) -> mpsc::UnboundedReceiver<CatalogEvent> {
        self.inner.lock().await.observer.attach()
    }

    pub async fn detach_observer(&self) {
        self.inner.lock().await.observer.detach();
    }

    /// Fetches the site's types and replaces the catalog with them, unless
    /// another load was issued in the meantime. A failed fetch leaves the
    /// catalog as it was.
    pub async fn load_types(&self, site: SiteId) -> Result<LoadOutcome, CoreError> {
        let seq = {
            let mut state = self.inner.lock().await;
            state.issued_seq += 1;
            state.issued_seq
        };

        let fetched = self.source.fetch_item_types(site).await;

        let mut state = self.inner.lock().await;
        if seq != state.issued_seq {
            debug!(
                site = site.0,
                seq,
                latest = state.issued_seq,
                "discarding superseded item types"
            );
            return Ok(LoadOutcome::Superseded);
        }

        let types = match fetched {
            Ok(types) => normalize_types(types),
            Err(err) => {
                let err = CoreError::FetchFailed {
                    site,
                    reason: err.to_string(),
                };
                warn!(site = site.0, seq, error = %err, "item type fetch failed");
                state
                    .observer
                    .notify(CatalogEvent::LoadFailed(ErrorReport::from(&err)));
                return Err(err);
            }
        };

        let count = types.len();
        state.types = types;
        info!(site = site.0, seq, count, "item types loaded");
        state.observer.notify(CatalogEvent::TypesLoaded { site, count });

        let selection_gone = state
            .selected
            .as_deref()
            .is_some_and(|tag| !state.types.iter().any(|ty| ty.tag == tag));
        if selection_gone {
            state.selected = None;
            state
                .observer
                .notify(CatalogEvent::TypeSelectionChanged { tag: None });
        }

        Ok(LoadOutcome::Applied { count })
    }

    pub async fn select_type(&self, tag: &str) -> Result<(), CoreError> {
        let mut state = self.inner.lock().await;
        if !state.types.iter().any(|ty| ty.tag == tag) {
            return Err(CoreError::UnknownType(tag.to_string()));
        }
        if state.selected.as_deref() == Some(tag) {
            return Ok(());
        }

        state.selected = Some(tag.to_string());
        state.observer.notify(CatalogEvent::TypeSelectionChanged {
            tag: Some(tag.to_string()),
        });
        Ok(())
    }

    /// Asks the renderer to bring `tag` on screen. Returns `false` for a tag
    /// the catalog does not hold.
    pub async fn ensure_visible(&self, tag: &str, animated: bool) -> bool {
        if !self.contains(tag).await {
            warn!(tag, "cannot scroll to unknown item type");
            return false;
        }
        self.renderer
            .scroll_to_visible(ScrollTarget::ItemType(tag.to_string()), animated);
        true
    }

    pub async fn focus_selected_type(&self, animated: bool) -> bool {
        let Some(tag) = self.selected_type().await else {
            return false;
        };
        self.ensure_visible(&tag, animated).await
    }

    pub async fn types(&self) -> Vec<MenuItemType> {
        self.inner.lock().await.types.clone()
    }

    pub async fn selected_type(&self) -> Option<String> {
        self.inner.lock().await.selected.clone()
    }

    pub async fn contains(&self, tag: &str) -> bool {
        self.inner.lock().await.types.iter().any(|ty| ty.tag == tag)
    }
}

/// Drops repeated tags (first wins) and moves standard types ahead of custom
/// ones, keeping fetch order within each group.
fn normalize_types(types: Vec<MenuItemType>) -> Vec<MenuItemType> {
    let mut seen = HashSet::new();
    let (standard, custom): (Vec<_>, Vec<_>) = types
        .into_iter()
        .filter(|ty| seen.insert(ty.tag.clone()))
        .partition(|ty| !ty.is_custom());
    standard.into_iter().chain(custom).collect()
}

#[cfg(test)]
#[path = "tests/type_catalog_tests.rs"]
mod tests;
