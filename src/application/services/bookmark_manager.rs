// src/application/services/bookmark_manager.rs
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::view_engine::{VisibleList, ViewEngine};
use crate::domain::bookmark::BookmarkRecord;
use crate::domain::error::DomainError;
use crate::domain::repositories::store::{BookmarkChange, BookmarkStore, DEFAULT_PARENT_ID};
use crate::domain::view_state::ViewStatePatch;
use crate::util::validation::{ValidationHelper, DEFAULT_MAX_TITLE_LENGTH};
use std::sync::Arc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerOptions {
    /// Folder new bookmarks go to when no parent is chosen
    pub default_parent_id: String,
    pub max_title_length: usize,
}

impl Default for ManagerOptions {
    fn default() -> Self {
        Self {
            default_parent_id: DEFAULT_PARENT_ID.to_string(),
            max_title_length: DEFAULT_MAX_TITLE_LENGTH,
        }
    }
}

/// Connects a [`BookmarkStore`] to a [`ViewEngine`].
///
/// Mutations go to the store only after validation; the in-memory view is never updated
/// optimistically but reloaded from a fresh snapshot once the store has accepted the change.
#[derive(Debug)]
pub struct BookmarkManager {
    store: Arc<dyn BookmarkStore>,
    engine: ViewEngine,
    options: ManagerOptions,
}

impl BookmarkManager {
    pub fn new(store: Arc<dyn BookmarkStore>, engine: ViewEngine, options: ManagerOptions) -> Self {
        Self {
            store,
            engine,
            options,
        }
    }

    pub fn engine(&self) -> &ViewEngine {
        &self.engine
    }

    pub fn visible(&self) -> &VisibleList {
        self.engine.visible()
    }

    pub fn set_filter(&mut self, patch: ViewStatePatch) -> &VisibleList {
        self.engine.set_filter(patch)
    }

    pub fn reset_filters(&mut self) -> &VisibleList {
        self.engine.reset_filters()
    }

    /// Fetch a full snapshot and make it the base set
    #[instrument(skip(self), level = "debug")]
    pub async fn refresh(&mut self) -> ApplicationResult<&VisibleList> {
        let ticket = self.engine.request_refresh();
        let snapshot = self.store.fetch_tree().await;
        self.engine.complete_refresh(ticket, snapshot)?;
        Ok(self.engine.visible())
    }

    /// React to a store notification by reloading everything
    #[instrument(skip(self), level = "debug", fields(kind = %change.kind, id = %change.id))]
    pub async fn handle_change(&mut self, change: BookmarkChange) -> ApplicationResult<&VisibleList> {
        info!("Bookmark {} {}, reloading", change.id, change.kind);
        self.refresh().await
    }

    /// Handle every notification already queued on `changes`; returns how many were handled
    pub async fn sync_pending(
        &mut self,
        changes: &mut UnboundedReceiver<BookmarkChange>,
    ) -> ApplicationResult<usize> {
        let mut handled = 0;
        loop {
            match changes.try_recv() {
                Ok(change) => {
                    self.handle_change(change).await?;
                    handled += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        Ok(handled)
    }

    /// Handle notifications until the store drops its sender.
    ///
    /// Fetch failures do not end the loop; they leave the engine in its error state until
    /// the next notification succeeds.
    pub async fn watch(&mut self, mut changes: UnboundedReceiver<BookmarkChange>) {
        while let Some(change) = changes.recv().await {
            if let Err(e) = self.handle_change(change).await {
                warn!("Reload after change failed: {}", e);
            }
        }
        debug!("Change stream closed");
    }

    /// Validate and create a bookmark, then reload
    #[instrument(skip(self), level = "debug")]
    pub async fn create_bookmark(
        &mut self,
        title: &str,
        url: &str,
        parent_id: Option<&str>,
    ) -> ApplicationResult<BookmarkRecord> {
        let (title, url) = ValidationHelper::validate_new_bookmark(title, url)?;
        let parent_id = parent_id
            .filter(|p| !p.is_empty())
            .unwrap_or(&self.options.default_parent_id)
            .to_string();

        let record = self
            .store
            .create_bookmark(&title, &url, Some(&parent_id))
            .await
            .map_err(|e| ApplicationError::MutationFailed(e.to_string()))?;

        debug!("Created bookmark {} in folder {}", record.id, record.parent_id);
        self.reload_after_mutation().await;
        Ok(record)
    }

    /// Rename a bookmark. Returns `false` without contacting the store if the title is unchanged.
    #[instrument(skip(self), level = "debug")]
    pub async fn update_bookmark_title(&mut self, id: &str, title: &str) -> ApplicationResult<bool> {
        let title = ValidationHelper::validate_title(title, self.options.max_title_length)?;
        let current = self
            .engine
            .bookmark(id)
            .ok_or_else(|| ApplicationError::BookmarkNotFound(id.to_string()))?;

        if current.title == title {
            debug!("Title of {} unchanged, skipping update", id);
            return Ok(false);
        }

        self.store
            .update_bookmark_title(id, &title)
            .await
            .map_err(mutation_error)?;

        self.reload_after_mutation().await;
        Ok(true)
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn delete_bookmark(&mut self, id: &str) -> ApplicationResult<()> {
        self.store
            .delete_bookmark(id)
            .await
            .map_err(mutation_error)?;

        self.reload_after_mutation().await;
        Ok(())
    }

    // The mutation itself succeeded, a failed reload only shows up as engine error state.
    async fn reload_after_mutation(&mut self) {
        if let Err(e) = self.refresh().await {
            warn!("Reload after mutation failed: {}", e);
        }
    }
}

/// Ids the store does not know as a bookmark (including folder ids) are reported as not found
fn mutation_error(error: DomainError) -> ApplicationError {
    match error {
        DomainError::BookmarkNotFound(id) => ApplicationError::BookmarkNotFound(id),
        other => ApplicationError::MutationFailed(other.to_string()),
    }
}
