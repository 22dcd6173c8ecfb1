// src/infrastructure/di/service_container.rs
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::{BookmarkManager, ManagerOptions, ViewEngine};
use crate::config::Settings;
use crate::domain::clock::{Clock, SystemClock};
use crate::domain::flatten::TreeFlattener;
use crate::domain::repositories::store::BookmarkStore;
use crate::domain::view_state::ViewState;
use crate::infrastructure::repositories::snapshot_store::SnapshotStore;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Production service container - single source of truth for service creation
pub struct ServiceContainer {
    pub store: Arc<dyn BookmarkStore>,
    pub clock: Arc<dyn Clock>,
    pub manager: BookmarkManager,
}

impl ServiceContainer {
    /// Create all services from `config`, opening the configured snapshot file
    #[instrument(skip(config), level = "debug")]
    pub fn new(config: &Settings) -> ApplicationResult<Self> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let store = Self::create_store(&config.store_path, clock.clone())?;
        Ok(Self::with_store(config, store, clock))
    }

    /// Wire the application services around an already constructed store
    pub fn with_store(config: &Settings, store: Arc<dyn BookmarkStore>, clock: Arc<dyn Clock>) -> Self {
        let flattener = TreeFlattener::new(config.root_folders.clone(), config.path_separator.as_str());
        let view_state = ViewState {
            sort_key: config.default_sort,
            ..ViewState::default()
        };
        let engine = ViewEngine::with_view_state(flattener, clock.clone(), view_state);
        let options = ManagerOptions {
            default_parent_id: config.default_parent_id.clone(),
            max_title_length: config.max_title_length,
        };
        let manager = BookmarkManager::new(store.clone(), engine, options);

        Self {
            store,
            clock,
            manager,
        }
    }

    fn create_store(store_path: &str, clock: Arc<dyn Clock>) -> ApplicationResult<Arc<dyn BookmarkStore>> {
        let path = Path::new(store_path);
        if !path.exists() {
            return Err(ApplicationError::Other(format!(
                "Bookmark store not found: {}. Set BOOKMARKX_STORE_PATH or create one with 'bookmarkx create-store <path>'",
                store_path
            )));
        }

        let store = SnapshotStore::open(path, clock)
            .map_err(|e| ApplicationError::Other(format!("Failed to open bookmark store: {}", e)))?;
        debug!("Opened bookmark store at {}", store_path);
        Ok(Arc::new(store))
    }
}

impl std::fmt::Debug for ServiceContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContainer")
            .field("store", &"Arc<dyn BookmarkStore>")
            .field("clock", &"Arc<dyn Clock>")
            .field("manager", &self.manager)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::domain::view_state::SortKey;
    use crate::infrastructure::repositories::snapshot_store::default_tree;

    #[test]
    fn given_missing_store_file_when_new_then_error() {
        let settings = Settings {
            store_path: "/nonexistent/bookmarks.json".to_string(),
            ..Settings::default()
        };

        assert!(ServiceContainer::new(&settings).is_err());
    }

    #[tokio::test]
    async fn given_settings_when_with_store_then_manager_uses_configured_sort() {
        let settings = Settings {
            default_sort: SortKey::TitleAsc,
            ..Settings::default()
        };
        let clock: Arc<dyn Clock> = Arc::new(FixedClock::new(0));
        let store = Arc::new(SnapshotStore::in_memory(default_tree(), clock.clone()));

        let mut container = ServiceContainer::with_store(&settings, store, clock);
        container.manager.refresh().await.unwrap();

        assert_eq!(container.manager.engine().view_state().sort_key, SortKey::TitleAsc);
        assert_eq!(container.manager.engine().stats().folder_count, 0);
    }
}
