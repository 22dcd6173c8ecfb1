// src/application/services/view_engine.rs
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::bookmark::FlatBookmark;
use crate::domain::clock::Clock;
use crate::domain::error::DomainResult;
use crate::domain::flatten::{Flattened, TreeFlattener};
use crate::domain::folder::FolderList;
use crate::domain::repositories::query::BookmarkQuery;
use crate::domain::tree::TreeNode;
use crate::domain::view_state::{DateFilter, SortKey, ViewState, ViewStatePatch};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument, trace, warn};

/// Lifecycle of the base set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineState {
    /// Base set loaded and visible list current
    Idle,
    /// A snapshot fetch is in flight; the previous base set is still shown
    Loading,
    /// The last fetch failed; any earlier base set is kept but stale
    Error(String),
}

/// Identifies one snapshot request. Only the most recently issued ticket may replace the base set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

impl RefreshTicket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The snapshot became the new base set
    Applied,
    /// A newer request was issued meanwhile; the response was dropped
    Superseded,
}

/// What the rendering side displays
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleList {
    pub items: Vec<FlatBookmark>,
    pub total_count: usize,
    pub filtered_count: usize,
    pub is_filtered: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeStats {
    pub bookmark_count: usize,
    pub folder_count: usize,
}

/// Holds the flattened base set and the view state, and derives the visible list from them.
///
/// Every state change recomputes the visible list from the full base set. Change
/// notifications are never patched in; they lead to a new snapshot via
/// [`ViewEngine::request_refresh`] / [`ViewEngine::complete_refresh`].
pub struct ViewEngine {
    flattener: TreeFlattener,
    clock: Arc<dyn Clock>,
    state: EngineState,
    view_state: ViewState,
    initial_view_state: ViewState,
    base: Flattened,
    loaded: bool,
    visible: VisibleList,
    last_issued: u64,
}

impl fmt::Debug for ViewEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewEngine")
            .field("state", &self.state)
            .field("view_state", &self.view_state)
            .field("bookmarks", &self.base.bookmarks.len())
            .field("folders", &self.base.folders.len())
            .field("last_issued", &self.last_issued)
            .finish()
    }
}

impl ViewEngine {
    pub fn new(flattener: TreeFlattener, clock: Arc<dyn Clock>) -> Self {
        Self::with_view_state(flattener, clock, ViewState::default())
    }

    pub fn with_view_state(
        flattener: TreeFlattener,
        clock: Arc<dyn Clock>,
        view_state: ViewState,
    ) -> Self {
        Self {
            flattener,
            clock,
            state: EngineState::Idle,
            initial_view_state: view_state.clone(),
            view_state,
            base: Flattened::default(),
            loaded: false,
            visible: VisibleList::default(),
            last_issued: 0,
        }
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    pub fn visible(&self) -> &VisibleList {
        &self.visible
    }

    /// True once any snapshot has been applied
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// The base set in traversal order
    pub fn bookmarks(&self) -> &[FlatBookmark] {
        &self.base.bookmarks
    }

    pub fn bookmark(&self, id: &str) -> Option<&FlatBookmark> {
        self.base.bookmarks.iter().find(|b| b.id == id)
    }

    /// Start a snapshot fetch. The caller fetches and hands the result to `complete_refresh`.
    #[instrument(skip(self), level = "debug")]
    pub fn request_refresh(&mut self) -> RefreshTicket {
        self.last_issued += 1;
        self.state = EngineState::Loading;
        debug!("Issued refresh #{}", self.last_issued);
        RefreshTicket(self.last_issued)
    }

    /// Apply the outcome of a fetch started with `ticket`.
    ///
    /// Responses for anything but the latest ticket are dropped, whether they succeeded or
    /// failed. A failed fetch leaves the base set untouched.
    #[instrument(skip(self, snapshot), level = "debug", fields(seq = ticket.seq()))]
    pub fn complete_refresh(
        &mut self,
        ticket: RefreshTicket,
        snapshot: DomainResult<Vec<TreeNode>>,
    ) -> ApplicationResult<RefreshOutcome> {
        if ticket.0 != self.last_issued {
            debug!(
                "Discarding response for refresh #{}, latest is #{}",
                ticket.0, self.last_issued
            );
            return Ok(RefreshOutcome::Superseded);
        }

        match snapshot {
            Ok(roots) => {
                self.replace_base(&roots);
                Ok(RefreshOutcome::Applied)
            }
            Err(e) => {
                warn!("Failed to load bookmarks: {}", e);
                let message = e.to_string();
                self.state = EngineState::Error(message.clone());
                Err(ApplicationError::FetchFailed(message))
            }
        }
    }

    /// Replace the base set with an already available snapshot
    pub fn load(&mut self, roots: &[TreeNode]) -> &VisibleList {
        self.last_issued += 1;
        self.replace_base(roots);
        &self.visible
    }

    fn replace_base(&mut self, roots: &[TreeNode]) {
        self.base = self.flattener.flatten(roots);
        self.loaded = true;
        self.state = EngineState::Idle;
        self.recompute();
    }

    /// Merge `patch` into the view state and recompute
    #[instrument(skip(self), level = "debug")]
    pub fn set_filter(&mut self, patch: ViewStatePatch) -> &VisibleList {
        self.view_state.apply(patch);
        self.recompute();
        &self.visible
    }

    /// Back to the view state the engine was created with
    pub fn reset_filters(&mut self) -> &VisibleList {
        self.view_state = self.initial_view_state.clone();
        self.recompute();
        &self.visible
    }

    /// Folders for navigation, shallow first then by name
    pub fn folders(&self) -> FolderList {
        FolderList::from_map(&self.base.folders)
    }

    pub fn stats(&self) -> TreeStats {
        TreeStats {
            bookmark_count: self.base.bookmarks.len(),
            folder_count: self.base.folders.len(),
        }
    }

    /// Bookmarks added during the last week, newest first, regardless of the active filters
    pub fn recent(&self) -> Vec<FlatBookmark> {
        let state = ViewState {
            date_filter: DateFilter::Week,
            sort_key: SortKey::DateDesc,
            ..ViewState::default()
        };
        BookmarkQuery::from_view_state(&state, self.clock.now_millis()).execute(&self.base.bookmarks)
    }

    fn recompute(&mut self) {
        let now = self.clock.now_millis();
        let items =
            BookmarkQuery::from_view_state(&self.view_state, now).execute(&self.base.bookmarks);

        trace!(
            "Recomputed visible list: {} of {}",
            items.len(),
            self.base.bookmarks.len()
        );
        self.visible = VisibleList {
            total_count: self.base.bookmarks.len(),
            filtered_count: items.len(),
            is_filtered: self.view_state.is_filtered(),
            items,
        };
    }
}
