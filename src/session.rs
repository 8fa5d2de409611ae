//! Finder session state machine.
//!
//! All interaction state (query text, selected facets, current page, the
//! latest result set) lives in [`FinderState`] and changes only through
//! [`update`], a pure `(state, event) -> (state, request)` transition.
//!
//! Every submitted search gets a generation number. A completion whose
//! generation is not the latest is dropped, so a slow response can never
//! overwrite a newer result set or a cleared screen.
//!
//! ```text
//!          SubmitSearch            SearchFinished(gen == latest)
//! Idle ───────────────► Loading ─────────────────────────────► Results | Empty | Failed
//!   ▲                      │ SubmitSearch (short query)
//!   │ Clear                ▼
//!   └──────────────────  Empty
//! ```

use gh_search::pagination::{self, Page};
use gh_search::{
    BranchFailure, FilterKey, ResultItem, SearchBackend, SearchConfig, SearchOutcome,
    SelectedFilterSet,
};

/// What the result area should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    /// Nothing searched yet, or cleared.
    Idle,
    /// A search is in flight.
    Loading,
    /// At least one result.
    Results,
    /// Search finished (or was rejected) with nothing to show.
    Empty,
    /// Search finished with nothing to show and at least one branch failed.
    Failed,
}

/// Input to [`update`].
#[derive(Debug, Clone, PartialEq)]
pub enum FinderEvent {
    SetQuery(String),
    ToggleFilter(FilterKey),
    SubmitSearch,
    SearchFinished {
        generation: u64,
        outcome: SearchOutcome,
    },
    GoToPage(usize),
    NextPage,
    PreviousPage,
    Clear,
}

/// A search the caller should run and report back with
/// [`FinderEvent::SearchFinished`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub generation: u64,
    pub query: String,
    pub filters: SelectedFilterSet,
}

/// Complete interaction state.
#[derive(Debug, Clone, PartialEq)]
pub struct FinderState {
    pub query: String,
    pub filters: SelectedFilterSet,
    /// Current 1-based page.
    pub page: usize,
    pub page_size: usize,
    pub min_query_len: usize,
    /// Generation of the latest submitted search.
    pub generation: u64,
    pub display: DisplayState,
    pub items: Vec<ResultItem>,
    pub failures: Vec<BranchFailure>,
}

/// Facets selected when a session starts.
pub fn default_filters() -> SelectedFilterSet {
    SelectedFilterSet::from([FilterKey::Username, FilterKey::Name])
}

impl FinderState {
    pub fn new(page_size: usize, min_query_len: usize) -> Self {
        Self {
            query: String::new(),
            filters: default_filters(),
            page: 1,
            page_size: page_size.max(1),
            min_query_len,
            generation: 0,
            display: DisplayState::Idle,
            items: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// The slice of results on the current page.
    pub fn current_page(&self) -> Page<'_, ResultItem> {
        pagination::paginate(&self.items, self.page, self.page_size)
    }

    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.items.len(), self.page_size)
    }

    /// Match score of `item` against the current selection.
    pub fn match_score(&self, item: &ResultItem) -> u8 {
        gh_search::item_match_score(item, &self.filters)
    }

    fn reset_results(&mut self) {
        self.items.clear();
        self.failures.clear();
        self.page = 1;
    }
}

impl Default for FinderState {
    fn default() -> Self {
        Self::new(pagination::DEFAULT_PAGE_SIZE, SearchConfig::default().min_query_len)
    }
}

/// Apply `event` to `state`.
///
/// Returns the next state and, for an accepted [`FinderEvent::SubmitSearch`],
/// the search the caller must run.
pub fn update(mut state: FinderState, event: FinderEvent) -> (FinderState, Option<SearchRequest>) {
    match event {
        FinderEvent::SetQuery(query) => {
            state.query = query;
            (state, None)
        }
        FinderEvent::ToggleFilter(key) => {
            if !state.filters.remove(&key) {
                state.filters.insert(key);
            }
            (state, None)
        }
        FinderEvent::SubmitSearch => {
            state.generation += 1;
            state.reset_results();
            let query = state.query.trim().to_string();
            if query.chars().count() < state.min_query_len {
                state.display = DisplayState::Empty;
                return (state, None);
            }
            state.display = DisplayState::Loading;
            let request = SearchRequest {
                generation: state.generation,
                query,
                filters: state.filters.clone(),
            };
            (state, Some(request))
        }
        FinderEvent::SearchFinished {
            generation,
            outcome,
        } => {
            if generation != state.generation || state.display != DisplayState::Loading {
                tracing::debug!(
                    generation,
                    latest = state.generation,
                    "discarding stale search result"
                );
                return (state, None);
            }
            state.display = if !outcome.items.is_empty() {
                DisplayState::Results
            } else if outcome.failures.is_empty() {
                DisplayState::Empty
            } else {
                DisplayState::Failed
            };
            state.items = outcome.items;
            state.failures = outcome.failures;
            state.page = 1;
            (state, None)
        }
        FinderEvent::GoToPage(page) => {
            state.page = pagination::clamp_page(page, state.total_pages());
            (state, None)
        }
        FinderEvent::NextPage => {
            let next = state.page.saturating_add(1);
            update(state, FinderEvent::GoToPage(next))
        }
        FinderEvent::PreviousPage => {
            let previous = state.page.saturating_sub(1);
            update(state, FinderEvent::GoToPage(previous))
        }
        FinderEvent::Clear => {
            state.generation += 1;
            state.query.clear();
            state.reset_results();
            state.display = DisplayState::Idle;
            (state, None)
        }
    }
}

/// Run `request` against `backend` and wrap the outcome as the completion event.
pub async fn execute<B: SearchBackend>(
    backend: &B,
    request: &SearchRequest,
    config: &SearchConfig,
) -> FinderEvent {
    let outcome = gh_search::search_with(backend, &request.query, &request.filters, config).await;
    FinderEvent::SearchFinished {
        generation: request.generation,
        outcome,
    }
}
