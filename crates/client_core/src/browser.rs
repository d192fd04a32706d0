//! Client-side view state over one fetched batch.
//!
//! `BrowserState` owns the in-memory character list plus the user-applied
//! search/sort/filter/pagination state. The visible set is never stored;
//! [`derive_visible`] recomputes it from the full state tuple, so the
//! operations below cannot interleave into order-dependent results.

use chrono::{DateTime, Utc};
use shared::{
    domain::{SortKey, StatusFilter},
    error::FetchError,
    protocol::Character,
};

/// Page sizes the rendering surface offers.
pub const PAGE_SIZE_OPTIONS: [usize; 6] = [5, 10, 20, 50, 100, 250];

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Load lifecycle of the batch. `Ready` and `Error` re-enter `Loading`
/// only through an explicit [`BrowserState::begin_load`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Ready,
    Error(String),
}

#[derive(Debug, Clone)]
pub struct BrowserState {
    all: Vec<Character>,
    search_term: String,
    status_filter: StatusFilter,
    sort_key: Option<SortKey>,
    page_index: usize,
    page_size: usize,
    selected: Option<Character>,
    phase: LoadPhase,
    generation: u64,
    loaded_at: Option<DateTime<Utc>>,
}

impl Default for BrowserState {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserState {
    pub fn new() -> Self {
        Self {
            all: Vec::new(),
            search_term: String::new(),
            status_filter: StatusFilter::All,
            sort_key: None,
            page_index: 1,
            page_size: DEFAULT_PAGE_SIZE,
            selected: None,
            phase: LoadPhase::Idle,
            generation: 0,
            loaded_at: None,
        }
    }

    /// Enters `Loading`, clearing any prior error, and returns the token a
    /// matching [`finish_load`](Self::finish_load) must present. Calling
    /// this again while a load is in flight supersedes that load.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.phase = LoadPhase::Loading;
        self.generation
    }

    /// Applies a batch outcome. A result carrying a stale token is dropped
    /// (returns false) and leaves every field untouched; the load that
    /// superseded it is still in flight. On success the batch is replaced
    /// wholesale; on failure the prior batch stays and only the phase
    /// changes.
    pub fn finish_load(
        &mut self,
        generation: u64,
        outcome: Result<Vec<Character>, FetchError>,
    ) -> bool {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "discarding superseded batch result"
            );
            return false;
        }

        match outcome {
            Ok(characters) => {
                tracing::info!(count = characters.len(), "batch loaded");
                self.all = characters;
                self.loaded_at = Some(Utc::now());
                self.phase = LoadPhase::Ready;
            }
            Err(err) => {
                tracing::error!("batch load failed: {err}");
                self.phase = LoadPhase::Error(err.to_string());
            }
        }
        true
    }

    pub fn apply_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn apply_status_filter(&mut self, filter: StatusFilter) {
        self.status_filter = filter;
    }

    pub fn apply_sort(&mut self, key: SortKey) {
        self.sort_key = Some(key);
    }

    /// Records the new page size. The page index is deliberately left
    /// alone even when it now points past the last page; see
    /// [`visible_page`](Self::visible_page).
    pub fn set_page_size(&mut self, size: usize) {
        self.page_size = size.max(1);
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.page_index = page.clamp(1, self.total_pages());
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.page_index + 1);
    }

    pub fn prev_page(&mut self) {
        self.go_to_page(self.page_index.saturating_sub(1));
    }

    /// Stores the activated row. No check that it is still part of the
    /// batch; a reload leaves the selection in place.
    pub fn select(&mut self, character: Character) {
        self.selected = Some(character);
    }

    /// The visible set: search and status filter composed over the batch,
    /// then the active sort.
    pub fn visible(&self) -> Vec<Character> {
        derive_visible(
            &self.all,
            &self.search_term,
            &self.status_filter,
            self.sort_key,
        )
    }

    pub fn total_pages(&self) -> usize {
        self.visible().len().div_ceil(self.page_size).max(1)
    }

    /// The slice of the visible set for the current page. Empty when the
    /// window starts past the end, which is reachable after a page-size
    /// change.
    pub fn visible_page(&self) -> Vec<Character> {
        let visible = self.visible();
        let start = (self.page_index - 1) * self.page_size;
        if start >= visible.len() {
            return Vec::new();
        }
        let end = (start + self.page_size).min(visible.len());
        visible[start..end].to_vec()
    }

    pub fn all(&self) -> &[Character] {
        &self.all
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn status_filter(&self) -> &StatusFilter {
        &self.status_filter
    }

    pub fn sort_key(&self) -> Option<SortKey> {
        self.sort_key
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn selected(&self) -> Option<&Character> {
        self.selected.as_ref()
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }
}

/// Pure derivation of the visible set from the full state tuple. The sort
/// is stable, ascending, on case-insensitive keys.
pub fn derive_visible(
    all: &[Character],
    search_term: &str,
    status_filter: &StatusFilter,
    sort_key: Option<SortKey>,
) -> Vec<Character> {
    let needle = search_term.to_lowercase();
    let mut visible: Vec<Character> = all
        .iter()
        .filter(|character| needle.is_empty() || character.name.to_lowercase().contains(&needle))
        .filter(|character| match status_filter {
            StatusFilter::All => true,
            StatusFilter::Only(status) => character.status == *status,
        })
        .cloned()
        .collect();

    if let Some(key) = sort_key {
        visible.sort_by_cached_key(|character| sort_field(character, key).to_lowercase());
    }
    visible
}

fn sort_field(character: &Character, key: SortKey) -> &str {
    match key {
        SortKey::Name => &character.name,
        SortKey::Status => &character.status,
        SortKey::Species => &character.species,
    }
}

#[cfg(test)]
#[path = "tests/browser_tests.rs"]
mod tests;
