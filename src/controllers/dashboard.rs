//! Dashboard: paginated daily progress plus the selected day

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::paginated::{PageFetcher, PageState, PageTicket};
use crate::error::Result;
use crate::progress::{DailyProgressEntry, ProgressClient, WeekSummary};
use crate::types::PageRequest;

#[async_trait]
impl PageFetcher<DailyProgressEntry> for ProgressClient {
    async fn fetch_page(&self, page: PageRequest) -> Result<Vec<DailyProgressEntry>> {
        self.list(page).await
    }
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub entries: PageState<DailyProgressEntry>,

    /// Pull-to-refresh in progress
    pub refreshing: bool,

    /// Silent reload after a meal was added, edited or deleted
    pub is_refetching_after_change: bool,

    /// Day shown in the detail pane
    pub selected_date: Option<NaiveDate>,
}

impl Default for DashboardState {
    fn default() -> Self {
        let mut entries = PageState::default();
        // Nothing has been fetched yet; avoid showing an empty list.
        entries.loading = true;
        Self {
            entries,
            refreshing: false,
            is_refetching_after_change: false,
            selected_date: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReplaceMode {
    Initial,
    PullToRefresh,
    AfterMealChange,
}

pub struct DashboardController<F = ProgressClient> {
    fetcher: F,
    page_size: u32,
    state: Mutex<DashboardState>,
}

impl<F: PageFetcher<DailyProgressEntry>> DashboardController<F> {
    pub fn new(fetcher: F, page_size: u32) -> Self {
        Self {
            fetcher,
            page_size: page_size.max(1),
            state: Mutex::new(DashboardState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DashboardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> DashboardState {
        self.lock().clone()
    }

    pub fn entries(&self) -> Vec<DailyProgressEntry> {
        self.lock().entries.items.clone()
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.lock().selected_date
    }

    /// First fetch after the view opens
    pub async fn load_initial(&self) {
        self.replace_first_page(ReplaceMode::Initial).await;
    }

    /// Pull-to-refresh; errors are shown
    pub async fn refresh(&self) {
        self.replace_first_page(ReplaceMode::PullToRefresh).await;
    }

    /// Reload page one after a meal changed elsewhere. Errors are logged and
    /// the current list stays on screen.
    pub async fn refetch_after_meal_change(&self) {
        self.replace_first_page(ReplaceMode::AfterMealChange).await;
    }

    pub async fn load_more(&self) {
        let ticket = {
            let mut state = self.lock();
            match state.entries.begin_append(self.page_size) {
                Some(ticket) => ticket,
                None => return,
            }
        };

        let result = self.fetcher.fetch_page(ticket.page).await;

        self.lock().entries.finish_append(&ticket, result);
    }

    pub fn select_day(&self, date: NaiveDate) {
        self.lock().selected_date = Some(date);
    }

    pub fn clear_selection(&self) {
        self.lock().selected_date = None;
    }

    /// Back to the initial state, keeping nothing. No request is made.
    pub fn reset(&self) {
        let mut state = self.lock();
        state.entries.reset();
        state.entries.loading = true;
        state.refreshing = false;
        state.is_refetching_after_change = false;
        state.selected_date = None;
    }

    /// Summary of the loaded entries for the week ending `today`
    pub fn week_summary(&self, today: NaiveDate) -> WeekSummary {
        WeekSummary::from_entries(&self.lock().entries.items, today)
    }

    fn begin(&self, mode: ReplaceMode) -> PageTicket {
        let mut state = self.lock();
        let ticket = state.entries.begin_replace(self.page_size);
        // A superseded replace never clears its own flag.
        state.refreshing = false;
        state.is_refetching_after_change = false;
        match mode {
            ReplaceMode::Initial => {
                state.entries.loading = true;
                state.entries.error = None;
            }
            ReplaceMode::PullToRefresh => {
                state.refreshing = true;
                state.entries.error = None;
            }
            ReplaceMode::AfterMealChange => {
                state.is_refetching_after_change = true;
            }
        }
        ticket
    }

    async fn replace_first_page(&self, mode: ReplaceMode) {
        let ticket = self.begin(mode);

        let result = self.fetcher.fetch_page(ticket.page).await;

        let mut state = self.lock();
        if !state.entries.is_current(&ticket) {
            debug!("dropping stale dashboard response ({:?})", mode);
            return;
        }
        match mode {
            ReplaceMode::Initial => state.entries.loading = false,
            ReplaceMode::PullToRefresh => state.refreshing = false,
            ReplaceMode::AfterMealChange => state.is_refetching_after_change = false,
        }

        match result {
            Ok(items) => state.entries.replace(&ticket, items),
            Err(e) if mode == ReplaceMode::AfterMealChange => {
                warn!("silent dashboard refetch failed: {}", e);
            }
            Err(e) => {
                warn!("dashboard fetch failed: {}", e);
                state.entries.error = Some(e.user_message());
            }
        }
    }
}
