//! Load-more / refresh / reset over any `limit`/`offset` list endpoint

use async_trait::async_trait;
use log::{debug, warn};
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::Result;
use crate::types::PageRequest;

/// Something that can fetch one page of `T`
#[async_trait]
pub trait PageFetcher<T>: Send + Sync {
    async fn fetch_page(&self, page: PageRequest) -> Result<Vec<T>>;
}

#[async_trait]
impl<T, F, Fut> PageFetcher<T> for F
where
    T: Send + 'static,
    F: Fn(PageRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<T>>> + Send + 'static,
{
    async fn fetch_page(&self, page: PageRequest) -> Result<Vec<T>> {
        (self)(page).await
    }
}

/// Identifies the request a response belongs to.
///
/// A response whose generation is older than the state's is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageTicket {
    pub page: PageRequest,
    generation: u64,
}

/// List state shared by the paginated controllers.
#[derive(Debug, Clone)]
pub struct PageState<T> {
    /// In fetch order
    pub items: Vec<T>,
    /// Number of items received so far; the offset of the next page
    pub offset: u32,
    pub has_more: bool,
    pub loading: bool,
    pub error: Option<String>,
    generation: u64,
}

impl<T> Default for PageState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            offset: 0,
            has_more: true,
            loading: false,
            error: None,
            generation: 0,
        }
    }
}

impl<T> PageState<T> {
    /// Start a load-more, or `None` when one is in flight or the list is exhausted
    pub(crate) fn begin_append(&mut self, page_size: u32) -> Option<PageTicket> {
        if self.loading || !self.has_more {
            return None;
        }
        self.loading = true;
        self.error = None;
        Some(PageTicket {
            page: PageRequest {
                limit: page_size,
                offset: self.offset,
            },
            generation: self.generation,
        })
    }

    /// Start a first-page fetch that will replace the list.
    ///
    /// Any load-more still in flight is superseded and will not clear
    /// `loading` itself, so it is cleared here.
    pub(crate) fn begin_replace(&mut self, page_size: u32) -> PageTicket {
        self.generation += 1;
        self.loading = false;
        PageTicket {
            page: PageRequest::first(page_size),
            generation: self.generation,
        }
    }

    pub(crate) fn is_current(&self, ticket: &PageTicket) -> bool {
        ticket.generation == self.generation
    }

    fn append(&mut self, ticket: &PageTicket, items: Vec<T>) {
        let returned = items.len();
        self.items.extend(items);
        self.offset += returned as u32;
        self.has_more = ticket.page.has_more(returned);
    }

    /// Replace the list with a first page.
    ///
    /// A load-more that started while this page was in flight carries an
    /// offset into the old list, so the generation moves on again and that
    /// response is dropped when it arrives.
    pub(crate) fn replace(&mut self, ticket: &PageTicket, items: Vec<T>) {
        let returned = items.len();
        self.items = items;
        self.offset = returned as u32;
        self.has_more = ticket.page.has_more(returned);
        self.generation += 1;
        self.loading = false;
    }

    /// Commit the outcome of a load-more started with `ticket`
    pub(crate) fn finish_append(&mut self, ticket: &PageTicket, result: Result<Vec<T>>) {
        if !self.is_current(ticket) {
            debug!("dropping stale page at offset {}", ticket.page.offset);
            return;
        }
        self.loading = false;
        match result {
            Ok(items) => self.append(ticket, items),
            Err(e) => {
                warn!("load_more failed: {}", e);
                self.error = Some(e.user_message());
            }
        }
    }

    /// Back to the initial state; in-flight responses become stale
    pub(crate) fn reset(&mut self) {
        let generation = self.generation + 1;
        *self = Self::default();
        self.generation = generation;
    }
}

/// Generic paginated list controller
pub struct PaginatedController<T, F> {
    fetcher: F,
    page_size: u32,
    state: Mutex<PageState<T>>,
}

impl<T, F> PaginatedController<T, F>
where
    T: Clone + Send + 'static,
    F: PageFetcher<T>,
{
    pub fn new(fetcher: F, page_size: u32) -> Self {
        Self {
            fetcher,
            page_size: page_size.max(1),
            state: Mutex::new(PageState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PageState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn state(&self) -> PageState<T> {
        self.lock().clone()
    }

    pub fn items(&self) -> Vec<T> {
        self.lock().items.clone()
    }

    pub fn loading(&self) -> bool {
        self.lock().loading
    }

    pub fn has_more(&self) -> bool {
        self.lock().has_more
    }

    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    /// Fetch the next page and append it.
    ///
    /// Does nothing while another load-more is in flight or after a short page.
    pub async fn load_more(&self) {
        let ticket = {
            let mut state = self.lock();
            match state.begin_append(self.page_size) {
                Some(ticket) => ticket,
                None => {
                    debug!("load_more skipped (loading={}, has_more={})", state.loading, state.has_more);
                    return;
                }
            }
        };

        let result = self.fetcher.fetch_page(ticket.page).await;

        self.lock().finish_append(&ticket, result);
    }

    /// Refetch the first page and replace the whole list with it
    pub async fn refresh(&self) {
        let ticket = {
            let mut state = self.lock();
            let ticket = state.begin_replace(self.page_size);
            state.loading = true;
            state.error = None;
            ticket
        };

        let result = self.fetcher.fetch_page(ticket.page).await;

        let mut state = self.lock();
        if !state.is_current(&ticket) {
            debug!("dropping stale refresh");
            return;
        }
        state.loading = false;
        match result {
            Ok(items) => state.replace(&ticket, items),
            Err(e) => {
                warn!("refresh failed: {}", e);
                state.error = Some(e.user_message());
            }
        }
    }

    /// Clear everything without a request
    pub fn reset(&self) {
        self.lock().reset();
    }
}
