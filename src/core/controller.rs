//! Paged list controller
//!
//! Owns the [`PagedList`] state of one list view and performs the fetches it
//! asks for. Each accepted fetch runs as its own tokio task; its outcome comes
//! back through a channel and is applied by whoever owns the controller
//! (the app runner or a test), so all state changes happen on that single
//! logical thread.

use std::{future, sync::Arc};

use tokio::sync::mpsc;

use crate::{
    domain::{
        page::PageResult,
        source::{DataSource, TransportError},
    },
    model::{
        paged_list::{Message, PageRequest, PagedList, Phase, Update},
        performance::PerformanceRecorder,
    },
};

/// Result of one fetch, tagged with the request that produced it
#[derive(Debug, Clone)]
pub struct FetchOutcome<T> {
    pub request: PageRequest,
    pub result: Result<PageResult<T>, TransportError>,
}

/// Read-only view of the list handed to the renderer
#[derive(Debug, PartialEq, Eq)]
pub struct ListSnapshot<'a, T> {
    pub items: &'a [T],
    pub is_loading: bool,
    pub is_end: bool,
    pub phase: Phase,
}

impl<T> Clone for ListSnapshot<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ListSnapshot<'_, T> {}

impl<T> ListSnapshot<'_, T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub struct PagedListController<S: DataSource> {
    source: Arc<S>,
    list: PagedList<S::Item>,
    recorder: Option<PerformanceRecorder>,
    outcome_tx: mpsc::UnboundedSender<FetchOutcome<S::Item>>,
    outcome_rx: mpsc::UnboundedReceiver<FetchOutcome<S::Item>>,
    in_flight: usize,
}

impl<S: DataSource> PagedListController<S> {
    pub fn new(source: Arc<S>, page_size: u32, fallback: Vec<S::Item>) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            source,
            list: PagedList::new(page_size, fallback),
            recorder: None,
            outcome_tx,
            outcome_rx,
            in_flight: 0,
        }
    }

    /// Report first-data timing to `recorder`
    pub fn with_recorder(mut self, recorder: PerformanceRecorder) -> Self {
        self.recorder = Some(recorder);
        self
    }

    pub fn recorder(&self) -> Option<&PerformanceRecorder> {
        self.recorder.as_ref()
    }

    pub fn snapshot(&self) -> ListSnapshot<'_, S::Item> {
        ListSnapshot {
            items: self.list.items(),
            is_loading: self.list.is_loading(),
            is_end: self.list.is_end(),
            phase: self.list.phase(),
        }
    }

    pub fn state(&self) -> &PagedList<S::Item> {
        &self.list
    }

    /// Number of fetches whose outcome has not been received yet, stale ones
    /// included
    pub fn pending(&self) -> usize {
        self.in_flight
    }

    /// Load the first page. Only the first call per lifetime (or per reset)
    /// has an effect.
    pub fn initialize(&mut self) -> bool {
        if let Some(recorder) = &self.recorder {
            if !recorder.is_started() {
                recorder.start();
            }
        }
        self.dispatch(Message::Initialized)
    }

    /// Load the next page unless a fetch is in flight or the end was reached
    pub fn request_more(&mut self) -> bool {
        self.dispatch(Message::MoreRequested)
    }

    /// Drop everything and load the first page again.
    ///
    /// A fetch still in flight is not cancelled; its outcome is discarded
    /// when it arrives.
    pub fn reset(&mut self) -> bool {
        if let Some(recorder) = &self.recorder {
            recorder.start();
        }
        self.dispatch(Message::ResetRequested)
    }

    /// Wait for the next fetch outcome and apply it.
    ///
    /// Returns `None` when nothing is in flight, otherwise whether the
    /// outcome changed the state (`false` for a stale one).
    pub async fn settle(&mut self) -> Option<bool> {
        if self.in_flight == 0 {
            return None;
        }
        let outcome = self.outcome_rx.recv().await?;
        self.in_flight -= 1;
        Some(self.apply(outcome))
    }

    /// Wait for the next fetch outcome without applying it.
    ///
    /// Never resolves while nothing is in flight, which makes it usable as a
    /// `tokio::select!` branch.
    pub async fn next_outcome(&mut self) -> FetchOutcome<S::Item> {
        if self.in_flight > 0 {
            if let Some(outcome) = self.outcome_rx.recv().await {
                self.in_flight -= 1;
                return outcome;
            }
        }
        future::pending().await
    }

    /// Merge a fetch outcome into the list. Returns `false` if it belonged to
    /// an earlier generation and was dropped.
    pub fn apply(&mut self, outcome: FetchOutcome<S::Item>) -> bool {
        let FetchOutcome { request, result } = outcome;
        let was_empty = self.list.is_empty();

        let message = match result {
            Ok(result) => {
                if result.items.is_empty() && !result.is_end {
                    log::warn!(
                        "page {} came back empty without an end marker",
                        request.page
                    );
                }
                Message::PageLoaded { request, result }
            }
            Err(error) => {
                log::warn!("fetching page {} failed: {error}", request.page);
                Message::PageFailed { request, error }
            }
        };

        match self.list.update(message) {
            Update::Ignored => {
                log::debug!(
                    "dropping page {} of generation {} (current generation {})",
                    request.page,
                    request.generation,
                    self.list.generation()
                );
                false
            }
            Update::Applied | Update::Fetch(_) => {
                let phase = self.list.phase();
                if was_empty && !self.list.is_empty() && phase != Phase::FailedFallback {
                    if let Some(recorder) = &self.recorder {
                        recorder.mark_first_data(self.list.len());
                    }
                }
                if phase == Phase::FailedFallback {
                    log::info!("showing {} fallback items", self.list.len());
                } else if self.list.is_end() {
                    log::info!("end of list reached with {} items", self.list.len());
                }
                true
            }
        }
    }

    fn dispatch(&mut self, message: Message<S::Item>) -> bool {
        match self.list.update(message) {
            Update::Fetch(request) => {
                self.request_page(request);
                true
            }
            Update::Applied | Update::Ignored => {
                log::debug!(
                    "load request ignored (loading: {}, end: {})",
                    self.list.is_loading(),
                    self.list.is_end()
                );
                false
            }
        }
    }

    fn request_page(&mut self, request: PageRequest) {
        log::debug!(
            "fetching page {} (size {}, generation {})",
            request.page,
            request.page_size,
            request.generation
        );

        let source = Arc::clone(&self.source);
        let outcome_tx = self.outcome_tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let result = source.fetch_page(request.page, request.page_size).await;
            // the controller may be gone already; the outcome is dropped then
            let _ = outcome_tx.send(FetchOutcome { request, result });
        });
    }
}
