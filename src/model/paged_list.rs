//! Paging state of an incrementally loaded list
//!
//! This module follows the Elm Architecture pattern:
//! - State changes only through the `update` function
//! - All transitions are explicitly defined as `Message` variants
//! - The module performs no I/O; it only tells the caller which page to fetch

use crate::domain::{page::PageResult, source::TransportError};

/// A fetch the caller has to perform on behalf of the list.
///
/// The generation tags the request so that a result arriving after a reset
/// can be recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub generation: u64,
    pub page: u32,
    pub page_size: u32,
}

/// Coarse state of the list, derived from the flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Nothing loaded and nothing in flight
    IdleEmpty,
    /// First fetch outstanding
    LoadingFirst,
    /// Has items, more may follow
    Ready,
    /// Has items (possibly none), the source is exhausted
    ReadyEnd,
    /// First fetch failed, fallback items installed
    FailedFallback,
    /// Subsequent fetch outstanding
    LoadingMore,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::ReadyEnd | Phase::FailedFallback)
    }
}

/// Messages that can be sent to update the paging state
///
/// Following Elm conventions, messages are named in past tense
/// to indicate "what happened" rather than "what to do"
#[derive(Debug, Clone)]
pub enum Message<T> {
    /// The list view mounted and wants its first page
    Initialized,
    /// The list view was scrolled close to its end
    MoreRequested,
    /// A refresh was requested; everything starts over
    ResetRequested,
    /// A fetch completed
    PageLoaded {
        request: PageRequest,
        result: PageResult<T>,
    },
    /// A fetch failed
    PageFailed {
        request: PageRequest,
        error: TransportError,
    },
}

/// What the caller has to do after an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    /// Issue exactly this fetch
    Fetch(PageRequest),
    /// State changed, nothing to fetch
    Applied,
    /// The message had no effect (gate closed or result of an old generation)
    Ignored,
}

/// Paging state: accumulated items plus the flags gating further fetches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedList<T> {
    items: Vec<T>,
    next_page: u32,
    page_size: u32,
    is_loading: bool,
    is_end: bool,
    generation: u64,
    initialized: bool,
    fallback_installed: bool,
    fallback: Vec<T>,
}

impl<T: Clone> PagedList<T> {
    /// Create an empty list fetching `page_size` items at a time.
    ///
    /// `fallback` replaces the (empty) contents when the first fetch fails.
    pub fn new(page_size: u32, fallback: Vec<T>) -> Self {
        Self {
            items: Vec::new(),
            next_page: 1,
            page_size: page_size.max(1),
            is_loading: false,
            is_end: false,
            generation: 0,
            initialized: false,
            fallback_installed: false,
            fallback,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_end(&self) -> bool {
        self.is_end
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> Phase {
        match (self.is_loading, self.items.is_empty()) {
            (true, true) => Phase::LoadingFirst,
            (true, false) => Phase::LoadingMore,
            (false, _) if self.fallback_installed => Phase::FailedFallback,
            (false, _) if self.is_end => Phase::ReadyEnd,
            (false, true) => Phase::IdleEmpty,
            (false, false) => Phase::Ready,
        }
    }

    /// Update the paging state based on a message
    ///
    /// This is the only way to modify the state. Request messages answer with
    /// [`Update::Fetch`] when the gate is open; completion messages of an
    /// older generation are answered with [`Update::Ignored`] and leave the
    /// state untouched.
    pub fn update(&mut self, message: Message<T>) -> Update {
        match message {
            Message::Initialized => {
                if self.initialized || self.is_loading {
                    return Update::Ignored;
                }
                self.initialized = true;
                Update::Fetch(self.begin_fetch(1))
            }
            Message::MoreRequested => {
                if self.is_loading || self.is_end {
                    return Update::Ignored;
                }
                // a first page pulled in by scrolling counts as the initial load
                self.initialized = true;
                Update::Fetch(self.begin_fetch(self.next_page))
            }
            Message::ResetRequested => {
                self.generation += 1;
                self.items.clear();
                self.next_page = 1;
                self.is_loading = false;
                self.is_end = false;
                self.fallback_installed = false;
                self.initialized = true;
                Update::Fetch(self.begin_fetch(1))
            }
            Message::PageLoaded { request, result } => {
                if !self.is_current(&request) {
                    return Update::Ignored;
                }
                self.is_loading = false;

                // An empty page that does not claim the end is a protocol
                // violation: no progress, not ended.
                if result.items.is_empty() && !result.is_end {
                    return Update::Applied;
                }

                let count = result.items.len();
                let short_page = count < request.page_size as usize;
                if count > 0 {
                    self.items.extend(result.items);
                    self.next_page = request.page + 1;
                }
                self.is_end = self.is_end || result.is_end || short_page;
                Update::Applied
            }
            Message::PageFailed { request, error: _ } => {
                if !self.is_current(&request) {
                    return Update::Ignored;
                }
                self.is_loading = false;
                self.is_end = true;
                if self.items.is_empty() {
                    self.items = self.fallback.clone();
                    self.fallback_installed = true;
                }
                Update::Applied
            }
        }
    }

    fn begin_fetch(&mut self, page: u32) -> PageRequest {
        self.is_loading = true;
        PageRequest {
            generation: self.generation,
            page,
            page_size: self.page_size,
        }
    }

    fn is_current(&self, request: &PageRequest) -> bool {
        self.is_loading && request.generation == self.generation
    }
}
