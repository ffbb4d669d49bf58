use std::cell::RefCell;
use std::future::Future;

use crate::state::{Completion, ListState, LoadKind, Ticket};

/// Incrementally loads pages of `T` from `fetch_page` into one growing list.
///
/// The loader is single-threaded: state lives in a `RefCell` and no borrow is
/// held across the pending fetch, so the rendering layer can read a snapshot
/// at any time. Because every request needs a [`Ticket`] and only one ticket
/// is outstanding at once, pages are applied in increasing index order.
///
/// `fetch_page` receives the current dependency value (filters, ids) and a
/// zero-based page index. An empty page marks the end of the data; an `Err`
/// is stored in `last_error` and never returned to the caller.
pub struct PaginatedLoader<T, D, F> {
    state: RefCell<ListState<T>>,
    deps: RefCell<Option<D>>,
    fetch_page: F,
    observer: Option<Box<dyn Fn()>>,
}

impl<T, D, F, Fut> PaginatedLoader<T, D, F>
where
    D: PartialEq + Clone,
    F: Fn(D, u32) -> Fut,
    Fut: Future<Output = Result<Vec<T>, String>>,
{
    /// Create an idle loader. Nothing is fetched until [`Self::configure`]
    /// is called with the first dependency value.
    pub fn new(fetch_page: F) -> Self {
        Self {
            state: RefCell::new(ListState::default()),
            deps: RefCell::new(None),
            fetch_page,
            observer: None,
        }
    }

    /// Register a callback that runs after every state transition.
    pub fn with_observer(mut self, observer: impl Fn() + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Start a fresh load cycle if `deps` differs from the current
    /// dependency value. The first call always starts one.
    ///
    /// Returns whether a new cycle was started.
    pub async fn configure(&self, deps: D) -> bool {
        if self.deps.borrow().as_ref() == Some(&deps) {
            return false;
        }
        *self.deps.borrow_mut() = Some(deps.clone());
        self.restart(LoadKind::Initial, deps).await;
        true
    }

    /// Throw away the list and fetch page 0 again with the current
    /// dependency value.
    pub async fn reload(&self) {
        let Some(deps) = self.deps() else {
            tracing::debug!("Reload requested before the loader was configured");
            return;
        };
        self.restart(LoadKind::Refresh, deps).await;
    }

    /// Fetch the next page and append it. Does nothing while another request
    /// is outstanding or once an empty page has been seen.
    pub async fn load_more(&self) {
        let Some(deps) = self.deps() else {
            return;
        };
        let ticket = self.state.borrow_mut().begin_load_more();
        let Some(ticket) = ticket else {
            return;
        };
        self.notify();
        self.fetch(ticket, deps).await;
    }

    /// Apply a local change to the loaded items without fetching.
    pub fn set_items<U>(&self, updater: U)
    where
        U: FnOnce(Vec<T>) -> Vec<T>,
    {
        self.state.borrow_mut().set_items(updater);
        self.notify();
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&ListState<T>) -> R) -> R {
        f(&self.state.borrow())
    }

    pub fn snapshot(&self) -> ListState<T>
    where
        T: Clone,
    {
        self.state.borrow().clone()
    }

    pub fn deps(&self) -> Option<D> {
        self.deps.borrow().clone()
    }

    async fn restart(&self, kind: LoadKind, deps: D) {
        let ticket = self.state.borrow_mut().begin_reset(kind);
        self.notify();
        self.fetch(ticket, deps).await;
    }

    async fn fetch(&self, ticket: Ticket, deps: D) {
        tracing::debug!(
            page = ticket.page,
            kind = ?ticket.kind,
            generation = ticket.generation,
            "Fetching page"
        );

        let result = (self.fetch_page)(deps, ticket.page).await;
        if let Err(e) = &result {
            tracing::warn!(page = ticket.page, "Failed to fetch page: {e}");
        }

        let completion = self.state.borrow_mut().complete(ticket, result);
        match completion {
            Completion::Applied => self.notify(),
            Completion::Stale => tracing::debug!(
                page = ticket.page,
                generation = ticket.generation,
                "Discarding page from a superseded load cycle"
            ),
        }
    }

    fn notify(&self) {
        if let Some(observer) = &self.observer {
            observer();
        }
    }
}
