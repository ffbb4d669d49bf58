//! Pure state transitions for a paginated list.
//!
//! Nothing in here performs I/O. The async driver in [`crate::loader`] asks
//! for a [`Ticket`] before issuing a request and hands the ticket back with
//! the result, which lets the state reject completions from a load cycle that
//! has since been restarted.

/// Message stored in `last_error` when a fetch fails without saying why.
pub const FALLBACK_ERROR: &str = "Something went wrong while loading";

/// Which kind of request a ticket was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    /// First page after mount or a dependency change.
    Initial,
    /// First page after an explicit reload.
    Refresh,
    /// Any page after the first.
    More,
}

/// Identifies one outstanding request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub generation: u64,
    pub page: u32,
    pub kind: LoadKind,
}

/// What happened when a result was handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The ticket no longer matches the in-flight request; the result was
    /// dropped.
    Stale,
}

/// Snapshot of a paginated list as the rendering layer sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    pub items: Vec<T>,
    /// Index of the last page applied to `items`.
    pub current_page: u32,
    pub has_more: bool,
    pub is_initial_loading: bool,
    pub is_loading_more: bool,
    pub is_refreshing: bool,
    pub last_error: Option<String>,
    generation: u64,
    /// Page index the next "load more" asks for. Stays at 0 until the first
    /// page has been applied, so a failed first page is retried.
    next_page: u32,
    in_flight: Option<Ticket>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current_page: 0,
            has_more: true,
            is_initial_loading: false,
            is_loading_more: false,
            is_refreshing: false,
            last_error: None,
            generation: 0,
            next_page: 0,
            in_flight: None,
        }
    }
}

impl<T> ListState<T> {
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// True while the list is empty because its first page hasn't arrived.
    pub fn is_blank_loading(&self) -> bool {
        (self.is_initial_loading || self.is_refreshing) && self.items.is_empty()
    }

    pub fn in_flight(&self) -> Option<Ticket> {
        self.in_flight
    }

    /// Discard everything and start a new load cycle at page 0.
    ///
    /// Any request still outstanding from the previous cycle becomes stale.
    pub fn begin_reset(&mut self, kind: LoadKind) -> Ticket {
        debug_assert!(kind != LoadKind::More);
        self.generation += 1;
        self.items.clear();
        self.current_page = 0;
        self.next_page = 0;
        self.has_more = true;
        self.last_error = None;
        self.is_initial_loading = kind == LoadKind::Initial;
        self.is_refreshing = kind == LoadKind::Refresh;
        self.is_loading_more = false;

        let ticket = Ticket {
            generation: self.generation,
            page: 0,
            kind,
        };
        self.in_flight = Some(ticket);
        ticket
    }

    /// Ask for the next page. Returns `None` when a request is already
    /// outstanding or the list is exhausted.
    pub fn begin_load_more(&mut self) -> Option<Ticket> {
        if self.in_flight.is_some() || !self.has_more {
            return None;
        }
        self.is_loading_more = true;

        let ticket = Ticket {
            generation: self.generation,
            page: self.next_page,
            kind: LoadKind::More,
        };
        self.in_flight = Some(ticket);
        Some(ticket)
    }

    /// Apply the outcome of the request identified by `ticket`.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<T>, String>,
    ) -> Completion {
        if self.in_flight != Some(ticket) {
            return Completion::Stale;
        }
        self.in_flight = None;

        match ticket.kind {
            LoadKind::Initial => self.is_initial_loading = false,
            LoadKind::Refresh => self.is_refreshing = false,
            LoadKind::More => self.is_loading_more = false,
        }

        match result {
            Ok(page) => {
                self.has_more = !page.is_empty();
                if !page.is_empty() {
                    self.current_page = ticket.page;
                    self.next_page = ticket.page + 1;
                }
                if ticket.kind == LoadKind::More {
                    self.items.extend(page);
                } else {
                    self.items = page;
                }
                self.last_error = None;
            }
            Err(message) => {
                let message = if message.trim().is_empty() {
                    FALLBACK_ERROR.to_string()
                } else {
                    message
                };
                self.last_error = Some(message);
            }
        }
        Completion::Applied
    }

    /// Replace `items` with `updater(items)`; page bookkeeping is untouched.
    pub fn set_items<F>(&mut self, updater: F)
    where
        F: FnOnce(Vec<T>) -> Vec<T>,
    {
        let items = std::mem::take(&mut self.items);
        self.items = updater(items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(items: &[&'static str]) -> ListState<&'static str> {
        let mut state = ListState::default();
        let ticket = state.begin_reset(LoadKind::Initial);
        state.complete(ticket, Ok(items.to_vec()));
        state
    }

    #[test]
    fn reset_sets_only_the_matching_flag() {
        let mut state = ListState::<u8>::default();
        state.begin_reset(LoadKind::Refresh);
        assert!(state.is_refreshing);
        assert!(!state.is_initial_loading);
        assert!(!state.is_loading_more);
        assert!(state.is_blank_loading());
    }

    #[test]
    fn load_more_is_refused_while_busy_or_exhausted() {
        let mut state = ListState::<u8>::default();
        state.begin_reset(LoadKind::Initial);
        assert_eq!(state.begin_load_more(), None);

        let mut state = loaded(&["a"]);
        let ticket = state.begin_load_more().unwrap();
        assert_eq!(ticket.page, 1);
        assert_eq!(state.begin_load_more(), None);
        state.complete(ticket, Ok(vec![]));
        assert!(!state.has_more);
        assert_eq!(state.begin_load_more(), None);
    }

    #[test]
    fn at_most_one_loading_flag() {
        let mut state = loaded(&["a"]);
        state.begin_load_more().unwrap();
        state.begin_reset(LoadKind::Initial);
        assert!(state.is_initial_loading);
        assert!(!state.is_loading_more);
    }

    #[test]
    fn empty_page_does_not_advance_current_page() {
        let mut state = loaded(&["a"]);
        let ticket = state.begin_load_more().unwrap();
        state.complete(ticket, Ok(vec![]));
        assert_eq!(state.current_page, 0);
        assert_eq!(state.items, vec!["a"]);
    }

    #[test]
    fn failed_page_is_requested_again() {
        let mut state = loaded(&["a"]);
        let first = state.begin_load_more().unwrap();
        state.complete(first, Err("timeout".into()));
        assert_eq!(state.current_page, 0);
        assert!(state.has_more);

        let retry = state.begin_load_more().unwrap();
        assert_eq!(retry.page, first.page);
    }

    #[test]
    fn load_more_after_failed_first_page_asks_for_page_zero() {
        let mut state = ListState::<&str>::default();
        let first = state.begin_reset(LoadKind::Initial);
        state.complete(first, Err("offline".into()));

        let retry = state.begin_load_more().unwrap();
        assert_eq!(retry.page, 0);
        state.complete(retry, Ok(vec!["a"]));
        assert_eq!(state.items, vec!["a"]);
        assert_eq!(state.current_page, 0);
        assert_eq!(state.begin_load_more().map(|t| t.page), Some(1));
    }

    #[test]
    fn blank_error_uses_fallback_message() {
        let mut state = ListState::<u8>::default();
        let ticket = state.begin_reset(LoadKind::Initial);
        state.complete(ticket, Err("  ".into()));
        assert_eq!(state.last_error.as_deref(), Some(FALLBACK_ERROR));
        assert!(state.items.is_empty());
        assert!(!state.is_initial_loading);
    }

    #[test]
    fn completion_from_previous_cycle_is_stale() {
        let mut state = loaded(&["a"]);
        let old = state.begin_load_more().unwrap();
        let fresh = state.begin_reset(LoadKind::Refresh);

        assert_eq!(state.complete(old, Ok(vec!["b"])), Completion::Stale);
        assert!(state.is_refreshing);
        assert!(state.items.is_empty());

        assert_eq!(state.complete(fresh, Ok(vec!["x"])), Completion::Applied);
        assert_eq!(state.items, vec!["x"]);
    }

    #[test]
    fn set_items_keeps_bookkeeping() {
        let mut state = loaded(&["a", "b"]);
        let ticket = state.begin_load_more().unwrap();
        state.complete(ticket, Ok(vec!["c"]));

        state.set_items(|items| items.into_iter().rev().collect());
        assert_eq!(state.items, vec!["c", "b", "a"]);
        assert_eq!(state.current_page, 1);
        assert!(state.has_more);
    }
}
