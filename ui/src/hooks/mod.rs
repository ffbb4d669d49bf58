pub mod use_fetch;
pub mod use_paginated_fetch;

pub use use_fetch::{FetchHookReturn, use_fetch};
pub use use_paginated_fetch::{
    ItemsUpdater, PaginatedFetchReturn, use_paginated_fetch,
};

/// Distinguishes "not fetched yet" from "fetched, possibly empty".
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState<T> {
    #[default]
    NotFetched,
    Fetched(T),
}

impl<T> FetchState<T> {
    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }

    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Self::NotFetched => None,
            Self::Fetched(data) => Some(data),
        }
    }
}
