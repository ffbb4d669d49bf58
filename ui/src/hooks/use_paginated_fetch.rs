use pagination::{ListState, PaginatedLoader};
use std::future::Future;
use std::rc::Rc;
use yew::prelude::*;

/// A local edit applied to the loaded items, see
/// [`PaginatedFetchReturn::set_items`].
pub type ItemsUpdater<T> = Box<dyn FnOnce(Vec<T>) -> Vec<T>>;

/// Paginated list hook return type
pub struct PaginatedFetchReturn<T> {
    pub state: ListState<T>,
    /// Start over from the first page, showing a refresh indicator.
    pub reload: Callback<()>,
    /// Append the next page. Ignored while a page is loading or after the
    /// last page.
    pub load_more: Callback<()>,
    /// Change the loaded items in place without fetching, e.g. after a write
    /// whose outcome is already known.
    pub set_items: Callback<ItemsUpdater<T>>,
}

impl<T: 'static> PaginatedFetchReturn<T> {
    /// Apply `updater` to the loaded items.
    pub fn update_items(
        &self,
        updater: impl FnOnce(Vec<T>) -> Vec<T> + 'static,
    ) {
        self.set_items.emit(Box::new(updater));
    }
}

/// Paginated list hook composer.
///
/// Owns one [`PaginatedLoader`] for the lifetime of the component. The first
/// page is fetched on mount, and again from scratch whenever `deps` changes
/// (compared with `PartialEq`). `fetch_page` receives the current `deps` and
/// the zero-based page index; only the closure passed on the first render is
/// used, so it should read everything it needs from those arguments.
///
/// # Example
///
/// ```ignore
/// #[hook]
/// pub fn use_students(filter: StudentFilter) -> PaginatedFetchReturn<Student> {
///     use_paginated_fetch(filter, |filter, page| async move {
///         get_api_client()
///             .list_students(&requests::ListStudents {
///                 filter,
///                 page,
///                 page_size: DEFAULT_PAGE_SIZE,
///             })
///             .await
///             .map_err(|e| e.to_string())
///     })
/// }
/// ```
#[hook]
pub fn use_paginated_fetch<T, D, F, Fut>(
    deps: D,
    fetch_page: F,
) -> PaginatedFetchReturn<T>
where
    T: Clone + 'static,
    D: PartialEq + Clone + 'static,
    F: Fn(D, u32) -> Fut + 'static,
    Fut: Future<Output = Result<Vec<T>, String>> + 'static,
{
    let force_update = use_force_update();
    let loader = use_memo((), move |_| {
        PaginatedLoader::new(fetch_page)
            .with_observer(move || force_update.force_update())
    });

    // Restart on mount and whenever the dependencies change
    {
        let loader = loader.clone();
        use_effect_with(deps, move |deps| {
            let deps = deps.clone();
            yew::platform::spawn_local(async move {
                loader.configure(deps).await;
            });
        });
    }

    let reload = {
        let loader = loader.clone();
        Callback::from(move |_| {
            let loader = Rc::clone(&loader);
            yew::platform::spawn_local(async move {
                loader.reload().await;
            });
        })
    };

    let load_more = {
        let loader = loader.clone();
        Callback::from(move |_| {
            let loader = Rc::clone(&loader);
            yew::platform::spawn_local(async move {
                loader.load_more().await;
            });
        })
    };

    let set_items = {
        let loader = loader.clone();
        Callback::from(move |updater: ItemsUpdater<T>| {
            loader.set_items(updater);
        })
    };

    PaginatedFetchReturn {
        state: loader.snapshot(),
        reload,
        load_more,
        set_items,
    }
}
