use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;
use yew::prelude::*;

use super::FetchState;

/// Generic fetch hook return type
pub struct FetchHookReturn<T> {
    pub data: FetchState<T>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub refetch: Callback<()>,
}

impl<T: Clone> FetchHookReturn<T> {
    /// Render based on fetch state with contextual loading/error messages.
    ///
    /// - No data + loading: "Loading {context}..."
    /// - No data + error: "Error loading {context}: ..."
    /// - Has data: `render_fn(data, is_loading, error)`, where `error` comes
    ///   from a failed refetch and the data is from the last good fetch.
    pub fn render<F>(&self, context: &str, render_fn: F) -> Html
    where
        F: Fn(&T, bool, Option<&String>) -> Html,
    {
        match self.data.as_ref() {
            Some(data) => render_fn(data, self.is_loading, self.error.as_ref()),
            None => match &self.error {
                Some(error) if !self.is_loading => html! {
                    <div class="p-4 rounded-md bg-red-50 border border-red-200">
                        <p class="text-sm text-red-700">
                            {format!("Error loading {}: {}", context, error)}
                        </p>
                    </div>
                },
                _ => html! {
                    <div class="text-center py-6">
                        <p class="text-neutral-600">
                            {format!("Loading {}...", context)}
                        </p>
                    </div>
                },
            },
        }
    }
}

/// Generic single-shot fetch hook.
///
/// Fetches on mount and whenever `deps` changes. `fetch_fn` receives the
/// current `deps`. A response that arrives after a newer fetch was started
/// is dropped, so a slow answer for an old date can't overwrite a new one.
///
/// # Example
///
/// ```ignore
/// #[hook]
/// pub fn use_daily_income(date: Date) -> FetchHookReturn<DailyIncome> {
///     use_fetch(date, |date| async move {
///         get_api_client()
///             .daily_income(&requests::DailyIncomeQuery { date })
///             .await
///             .map_err(|e| e.to_string())
///     })
/// }
/// ```
#[hook]
pub fn use_fetch<T, D, F, Fut>(deps: D, fetch_fn: F) -> FetchHookReturn<T>
where
    T: Clone + 'static,
    D: PartialEq + Clone + 'static,
    F: Fn(D) -> Fut + 'static,
    Fut: Future<Output = Result<T, String>> + 'static,
{
    let data = use_state(|| FetchState::NotFetched);
    let error = use_state(|| None::<String>);
    let is_loading = use_state(|| true);
    let latest = use_memo((), |_| Cell::new(0u64));
    let fetch_fn = use_memo((), move |_| fetch_fn);

    let refetch = {
        let data = data.clone();
        let error = error.clone();
        let is_loading = is_loading.clone();
        let latest = latest.clone();
        let fetch_fn = Rc::clone(&fetch_fn);

        use_callback(deps.clone(), move |_, deps| {
            let data = data.clone();
            let error = error.clone();
            let is_loading = is_loading.clone();
            let latest = latest.clone();
            let request = fetch_fn(deps.clone());

            let generation = latest.get() + 1;
            latest.set(generation);

            yew::platform::spawn_local(async move {
                is_loading.set(true);
                let result = request.await;
                if latest.get() != generation {
                    return;
                }
                match result {
                    Ok(result) => {
                        data.set(FetchState::Fetched(result));
                        error.set(None);
                    }
                    Err(e) => {
                        error.set(Some(e));
                    }
                }
                is_loading.set(false);
            });
        })
    };

    // Auto-fetch on mount and when deps change
    {
        let refetch = refetch.clone();
        use_effect_with(deps, move |_| {
            refetch.emit(());
        });
    }

    FetchHookReturn {
        data: (*data).clone(),
        is_loading: *is_loading,
        error: (*error).clone(),
        refetch: Callback::from(move |_| refetch.emit(())),
    }
}
