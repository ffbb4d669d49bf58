use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    /// Number of items loaded so far
    pub loaded_count: usize,
    pub has_more: bool,
    pub is_loading_more: bool,
    pub on_load_more: Callback<()>,
}

/// Footer of an incrementally loaded list.
#[function_component]
pub fn LoadMoreControls(props: &Props) -> Html {
    let Props {
        loaded_count,
        has_more,
        is_loading_more,
        ..
    } = *props;

    // Nothing to page through
    if loaded_count == 0 {
        return html! {};
    }

    let on_click = {
        let on_load_more = props.on_load_more.clone();
        Callback::from(move |_: MouseEvent| on_load_more.emit(()))
    };

    html! {
        <div class="flex items-center justify-between mt-4 pt-4 border-t border-neutral-200">
            <span class="text-sm text-neutral-600">
                {format!("Showing {loaded_count}")}
            </span>
            if has_more {
                <button
                    onclick={on_click}
                    disabled={is_loading_more}
                    class="px-4 py-2 border border-neutral-300 rounded-md text-sm font-medium text-neutral-700 disabled:text-neutral-400"
                >
                    {if is_loading_more { "Loading..." } else { "Load more" }}
                </button>
            } else {
                <span class="text-sm text-neutral-400">{"End of list"}</span>
            }
        </div>
    }
}
