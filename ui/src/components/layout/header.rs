use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::{Route, State, current_session, get_api_client, session};

#[function_component]
pub fn Header() -> Html {
    let (state, dispatch) = use_store::<State>();

    let on_logout = Callback::from(move |_: MouseEvent| {
        let dispatch = dispatch.clone();
        yew::platform::spawn_local(async move {
            if let Err(e) = get_api_client().logout().await {
                tracing::warn!("Logout request failed: {e}");
            }
            session::persist(&current_session(), None);
            dispatch.reduce_mut(|state| state.logout());
        });
    });

    html! {
        <header class="bg-white border-b border-gray-200">
            <div class="max-w-3xl mx-auto px-4">
                <div class="flex justify-between items-center h-14">
                    <h1 class="text-lg font-semibold text-gray-900">{"Loa Escuela"}</h1>
                    if let Some(name) = state.display_name() {
                        <nav class="flex items-center space-x-4 text-sm">
                            <Link<Route> to={Route::Students}>{"Students"}</Link<Route>>
                            <Link<Route> to={Route::Income}>{"Income"}</Link<Route>>
                            <span class="text-gray-500">{name}</span>
                            <button onclick={on_logout} class="text-gray-700 underline">
                                {"Log out"}
                            </button>
                        </nav>
                    }
                </div>
            </div>
        </header>
    }
}
