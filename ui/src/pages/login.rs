use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::Route;
use crate::components::LoginForm;
use crate::state::State;

#[function_component]
pub fn LoginPage() -> Html {
    let navigator = use_navigator().unwrap();
    let (state, _) = use_store::<State>();

    // Redirect to the students list if already logged in
    {
        let navigator = navigator.clone();
        let is_authenticated = state.is_authenticated();

        use_effect_with(is_authenticated, move |is_auth| {
            if *is_auth {
                navigator.push(&Route::Students);
            }
        });
    }

    let on_success = Callback::from(move |_display_name: String| {
        navigator.push(&Route::Students);
    });

    html! {
        <div class="max-w-md mx-auto py-12 space-y-6">
            <div class="text-center">
                <h1 class="text-2xl font-bold text-neutral-900">
                    {"Loa Escuela"}
                </h1>
                <p class="text-sm text-neutral-600">
                    {"Staff sign in"}
                </p>
            </div>
            <LoginForm {on_success} />
        </div>
    }
}
