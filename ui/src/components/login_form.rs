use payloads::requests;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::{AuthState, State, current_session, get_api_client, session};

#[derive(Properties, PartialEq)]
pub struct LoginFormProps {
    /// Called with the staff member's display name after a successful login.
    pub on_success: Callback<String>,
}

#[function_component]
pub fn LoginForm(props: &LoginFormProps) -> Html {
    let (_state, dispatch) = use_store::<State>();

    let username_ref = use_node_ref();
    let password_ref = use_node_ref();
    let error_message = use_state(|| None::<String>);
    let is_loading = use_state(|| false);

    let on_submit = {
        let username_ref = username_ref.clone();
        let password_ref = password_ref.clone();
        let error_message = error_message.clone();
        let is_loading = is_loading.clone();
        let on_success = props.on_success.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let username_input =
                username_ref.cast::<HtmlInputElement>().unwrap();
            let password_input =
                password_ref.cast::<HtmlInputElement>().unwrap();
            let username = username_input.value();
            let password = password_input.value();

            // Basic validation
            if username.is_empty() || password.is_empty() {
                error_message.set(Some(
                    "Please enter both username and password".to_string(),
                ));
                return;
            }

            let credentials = requests::LoginCredentials { username, password };
            let error_message = error_message.clone();
            let is_loading = is_loading.clone();
            let on_success = on_success.clone();
            let dispatch = dispatch.clone();

            yew::platform::spawn_local(async move {
                is_loading.set(true);
                error_message.set(None);

                match get_api_client().login(&credentials).await {
                    Ok(display_name) => {
                        session::persist(
                            &current_session(),
                            Some(&display_name),
                        );
                        dispatch.reduce_mut(|state| {
                            state.auth_state = AuthState::LoggedIn {
                                display_name: display_name.clone(),
                            };
                        });
                        on_success.emit(display_name);
                    }
                    Err(e) => {
                        dispatch.reduce_mut(|state| state.logout());
                        error_message.set(Some(e.to_string()));
                    }
                }

                is_loading.set(false);
            });
        })
    };

    html! {
        <form onsubmit={on_submit} class="space-y-4 max-w-sm mx-auto">
            <div>
                <label for="username" class="block text-sm font-medium">{"Username"}</label>
                <input
                    ref={username_ref}
                    id="username"
                    type="text"
                    autocomplete="username"
                    class="w-full px-3 py-2 border border-neutral-300 rounded-md"
                />
            </div>
            <div>
                <label for="password" class="block text-sm font-medium">{"Password"}</label>
                <input
                    ref={password_ref}
                    id="password"
                    type="password"
                    autocomplete="current-password"
                    class="w-full px-3 py-2 border border-neutral-300 rounded-md"
                />
            </div>
            if let Some(error) = &*error_message {
                <div class="p-3 rounded-md bg-red-50 border border-red-200">
                    <p class="text-sm text-red-700">{error}</p>
                </div>
            }
            <button
                type="submit"
                disabled={*is_loading}
                class="w-full bg-neutral-900 text-white px-4 py-2 rounded-md text-sm font-medium"
            >
                {if *is_loading { "Logging in..." } else { "Log in" }}
            </button>
        </form>
    }
}
