use payloads::{APIClient, Session};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

pub mod components;
pub mod hooks;
pub mod logs;
pub mod pages;
pub mod session;
pub mod state;

pub use state::{AuthState, State};

use components::layout::MainLayout;
use pages::{IncomePage, LoginPage, NotFoundPage, StudentsPage};

thread_local! {
    // One session per tab, shared by every client built below
    static SESSION: Session = session::restore();
}

pub fn current_session() -> Session {
    SESSION.with(Session::clone)
}

// Global API client - configurable via environment or same-origin fallback
pub fn get_api_client() -> APIClient {
    // Try environment variable first (set at build time)
    let address = option_env!("BACKEND_URL")
        .map(|url| url.to_string())
        .unwrap_or_else(|| {
            // Fallback to same origin
            let window = web_sys::window().unwrap();
            let location = window.location();
            location.origin().unwrap()
        });

    APIClient::new(address, current_session())
}

/// Log out locally if the backend rejected the session during the last
/// request.
pub fn sync_session_state(dispatch: &Dispatch<State>) {
    let session = current_session();
    if !session.is_authenticated() {
        session::persist(&session, None);
        dispatch.reduce_mut(|state| state.logout());
    }
}

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/students")]
    Students,
    #[at("/income")]
    Income,
    #[not_found]
    #[at("/404")]
    NotFound,
}

#[function_component]
pub fn App() -> Html {
    let (_state, dispatch) = use_store::<State>();

    // Pick up a session saved by a previous visit
    use_effect_with((), move |_| {
        if current_session().is_authenticated() {
            let display_name = session::display_name().unwrap_or_default();
            dispatch.reduce_mut(|state| {
                state.auth_state = AuthState::LoggedIn { display_name };
            });
        }
    });

    html! {
        <BrowserRouter>
            <MainLayout>
                <Switch<Route> render={switch} />
            </MainLayout>
        </BrowserRouter>
    }
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <Redirect<Route> to={Route::Students} /> },
        Route::Login => html! { <LoginPage /> },
        Route::Students => html! { <StudentsPage /> },
        Route::Income => html! { <IncomePage /> },
        Route::NotFound => html! { <NotFoundPage /> },
    }
}
