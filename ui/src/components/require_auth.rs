use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::{Route, State};

/// Component that only renders its children when a staff member is logged
/// in, and sends everyone else to the login page.
///
/// Keeping the check here means the children's hooks (and their fetches)
/// only run with a session to send.
#[derive(Properties, PartialEq)]
pub struct RequireAuthProps {
    #[prop_or_default]
    pub children: Children,
}

#[function_component]
pub fn RequireAuth(props: &RequireAuthProps) -> Html {
    let (state, _) = use_store::<State>();

    if !state.is_authenticated() {
        return html! { <Redirect<Route> to={Route::Login} /> };
    }

    html! {
        <>
            {for props.children.iter()}
        </>
    }
}
