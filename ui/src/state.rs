use yewdux::prelude::*;

#[derive(Clone, PartialEq, Default)]
pub enum AuthState {
    #[default]
    LoggedOut,
    LoggedIn { display_name: String },
}

#[derive(Default, Clone, PartialEq, Store)]
pub struct State {
    pub auth_state: AuthState,
}

impl State {
    pub fn is_authenticated(&self) -> bool {
        matches!(self.auth_state, AuthState::LoggedIn { .. })
    }

    pub fn display_name(&self) -> Option<&str> {
        match &self.auth_state {
            AuthState::LoggedIn { display_name } => Some(display_name),
            AuthState::LoggedOut => None,
        }
    }

    pub fn logout(&mut self) {
        self.auth_state = AuthState::LoggedOut;
    }
}
