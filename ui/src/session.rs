//! Keeps the login on the device between page loads.

use payloads::Session;
use web_sys::Storage;

const TOKEN_KEY: &str = "loa_escuela.session";
const NAME_KEY: &str = "loa_escuela.display_name";

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Restore the session saved by the last login, if any.
pub fn restore() -> Session {
    let token = local_storage()
        .and_then(|storage| storage.get_item(TOKEN_KEY).ok().flatten());
    match token {
        Some(token) => Session::with_token(token),
        None => Session::default(),
    }
}

pub fn display_name() -> Option<String> {
    local_storage()?.get_item(NAME_KEY).ok().flatten()
}

/// Write the session to storage, or remove it if the session was cleared.
pub fn persist(session: &Session, display_name: Option<&str>) {
    let Some(storage) = local_storage() else {
        tracing::warn!("Local storage unavailable, session won't survive reload");
        return;
    };
    let result = match session.with_exposed_token(|token| {
        storage.set_item(TOKEN_KEY, token)
    }) {
        Some(result) => result.and_then(|_| match display_name {
            Some(name) => storage.set_item(NAME_KEY, name),
            None => Ok(()),
        }),
        None => storage
            .remove_item(TOKEN_KEY)
            .and_then(|_| storage.remove_item(NAME_KEY)),
    };
    if let Err(e) = result {
        tracing::error!("Failed to store session: {e:?}");
    }
}
