use crate::config::TOKEN_STORAGE_KEY;
use common::api::Credential;

/// Reads the bearer token the sign-in page left in `localStorage`.
///
/// Missing storage, a missing key or a blank value all mean "not signed in".
pub fn stored_credential() -> Option<Credential> {
    let storage = web_sys::window()?.local_storage().ok()??;
    let token = storage.get_item(TOKEN_STORAGE_KEY).ok()??;
    Credential::new(token)
}
