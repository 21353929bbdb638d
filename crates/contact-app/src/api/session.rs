//! Cookie-bound flash messages.

use super::AppState;
use crate::error::AppError;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use session_store::{is_valid_session_id, new_session_id};

/// Session slot holding the messages shown on the contact list.
pub const FLASH_KEY: &str = "msg";

/// The session id carried by the request, if it has a usable one.
pub(crate) fn session_id(jar: &CookieJar, cookie_name: &str) -> Option<String> {
    jar.get(cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|id| is_valid_session_id(id))
}

/// Queue a flash message for the requesting session, starting a session
/// (and setting its cookie) when the request has none.
pub(crate) async fn set_flash(
    state: &AppState,
    jar: CookieJar,
    message: &str,
) -> Result<CookieJar, AppError> {
    let (jar, id) = match session_id(&jar, &state.cookie_name) {
        Some(id) => (jar, id),
        None => {
            let id = new_session_id();
            let cookie = Cookie::build((state.cookie_name.to_string(), id.clone()))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax);
            (jar.add(cookie), id)
        }
    };

    state.sessions.flash(&id, FLASH_KEY, message).await?;
    Ok(jar)
}

/// Take the pending flash messages of the requesting session.
pub(crate) async fn take_flash(state: &AppState, jar: &CookieJar) -> Result<Vec<String>, AppError> {
    match session_id(jar, &state.cookie_name) {
        Some(id) => Ok(state.sessions.take_flash(&id, FLASH_KEY).await?),
        None => Ok(Vec::new()),
    }
}
