use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use obs_core::{CookieTransport, Session, SessionPatch};

use crate::cookies::HeaderCookies;
use crate::error::ApiError;
use crate::state::AppState;

/// `GET /get-session`: return the session, creating the cookie if absent
pub async fn get_session_handler(
    State(state): State<AppState>,
    mut cookies: HeaderCookies,
) -> Result<(HeaderCookies, Json<Session>), ApiError> {
    let session = state.store.load(&mut cookies)?;
    Ok((cookies, Json(session)))
}

/// `POST /update-session`: merge the body into the session and rewrite the cookie
pub async fn update_session_handler(
    State(state): State<AppState>,
    mut cookies: HeaderCookies,
    payload: Result<Json<SessionPatch>, JsonRejection>,
) -> Result<(HeaderCookies, Json<Session>), ApiError> {
    // A missing cookie is reported before a bad body.
    if cookies.get(state.store.cookie_name()).is_none() {
        return Err(obs_core::Error::NoSession.into());
    }
    let Json(patch) = payload?;

    tracing::debug!(?patch, "Updating session");
    let session = state.store.update(&mut cookies, patch)?;
    Ok((cookies, Json(session)))
}
