//! Session authentication middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;

use crate::api::{cookies, AppState};
use crate::errors::AppError;

/// Authenticated user resolved from the session cookie
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: i32,
    pub username: String,
    pub session_id: String,
}

/// Session authentication middleware.
///
/// Resolves the session cookie to a live session and injects the
/// CurrentUser into the request extensions. Anonymous requests are
/// redirected to the login page, and a cookie naming no live session is
/// cleared.
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session_id = cookies::session_id(&jar);
    let session = match state.auth_service.require_auth(session_id.as_deref()).await {
        Ok(session) => session,
        // Stale or forged cookie: tell the client to drop it
        Err(AppError::Unauthenticated) if session_id.is_some() => {
            let jar = state.session_cookie.clear(jar);
            return Ok((jar, AppError::Unauthenticated).into_response());
        }
        Err(e) => return Err(e),
    };

    let current_user = CurrentUser {
        id: session.user_id,
        username: session.username,
        session_id: session.id,
    };

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}
