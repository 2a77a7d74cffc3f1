//! Authentication handlers.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Extension, Form, Router,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::api::cookies;
use crate::api::flash::Flash;
use crate::api::middleware::CurrentUser;
use crate::api::views::{LoginPage, SignupPage, LOGIN_TEMPLATE, SIGNUP_TEMPLATE};
use crate::api::AppState;
use crate::config::{ROUTE_INDEX, ROUTE_LOGIN, ROUTE_SIGNUP};
use crate::errors::{AppError, AppResult};

/// Login form
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Signup form
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    pub username: String,
    pub password: String,
}

/// Routes reachable without a session
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route(ROUTE_LOGIN, get(login_page).post(login))
        .route(ROUTE_SIGNUP, get(signup_page).post(signup))
}

/// Routes that need a session
pub fn session_routes() -> Router<AppState> {
    Router::new().route("/logout", get(logout))
}

/// Show the login form
pub async fn login_page(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Response)> {
    let (jar, flash) = Flash::take(jar);
    let page = LoginPage {
        login_failed: false,
        flash,
    };
    Ok((jar, state.views.render(LOGIN_TEMPLATE, &page)?.into_response()))
}

/// Verify credentials and start a session
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    match state.auth_service.login(form.username, form.password).await {
        Ok(session) => {
            // A login replaces whatever session the client held before
            if let Some(previous) = cookies::session_id(&jar) {
                state.auth_service.logout(&previous).await?;
            }
            let jar = state.session_cookie.set(jar, session.id);
            Ok((jar, Redirect::to(ROUTE_INDEX)).into_response())
        }
        Err(AppError::InvalidCredentials) => {
            let page = LoginPage {
                login_failed: true,
                flash: None,
            };
            Ok(state.views.render(LOGIN_TEMPLATE, &page)?.into_response())
        }
        Err(e) => Err(e),
    }
}

/// Show the signup form
pub async fn signup_page(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Response)> {
    let (jar, flash) = Flash::take(jar);
    let page = SignupPage {
        username: "",
        flash,
    };
    Ok((jar, state.views.render(SIGNUP_TEMPLATE, &page)?.into_response()))
}

/// Register a new user
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SignupForm>,
) -> AppResult<Response> {
    let attempted = form.username.clone();

    match state
        .credential_service
        .register(form.username, form.password)
        .await
    {
        Ok(_) => {
            let jar = Flash::success("Account created successfully! You can now log in.").store(jar);
            Ok((jar, Redirect::to(ROUTE_LOGIN)).into_response())
        }
        Err(e @ (AppError::InvalidInput(_) | AppError::DuplicateUsername)) => {
            let page = SignupPage {
                username: attempted.trim(),
                flash: Some(Flash::danger(e.user_message())),
            };
            Ok(state.views.render(SIGNUP_TEMPLATE, &page)?.into_response())
        }
        Err(e) => Err(e),
    }
}

/// End the current session
pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Redirect)> {
    state.auth_service.logout(&user.session_id).await?;

    let jar = state.session_cookie.clear(jar);
    let jar = Flash::success("Logged out successfully!").store(jar);
    Ok((jar, Redirect::to(ROUTE_LOGIN)))
}
