//! Shared helpers for router-level tests.
//!
//! Each app gets its own in-memory SQLite database and session store.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
        Request, StatusCode,
    },
    response::Response,
    Router,
};
use tower::ServiceExt;

use todo_app::config::Config;
use todo_app::infra::{Database, MemorySessionStore, SessionStore};
use todo_app::{create_router, AppState};

pub async fn test_app() -> Router {
    let config = Config::in_memory();
    let database = Arc::new(Database::connect(&config).await.unwrap());
    let sessions: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
    let state = AppState::from_config(database, sessions, &config).unwrap();
    create_router(state)
}

pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_form(app: &Router, uri: &str, form: &str, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::from(form.to_string())).unwrap())
        .await
        .unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// `name=value` of a cookie set (not removed) by the response
pub fn set_cookie(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| {
            pair.split_once('=')
                .map(|(n, value)| n == name && !value.is_empty())
                .unwrap_or(false)
        })
        .map(str::to_string)
}

/// Whether the response tells the client to drop cookie `name`
pub fn cleared_cookie(response: &Response, name: &str) -> bool {
    let prefix = format!("{}=", name);
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| {
            v.split(';').next() == Some(prefix.as_str()) && v.contains("Max-Age=0")
        })
}

pub fn assert_redirect(response: &Response, target: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(response), target);
}

/// Sign up and log in; returns the session cookie header value.
pub async fn register_and_login(app: &Router, username: &str, password: &str) -> String {
    let form = format!("username={}&password={}", username, password);

    let response = post_form(app, "/signup", &form, None).await;
    assert_redirect(&response, "/login");

    let response = post_form(app, "/login", &form, None).await;
    assert_redirect(&response, "/");
    set_cookie(&response, "session_id").expect("login sets a session cookie")
}
