//! Task handlers. Every route here runs behind the session middleware.

use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    routing::{get, post},
    Extension, Form, Router,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use validator::Validate;

use crate::api::extractors::ValidatedForm;
use crate::api::flash::Flash;
use crate::api::middleware::CurrentUser;
use crate::api::views::{EditPage, IndexPage, EDIT_TEMPLATE, INDEX_TEMPLATE};
use crate::api::AppState;
use crate::config::ROUTE_INDEX;
use crate::domain::{parse_due_date, SortOrder, Task};
use crate::errors::AppResult;

/// Add/edit form. Blank content is rejected by the task service.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct TaskForm {
    #[validate(length(max = 200, message = "Todo must be at most 200 characters."))]
    pub content: String,
    pub due_date: Option<String>,
}

/// Query string of the sorted list view
#[derive(Debug, Default, Deserialize)]
pub struct SortQuery {
    pub sort_order: Option<String>,
}

/// Create task routes
pub fn task_routes() -> Router<AppState> {
    Router::new()
        .route(ROUTE_INDEX, get(index))
        .route("/add", post(add))
        .route("/delete/:id", post(delete))
        .route("/edit/:id", get(edit_page).post(edit))
        .route("/mark_complete/:id", post(mark_complete))
        .route("/sort_by_due_date", get(sort_by_due_date))
}

/// List the current user's tasks in creation order
pub async fn index(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let tasks = state.task_service.list_for_user(user.id, None).await?;
    render_list(&state, &user, jar, &tasks, None)
}

/// List the current user's tasks by due date
pub async fn sort_by_due_date(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<SortQuery>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let order = query
        .sort_order
        .as_deref()
        .map(SortOrder::parse)
        .unwrap_or_default();

    let tasks = state
        .task_service
        .list_for_user(user.id, Some(order))
        .await?;
    render_list(&state, &user, jar, &tasks, Some(order))
}

/// Create a task
pub async fn add(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    jar: CookieJar,
    ValidatedForm(form): ValidatedForm<TaskForm>,
) -> AppResult<(CookieJar, Redirect)> {
    let due_date = parse_due_date(form.due_date.as_deref())?;
    state
        .task_service
        .create(user.id, form.content, due_date)
        .await?;

    Ok(back_home(jar, "Todo added!"))
}

/// Delete a task
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Redirect)> {
    state.task_service.delete(id, user.id).await?;
    Ok(back_home(jar, "Todo deleted!"))
}

/// Show the edit form for a task
pub async fn edit_page(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let task = state.task_service.get(id, user.id).await?;

    let (jar, flash) = Flash::take(jar);
    let page = EditPage {
        current_user: &user.username,
        task: &task,
        flash,
    };
    Ok((jar, state.views.render(EDIT_TEMPLATE, &page)?))
}

/// Replace a task's content and due date.
///
/// Ownership is settled before any field of the form is looked at.
pub async fn edit(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    jar: CookieJar,
    Form(form): Form<TaskForm>,
) -> AppResult<(CookieJar, Redirect)> {
    state.task_service.get(id, user.id).await?;

    let due_date = parse_due_date(form.due_date.as_deref())?;
    state
        .task_service
        .update(id, user.id, form.content, due_date)
        .await?;

    Ok(back_home(jar, "Todo updated!"))
}

/// Mark a task as completed
pub async fn mark_complete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Redirect)> {
    state.task_service.mark_complete(id, user.id).await?;
    Ok(back_home(jar, "Todo marked as completed!"))
}

fn render_list(
    state: &AppState,
    user: &CurrentUser,
    jar: CookieJar,
    tasks: &[Task],
    order: Option<SortOrder>,
) -> AppResult<(CookieJar, Html<String>)> {
    let (jar, flash) = Flash::take(jar);
    let page = IndexPage {
        current_user: &user.username,
        tasks,
        sort_order: order.map(|o| o.as_str()),
        flash,
    };
    Ok((jar, state.views.render(INDEX_TEMPLATE, &page)?))
}

fn back_home(jar: CookieJar, message: &str) -> (CookieJar, Redirect) {
    (Flash::success(message).store(jar), Redirect::to(ROUTE_INDEX))
}
