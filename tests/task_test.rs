//! Task pages through the full router: isolation, validation and sorting.

mod common;

use axum::http::StatusCode;
use common::*;

fn position(body: &str, needle: &str) -> usize {
    body.find(needle)
        .unwrap_or_else(|| panic!("{needle} not in page"))
}

#[tokio::test]
async fn test_add_and_list() {
    let app = test_app().await;
    let alice = register_and_login(&app, "alice", "pw1").await;

    let response = post_form(&app, "/add", "content=buy+milk&due_date=2024-03-01", Some(&alice)).await;
    assert_redirect(&response, "/");
    let flash = set_cookie(&response, "flash").unwrap();

    let body = body_text(get(&app, "/", Some(&format!("{alice}; {flash}"))).await).await;
    assert!(body.contains("buy milk"));
    assert!(body.contains("2024-03-01"));
    assert!(body.contains("Todo added!"));
}

#[tokio::test]
async fn test_tasks_are_private() {
    let app = test_app().await;
    let alice = register_and_login(&app, "alice", "pw1").await;
    let bob = register_and_login(&app, "bob", "pw2").await;

    post_form(&app, "/add", "content=buy+milk", Some(&alice)).await;

    let body = body_text(get(&app, "/", Some(&bob)).await).await;
    assert!(!body.contains("buy milk"));

    // Every mutation of alice's task by bob is refused
    let response = post_form(&app, "/delete/1", "", Some(&bob)).await;
    assert_redirect(&response, "/");
    assert!(set_cookie(&response, "flash").unwrap().starts_with("flash=danger"));

    let response = post_form(&app, "/edit/1", "content=mine+now", Some(&bob)).await;
    assert_redirect(&response, "/");

    let response = post_form(&app, "/mark_complete/1", "", Some(&bob)).await;
    assert_redirect(&response, "/");

    let response = get(&app, "/edit/1", Some(&bob)).await;
    assert_redirect(&response, "/");

    let body = body_text(get(&app, "/", Some(&alice)).await).await;
    assert!(body.contains("buy milk"));
    assert!(!body.contains("mine now"));
    assert!(!body.contains("class=\"completed\""));
}

#[tokio::test]
async fn test_empty_content_is_rejected() {
    let app = test_app().await;
    let alice = register_and_login(&app, "alice", "pw1").await;

    for form in ["content=", "content=+++", "due_date=2024-03-01"] {
        let response = post_form(&app, "/add", form, Some(&alice)).await;
        assert_redirect(&response, "/");
        assert!(set_cookie(&response, "flash").unwrap().starts_with("flash=danger"));
    }

    let body = body_text(get(&app, "/", Some(&alice)).await).await;
    assert!(body.contains("Nothing to do yet."));
}

#[tokio::test]
async fn test_malformed_due_date_is_rejected() {
    let app = test_app().await;
    let alice = register_and_login(&app, "alice", "pw1").await;

    let response = post_form(&app, "/add", "content=x&due_date=03%2F01%2F2024", Some(&alice)).await;
    assert_redirect(&response, "/");

    let body = body_text(get(&app, "/", Some(&alice)).await).await;
    assert!(body.contains("Nothing to do yet."));
}

#[tokio::test]
async fn test_edit_replaces_content_and_clears_due_date() {
    let app = test_app().await;
    let alice = register_and_login(&app, "alice", "pw1").await;
    post_form(&app, "/add", "content=buy+milk&due_date=2024-03-01", Some(&alice)).await;

    let response = get(&app, "/edit/1", Some(&alice)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("value=\"buy milk\""));

    let response = post_form(&app, "/edit/1", "content=buy+oat+milk&due_date=", Some(&alice)).await;
    assert_redirect(&response, "/");

    let body = body_text(get(&app, "/", Some(&alice)).await).await;
    assert!(body.contains("buy oat milk"));
    assert!(!body.contains("2024-03-01"));
}

/// Follow a redirect carrying a flash and return the page it lands on.
async fn flash_page(app: &axum::Router, response: &axum::response::Response, session: &str) -> String {
    let flash = set_cookie(response, "flash").expect("redirect carries a flash");
    body_text(get(app, "/", Some(&format!("{session}; {flash}"))).await).await
}

#[tokio::test]
async fn test_edit_checks_ownership_before_fields() {
    let app = test_app().await;
    let alice = register_and_login(&app, "alice", "pw1").await;
    let bob = register_and_login(&app, "bob", "pw2").await;
    post_form(&app, "/add", "content=buy+milk", Some(&alice)).await;

    let response = post_form(&app, "/edit/1", "content=x&due_date=garbage", Some(&bob)).await;
    assert_redirect(&response, "/");
    let page = flash_page(&app, &response, &bob).await;
    assert!(page.contains("You are not allowed to modify this todo."));

    let too_long = format!("content={}", "a".repeat(201));
    let response = post_form(&app, "/edit/1", &too_long, Some(&bob)).await;
    assert_redirect(&response, "/");
    let page = flash_page(&app, &response, &bob).await;
    assert!(page.contains("You are not allowed to modify this todo."));

    let response = post_form(&app, "/edit/999", "content=x&due_date=garbage", Some(&bob)).await;
    assert_redirect(&response, "/");
    let page = flash_page(&app, &response, &bob).await;
    assert!(page.contains("Todo not found."));

    // The owner still gets the field errors
    let response = post_form(&app, "/edit/1", "content=x&due_date=garbage", Some(&alice)).await;
    let page = flash_page(&app, &response, &alice).await;
    assert!(page.contains("Due date must be formatted as YYYY-MM-DD."));
    assert!(page.contains("buy milk"));
}

#[tokio::test]
async fn test_edit_with_empty_content_keeps_task() {
    let app = test_app().await;
    let alice = register_and_login(&app, "alice", "pw1").await;
    post_form(&app, "/add", "content=buy+milk", Some(&alice)).await;

    let response = post_form(&app, "/edit/1", "content=", Some(&alice)).await;
    assert_redirect(&response, "/");

    let body = body_text(get(&app, "/", Some(&alice)).await).await;
    assert!(body.contains("buy milk"));
}

#[tokio::test]
async fn test_mark_complete_and_delete() {
    let app = test_app().await;
    let alice = register_and_login(&app, "alice", "pw1").await;
    post_form(&app, "/add", "content=buy+milk", Some(&alice)).await;

    let response = post_form(&app, "/mark_complete/1", "", Some(&alice)).await;
    assert_redirect(&response, "/");
    // Completing twice is harmless
    let response = post_form(&app, "/mark_complete/1", "", Some(&alice)).await;
    assert_redirect(&response, "/");
    assert!(set_cookie(&response, "flash").unwrap().starts_with("flash=success"));

    let body = body_text(get(&app, "/", Some(&alice)).await).await;
    assert!(body.contains("class=\"completed\""));

    let response = post_form(&app, "/delete/1", "", Some(&alice)).await;
    assert_redirect(&response, "/");

    let body = body_text(get(&app, "/", Some(&alice)).await).await;
    assert!(!body.contains("buy milk"));
}

#[tokio::test]
async fn test_missing_task_redirects_home() {
    let app = test_app().await;
    let alice = register_and_login(&app, "alice", "pw1").await;

    let response = post_form(&app, "/delete/42", "", Some(&alice)).await;
    assert_redirect(&response, "/");
    assert!(set_cookie(&response, "flash").unwrap().starts_with("flash=danger"));
}

#[tokio::test]
async fn test_sort_by_due_date() {
    let app = test_app().await;
    let alice = register_and_login(&app, "alice", "pw1").await;
    let bob = register_and_login(&app, "bob", "pw2").await;

    post_form(&app, "/add", "content=later&due_date=2024-05-01", Some(&alice)).await;
    post_form(&app, "/add", "content=whenever", Some(&alice)).await;
    post_form(&app, "/add", "content=sooner&due_date=2024-03-01", Some(&alice)).await;
    post_form(&app, "/add", "content=bobs+task&due_date=2024-01-01", Some(&bob)).await;

    let asc = body_text(get(&app, "/sort_by_due_date?sort_order=asc", Some(&alice)).await).await;
    assert!(position(&asc, "sooner") < position(&asc, "later"));
    assert!(position(&asc, "later") < position(&asc, "whenever"));
    assert!(!asc.contains("bobs task"));

    let desc = body_text(get(&app, "/sort_by_due_date?sort_order=desc", Some(&alice)).await).await;
    assert!(position(&desc, "whenever") < position(&desc, "later"));
    assert!(position(&desc, "later") < position(&desc, "sooner"));

    // Missing order defaults to ascending
    let default = body_text(get(&app, "/sort_by_due_date", Some(&alice)).await).await;
    assert!(position(&default, "sooner") < position(&default, "later"));

    // Unsorted view keeps creation order
    let index = body_text(get(&app, "/", Some(&alice)).await).await;
    assert!(position(&index, "later") < position(&index, "whenever"));
    assert!(position(&index, "whenever") < position(&index, "sooner"));
}

#[tokio::test]
async fn test_alice_scenario() {
    let app = test_app().await;
    let alice = register_and_login(&app, "alice", "pw1").await;

    post_form(&app, "/add", "content=buy+milk&due_date=2024-03-01", Some(&alice)).await;
    post_form(&app, "/mark_complete/1", "", Some(&alice)).await;

    let body = body_text(get(&app, "/", Some(&alice)).await).await;
    assert!(body.contains("buy milk"));
    assert!(body.contains("class=\"completed\""));
    assert!(body.contains("2024-03-01"));

    let bob = register_and_login(&app, "bob", "pw2").await;
    let response = post_form(&app, "/delete/1", "", Some(&bob)).await;
    assert_redirect(&response, "/");

    let body = body_text(get(&app, "/", Some(&alice)).await).await;
    assert!(body.contains("buy milk"));
}
