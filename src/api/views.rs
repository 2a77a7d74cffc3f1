//! HTML views rendered with Tera.
//!
//! Templates are compiled into the binary and parsed once at startup.

use axum::response::Html;
use serde::Serialize;
use tera::{Context, Tera};

use super::flash::Flash;
use crate::domain::Task;
use crate::errors::AppResult;

pub const INDEX_TEMPLATE: &str = "index.html";
pub const LOGIN_TEMPLATE: &str = "login.html";
pub const SIGNUP_TEMPLATE: &str = "signup.html";
pub const EDIT_TEMPLATE: &str = "edit.html";

/// Parsed template set
pub struct Views {
    tera: Tera,
}

impl Views {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        // Registered together so `extends` can resolve the base layout
        tera.add_raw_templates(vec![
            ("base.html", include_str!("../../templates/base.html")),
            (INDEX_TEMPLATE, include_str!("../../templates/index.html")),
            (LOGIN_TEMPLATE, include_str!("../../templates/login.html")),
            (SIGNUP_TEMPLATE, include_str!("../../templates/signup.html")),
            (EDIT_TEMPLATE, include_str!("../../templates/edit.html")),
        ])?;
        Ok(Self { tera })
    }

    /// Render `template` with a serializable context.
    pub fn render<T: Serialize>(&self, template: &str, context: &T) -> AppResult<Html<String>> {
        let context = Context::from_serialize(context)?;
        Ok(Html(self.tera.render(template, &context)?))
    }
}

/// Context for the task list page
#[derive(Debug, Serialize)]
pub struct IndexPage<'a> {
    pub current_user: &'a str,
    pub tasks: &'a [Task],
    pub sort_order: Option<&'static str>,
    pub flash: Option<Flash>,
}

/// Context for the login page
#[derive(Debug, Serialize)]
pub struct LoginPage {
    pub login_failed: bool,
    pub flash: Option<Flash>,
}

/// Context for the signup page
#[derive(Debug, Serialize)]
pub struct SignupPage<'a> {
    pub username: &'a str,
    pub flash: Option<Flash>,
}

/// Context for the edit page
#[derive(Debug, Serialize)]
pub struct EditPage<'a> {
    pub current_user: &'a str,
    pub task: &'a Task,
    pub flash: Option<Flash>,
}
