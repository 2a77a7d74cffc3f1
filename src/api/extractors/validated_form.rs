//! Validated form extractor - Combines form decoding with validation.

use axum::{
    async_trait,
    extract::{rejection::FormRejection, FromRequest, Request},
    Form,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::AppError;

/// URL-encoded form extractor that validates the decoded value.
///
/// Decoding and validation failures both surface as `InvalidInput`.
pub struct ValidatedForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Form<T>: FromRequest<S, Rejection = FormRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::invalid_input(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::invalid_input(format_validation_errors(&e)))?;

        Ok(ValidatedForm(value))
    }
}

/// Format validation errors into a user-friendly string
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::header::CONTENT_TYPE};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct NoteForm {
        #[validate(length(max = 5, message = "Too long."))]
        text: String,
    }

    fn form_request(body: &'static str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_form_is_extracted() {
        let ValidatedForm(form) = ValidatedForm::<NoteForm>::from_request(form_request("text=hi"), &())
            .await
            .unwrap();
        assert_eq!(form.text, "hi");
    }

    #[tokio::test]
    async fn test_validation_failure_is_invalid_input() {
        let result = ValidatedForm::<NoteForm>::from_request(form_request("text=toolong"), &()).await;
        match result {
            Err(AppError::InvalidInput(message)) => assert_eq!(message, "Too long."),
            _ => panic!("expected InvalidInput"),
        }
    }

    #[tokio::test]
    async fn test_missing_field_is_invalid_input() {
        let result = ValidatedForm::<NoteForm>::from_request(form_request("other=1"), &()).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
