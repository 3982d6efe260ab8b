//! Contact form route handler.
//!
//! The page posts a plain HTML form; the response is a redirect back to the
//! contact section, or a short text error.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::instrument;

use latte_core::validation::validate_contact;
use latte_core::NewContactMessage;

use crate::state::AppState;

/// Where the browser lands after a successful submission.
pub const SUCCESS_REDIRECT: &str = "/?status=success#contact";

/// Shown when the message could not be stored.
pub const SUBMIT_FAILED: &str = "Form submission failed due to a server error.";

/// Contact form fields. Missing fields arrive as empty strings and fail
/// validation instead of the form extractor.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl From<ContactForm> for NewContactMessage {
    fn from(form: ContactForm) -> Self {
        NewContactMessage {
            name: form.name,
            email: form.email,
            message: form.message,
        }
    }
}

/// Store a contact message.
///
/// POST /submit-contact
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn submit_contact(State(state): State<AppState>, Form(form): Form<ContactForm>) -> Response {
    let input = NewContactMessage::from(form);

    if let Err(err) = validate_contact(&input) {
        return (StatusCode::BAD_REQUEST, err.to_string()).into_response();
    }

    match state.db.contacts().insert(&input).await {
        Ok(stored) => {
            tracing::info!(id = %stored.id, "Contact message stored");
            Redirect::to(SUCCESS_REDIRECT).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to store contact message");
            (StatusCode::INTERNAL_SERVER_ERROR, SUBMIT_FAILED).into_response()
        }
    }
}
