//! The page model handed to the rendering layer.
//!
//! The core produces a title, zero or more status messages, and an opaque
//! content payload; everything visual is the template's concern.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;

use crate::server::AppState;

/// A status message attached to a page.
///
/// `status` is the message severity class ("success", "danger") that the
/// templates map onto alert styling.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub status: String,
    pub text: String,
}

/// A renderable page: title, status messages, and a content payload
/// (a scan, aggregate counts, or nothing).
#[derive(Debug, Serialize)]
pub struct Page {
    pub site_name: String,
    pub title: String,
    pub messages: Vec<Message>,
    pub content: serde_json::Value,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            site_name: String::new(),
            title: title.into(),
            messages: Vec::new(),
            content: serde_json::Value::Null,
        }
    }

    /// Add a status message.
    pub fn add_message(&mut self, status: &str, text: impl Into<String>) {
        self.messages.push(Message {
            status: status.to_string(),
            text: text.into(),
        });
    }

    /// Attach a content payload for the template.
    pub fn with_content(mut self, content: &impl Serialize) -> Self {
        match serde_json::to_value(content) {
            Ok(value) => self.content = value,
            Err(error) => {
                tracing::error!(error = %error, "unable to serialize page content");
            }
        }

        self
    }
}

/// Render a page with the named template (without the `.html` extension).
///
/// Rendering failures are logged in full and answered with a bare 500; they
/// indicate a broken template, not a user problem.
pub fn render(state: &AppState, template: &str, mut page: Page) -> Response {
    if page.site_name.is_empty() {
        page.site_name = state.config.app.name.clone();
    }

    let context = match tera::Context::from_serialize(&page) {
        Ok(context) => context,
        Err(error) => {
            tracing::error!(error = %error, template, "unable to build template context");
            return (StatusCode::INTERNAL_SERVER_ERROR, "rendering failed").into_response();
        }
    };

    match state.templates.render(&format!("{template}.html"), &context) {
        Ok(html) => Html(html).into_response(),
        Err(error) => {
            tracing::error!(error = %error, template, "unable to render template");
            (StatusCode::INTERNAL_SERVER_ERROR, "rendering failed").into_response()
        }
    }
}
