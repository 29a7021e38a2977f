//! Errors that stop a page from rendering its form.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::session::AcquireError;
use crate::store::StoreError;
use crate::views::{self, ErrorPage};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unable to connect to the smoothie database: {0}")]
    SessionUnavailable(#[from] AcquireError),

    #[error("Unable to load the ingredient list: {0}")]
    CatalogUnavailable(#[source] StoreError),

    #[error("Unable to render the page: {0}")]
    Render(#[from] minijinja::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::SessionUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::CatalogUnavailable(_) | AppError::Render(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let diagnostics = match &self {
            AppError::SessionUnavailable(e) => {
                e.diagnostics.iter().map(ToString::to_string).collect()
            }
            _ => Vec::new(),
        };

        let page = ErrorPage {
            message: self.to_string(),
            diagnostics,
            nutrition_enabled: false,
        };

        match views::render("error.html", &page) {
            Ok(html) => (status, html).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to render error page");
                (status, self.to_string()).into_response()
            }
        }
    }
}
