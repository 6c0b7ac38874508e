//! Request-level errors and the error pages they render to.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use thiserror::Error;

use crate::flash::Flash;
use crate::pages::{self, Page, Section};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::NotFound(what) => {
                tracing::debug!(what, "not found");
                pages::errors::not_found()
            }
            AppError::Database(e) => {
                tracing::error!(error = %e, "database error");
                pages::errors::server_error()
            }
        };

        Page::new("Fyyur", Section::Home, body, Flash::default())
            .with_status(status)
            .into_response()
    }
}

/// Fallback for unknown routes
pub async fn not_found() -> AppError {
    AppError::NotFound("page")
}
