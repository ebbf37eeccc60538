//! Error types and HTTP response conversion

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the application error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the application
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// Template root unreadable during discovery
    #[error("template discovery failed under {root}: {source}")]
    Discovery {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed template or layout source; aborts the whole cache build
    #[error("failed to compile template {name}: {source}")]
    Compile {
        name: String,
        #[source]
        source: Box<minijinja::Error>,
    },

    /// Requested page was never registered in the cache
    #[error("no template registered under {page:?}")]
    TemplateNotFound { page: String },

    /// Output sink rejected the rendered bytes
    #[error("failed to write rendered page to output: {0}")]
    Write(#[source] std::io::Error),

    /// Session error
    #[error("Session error: {0}")]
    Session(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::TemplateNotFound { page } => {
                tracing::error!(page = %page, "render requested for unregistered page");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Error::Discovery { root, source } => {
                tracing::error!(root = %root.display(), error = %source, "template discovery failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Error::Compile { name, source } => {
                tracing::error!(name = %name, error = %source, "template compilation failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Error::Write(source) => {
                // The client is likely gone; there is nobody left to read this.
                tracing::warn!(error = %source, "failed to write response body");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Error::Session(msg) => {
                tracing::error!("Session error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Error::Config(e) => {
                tracing::error!("Configuration error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Error::Io(e) => {
                tracing::error!("I/O error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Html(error_page(status))).into_response()
    }
}

/// Minimal fallback body. Error pages never go through the template
/// pipeline, so a broken pipeline can still produce a response.
fn error_page(status: StatusCode) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>{status}</title></head>\
         <body><h1>{status}</h1><p>Something went wrong. Please try again.</p></body></html>",
    )
}

// Manual From implementation for the boxed error
impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}
