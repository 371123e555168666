use axum::http::StatusCode;
use axum::response::IntoResponse;
use link_alloc::AllocError;
use link_alloc::ConfigError;

/// Problems with a submitted configuration form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("form field `{0}` is missing")]
    MissingField(&'static str),

    #[error("form field `{field}` is not a valid number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Problems with the command line settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("missing {0}")]
    Missing(&'static str),
}

/// Errors produced while handling a request.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// No link could be allocated.
    ///
    /// This converts to `404 Not Found`.
    #[error(transparent)]
    Alloc(#[from] AllocError),

    /// The submitted configuration was rejected.
    ///
    /// This converts to `400 Bad Request`.
    #[error(transparent)]
    Form(#[from] FormError),

    /// The control panel could not be rendered.
    ///
    /// This converts to `500 Internal Server Error`.
    #[error("template error: {0}")]
    Template(#[from] askama::Error),
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Alloc(_) => StatusCode::NOT_FOUND,
            Self::Form(_) => StatusCode::BAD_REQUEST,
            Self::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), self.to_string()).into_response()
    }
}
