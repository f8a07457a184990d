use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("Failed to connect to Lokalise")]
    #[diagnostic(
        code(lokalise_sync::lokalise::connection_failed),
        help(
            "Check network access to the Lokalise API.\nOr set LOKALISE_API_URL to point to the correct server."
        )
    )]
    ConnectionFailed {
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid response from Lokalise: {message}")]
    #[diagnostic(
        code(lokalise_sync::lokalise::invalid_response),
        help("The server returned data in an unexpected format.")
    )]
    InvalidResponse { message: String },

    #[error("Lokalise API error ({status}): {message}")]
    #[diagnostic(code(lokalise_sync::lokalise::api_error))]
    Status { status: u16, message: String },

    #[error("Failed to write bundle: {0}")]
    #[diagnostic(code(lokalise_sync::lokalise::bundle_io))]
    BundleIo(#[from] std::io::Error),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            ApiError::ConnectionFailed { source: e }
        } else {
            ApiError::InvalidResponse {
                message: e.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::InvalidResponse {
            message: e.to_string(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
