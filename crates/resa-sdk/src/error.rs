//! SDK error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("not logged in; call login() first")]
    NotLoggedIn,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },
}
