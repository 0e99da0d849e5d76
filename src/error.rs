use std::num::ParseIntError;

use thiserror::Error;

/// Any unsuccessful outbound call to the quiz backend.
///
/// The variants only matter for logs; every one of them is shown to the
/// user as the same error panel.
#[derive(Error, Debug)]
pub enum RequestFailure {
    #[error("Invalid endpoint: {0}")]
    Url(#[from] url::ParseError),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend responded {status} for {url}")]
    Status { status: u16, url: String },
}

/// Failure while resolving a page.
#[derive(Error, Debug)]
pub enum PageError {
    #[error(transparent)]
    Request(#[from] RequestFailure),

    #[error("Malformed answers: {0}")]
    Answers(#[from] ParseIntError),
}

pub type Resolved<T> = Result<T, PageError>;
