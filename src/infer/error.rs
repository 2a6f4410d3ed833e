use reqwest::header::InvalidHeaderValue;
use thiserror::Error;

/// Failure to turn a credential into a usable upstream client.
#[derive(Error, Debug)]
pub enum ConnectError {
    #[error("credential is missing or empty")]
    MissingCredential,

    #[error("credential is not a valid header value: {0}")]
    InvalidCredential(#[from] InvalidHeaderValue),
}
