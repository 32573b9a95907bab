// In crates/api-client/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to build the API client: {0}")]
    ClientBuildError(String),
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(#[from] serde_json::Error),
    #[error("API error: code {code}, msg: {msg}")]
    ApiError { code: String, msg: String },
    #[error("No price data returned for {0}")]
    EmptyResponse(String),
    #[error("Invalid price data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, Error>;

// Any failure to obtain prices is fatal for the run and reaches the core as
// `DataUnavailable`.
impl From<Error> for core_types::Error {
    fn from(err: Error) -> Self {
        core_types::Error::DataUnavailable(err.to_string())
    }
}
