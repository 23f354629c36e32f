use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP status {0}: {1}")]
    HttpStatus(StatusCode, String),
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("item {0} has no blob URL")]
    NoBlob(String),
}
