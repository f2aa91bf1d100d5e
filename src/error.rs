use hmac::digest::InvalidLength;
use reqwest::StatusCode;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Sign Error: {0}")]
    Sign(String),
    #[error("Execute Request Error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Request Rejected ({status}): {body}")]
    Rejected { status: StatusCode, body: String },
    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config Error: {0}")]
    Config(String),
    #[error("Invalid Target Id: {0:?}")]
    InvalidTargetId(String),
    #[error("Invalid Header: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),
    #[error("Invalid Url: {0}")]
    Url(#[from] url::ParseError),
    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the remote service answered with a non-success status.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

impl From<InvalidLength> for Error {
    fn from(e: InvalidLength) -> Self {
        Self::Sign(e.to_string())
    }
}
