// src/error/types.rs
use crate::domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhotoError {
    /// Transport-level failure talking to the remote catalog or image host.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered but the body carried no usable payload.
    #[error("Empty response from server")]
    EmptyResponse,

    /// The catalog body did not match the expected JSON shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A fetched image body was not decodable as an image.
    #[error("Image decode error: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The record has no remote URL and no cached image to fall back on.
    #[error("Photo {photo_id} has no remote URL")]
    MissingImageUrl { photo_id: String },

    /// Local store write or read failed.
    #[error("Persistence error: {0}")]
    Persistence(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Resource not found")]
    NotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl From<chrono::ParseError> for PhotoError {
    fn from(err: chrono::ParseError) -> Self {
        PhotoError::Other(format!("Date parse error: {}", err))
    }
}

impl From<r2d2::Error> for PhotoError {
    fn from(err: r2d2::Error) -> Self {
        PhotoError::Pool(err.to_string())
    }
}

pub type PhotoResult<T> = Result<T, PhotoError>;
