use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("malformed post: {0}")]
    MalformedPost(String),

    #[error("authentication rejected")]
    Auth,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unexpected response status {status}")]
    Response { status: u16, body: String },

    #[error("invalid page size {0}, must be at least 1")]
    InvalidPageSize(u32),

    #[error("xml: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("http: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
