pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("url is empty")]
    Empty,

    #[error("url parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("first path segment in url cannot contain colon: {0}")]
    ColonInFirstSegment(String),

    #[error("invalid percent-encoding: {0}")]
    InvalidEscape(String),

    #[error("invalid utf-8 after unescaping: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}
