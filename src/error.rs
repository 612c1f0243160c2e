use std::io;

/// Errors produced by the reader stack.
///
/// `EndOfResource` is a sentinel used between the fetcher and the cursor
/// engine. `Read` converts it into a clean short (or zero-length) read, so
/// callers of the public surface normally never see it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The total size of a remote resource could not be determined.
    #[error("size probe failed: {0}")]
    Probe(String),
    /// The server answered with a non-success status code.
    #[error("unexpected http status: {0}")]
    UnexpectedStatus(reqwest::StatusCode),
    /// Transport-level failure while talking to the server.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    /// Seek target outside `[0, size]`. The cursor is left unchanged.
    #[error("invalid seek to {position} (resource size {size})")]
    InvalidSeek { position: i64, size: u64 },
    /// Fetch requested at or beyond the end of the resource.
    #[error("end of resource")]
    EndOfResource,
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl From<Error> for io::Error {
    fn from(e: Error) -> Self {
        match e {
            Error::Io(e) => e,
            Error::EndOfResource => io::Error::new(io::ErrorKind::UnexpectedEof, e),
            Error::InvalidSeek { .. } => io::Error::new(io::ErrorKind::InvalidInput, e),
            other => io::Error::other(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
