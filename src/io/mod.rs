//! Reader stack: resource location, the HTTP range reader, the local file
//! fallback, and the bulk read helper.

mod http;
mod local;

pub use http::{HttpRangeReader, HttpTransport, RangeReader, RangeTransport};
pub use local::LocalFileReader;

use flate2::read::GzDecoder;
use std::fs;
use std::io::{self, Read, Seek};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::error::{Error, Result};

/// A byte-addressable resource: sequential reads, absolute seeks, and a size
/// known at open time.
pub trait ReadSeek: Read + Seek {
    fn size(&self) -> u64;
}

/// Classification of a resource identifier, evaluated once before opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Http,
    Https,
    /// The literal identifiers `STDIN`/`stdin`, accepted by [`read_all`] only.
    Stdin,
    /// Anything else is treated as a local filesystem path.
    LocalPath,
}

impl ResourceKind {
    pub fn parse(identifier: &str) -> Self {
        if identifier.starts_with("http://") {
            ResourceKind::Http
        } else if identifier.starts_with("https://") {
            ResourceKind::Https
        } else if identifier == "STDIN" || identifier == "stdin" {
            ResourceKind::Stdin
        } else {
            ResourceKind::LocalPath
        }
    }

    pub fn is_remote(self) -> bool {
        matches!(self, ResourceKind::Http | ResourceKind::Https)
    }
}

/// Open a seekable reader over an identifier.
///
/// HTTP(S) URLs get a [`HttpRangeReader`] (the size probe happens here);
/// anything else is opened as a local file. Standard input is not seekable
/// and is rejected. Use [`read_all`] for it.
pub fn open(identifier: &str) -> Result<Box<dyn ReadSeek>> {
    match ResourceKind::parse(identifier) {
        ResourceKind::Http | ResourceKind::Https => {
            Ok(Box::new(HttpRangeReader::open(identifier)?))
        }
        ResourceKind::LocalPath => Ok(Box::new(LocalFileReader::new(Path::new(identifier))?)),
        ResourceKind::Stdin => Err(Error::Io(io::Error::new(
            io::ErrorKind::Unsupported,
            "stdin is not seekable",
        ))),
    }
}

/// Total size in bytes of the resource behind an identifier.
///
/// Remote sizes come from a range probe, local sizes from filesystem
/// metadata; neither path reads any resource data.
pub fn size_of(identifier: &str) -> Result<u64> {
    match ResourceKind::parse(identifier) {
        ResourceKind::Http | ResourceKind::Https => {
            HttpTransport::new(identifier.to_string())?.probe()
        }
        ResourceKind::LocalPath => Ok(fs::metadata(identifier)?.len()),
        ResourceKind::Stdin => Err(Error::Io(io::Error::new(
            io::ErrorKind::Unsupported,
            "stdin has no determinable size",
        ))),
    }
}

/// Read an entire resource into memory.
///
/// The literal identifiers `STDIN`/`stdin` drain standard input. A `.gz`
/// extension on the identifier wraps the reader in a gzip decoder before
/// reading. The first failure (open, decompression, or read) is returned
/// as-is; there is no partial-result recovery.
pub fn read_all(identifier: &str) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    if ResourceKind::parse(identifier) == ResourceKind::Stdin {
        io::stdin().read_to_end(&mut out)?;
        return Ok(out);
    }

    let mut reader = open(identifier)?;
    let gzipped = Path::new(identifier)
        .extension()
        .is_some_and(|ext| ext == "gz");
    if gzipped {
        GzDecoder::new(reader).read_to_end(&mut out)?;
    } else {
        reader.read_to_end(&mut out)?;
    }
    Ok(out)
}

/// Opt-in mutual exclusion around a reader.
///
/// Readers do no internal locking; callers that share one instance across
/// threads wrap it here and hold the guard from [`acquire`](Self::acquire)
/// for each read/seek sequence.
pub struct Shared<R>(Mutex<R>);

impl<R> Shared<R> {
    pub fn new(reader: R) -> Self {
        Self(Mutex::new(reader))
    }

    /// Block until the reader is available and return exclusive access.
    pub fn acquire(&self) -> MutexGuard<'_, R> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn into_inner(self) -> R {
        self.0.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
