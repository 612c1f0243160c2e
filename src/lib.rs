//! # rangeio
//!
//! Random access reading of large remote binary files over HTTP.
//!
//! This library presents a byte-addressable, seek-then-read interface over
//! resources that live behind HTTP(S) URLs, using Range requests to fetch
//! only the regions actually touched. It targets tools that parse large
//! scientific and genomic binary formats, where scattered slices of a
//! multi-gigabyte remote file are needed but downloading it whole is not an
//! option. Fetched segments are cached per reader, so revisiting an offset
//! costs no extra round trip.
//!
//! ## Features
//!
//! - [`Read`](std::io::Read) + [`Seek`](std::io::Seek) over HTTP(S) URLs via
//!   Range requests, with an internal segment cache
//! - Transparent fallback to local files for non-URL identifiers
//! - Bulk reading with gzip auto-decompression and a stdin special case
//! - Fixed-width little-endian decode/encode helpers in [`codec`], for
//!   structured records on top of any reader
//!
//! ## Example
//!
//! ```no_run
//! use std::io::{Seek, SeekFrom};
//!
//! fn main() -> rangeio::Result<()> {
//!     let mut reader = rangeio::open("https://example.com/huge.bin")?;
//!
//!     // Jump straight to a record in the middle of the remote file.
//!     reader.seek(SeekFrom::Start(0x1_0000))?;
//!     let name = rangeio::codec::read_string(&mut reader)?;
//!     let count = rangeio::codec::read_i32(&mut reader)?;
//!     println!("{name}: {count}");
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod error;
pub mod io;

pub use error::{Error, Result};
pub use io::{
    HttpRangeReader, HttpTransport, LocalFileReader, RangeReader, RangeTransport, ReadSeek,
    ResourceKind, Shared, open, read_all, size_of,
};
