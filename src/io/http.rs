use bytes::Bytes;
use log::debug;
use reqwest::blocking::Client;
use reqwest::header;
use std::collections::HashMap;
use std::io::{self, Read, Seek, SeekFrom};

use super::ReadSeek;
use crate::error::{Error, Result};

/// Default length requested per segment fetch (1 MiB).
const DEFAULT_FETCH_SIZE: usize = 65536 * 16;

/// Transport used to probe and fetch byte ranges of a remote resource.
///
/// [`HttpTransport`] is the production implementation; tests substitute an
/// in-memory transport to observe request behavior.
pub trait RangeTransport {
    /// Determine the total size of the resource in bytes.
    fn probe(&self) -> Result<u64>;

    /// Fetch the inclusive byte range `first..=last`.
    fn fetch(&self, first: u64, last: u64) -> Result<Bytes>;
}

/// HTTP transport issuing one blocking GET per range.
///
/// Each fetch is an independent request/response cycle; connection reuse is
/// left to the underlying client. No retry is attempted and no timeout is
/// applied, so a hung request blocks the caller indefinitely.
pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    pub fn new(url: String) -> Result<Self> {
        let client = Client::builder().timeout(None).build()?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RangeTransport for HttpTransport {
    /// Probe the resource size with a minimal `Range: bytes=0-1` request.
    ///
    /// A `Content-Range: bytes <s>-<e>/<total>` response header yields the
    /// total. Without it the `Content-Length` value is accepted as the size,
    /// which usually means the server ignored the Range header entirely.
    /// Range support stays unverified on that path.
    fn probe(&self) -> Result<u64> {
        debug!("probing size of {}", self.url);
        let resp = self
            .client
            .get(&self.url)
            .header(header::RANGE, "bytes=0-1")
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::UnexpectedStatus(status));
        }

        if let Some(value) = resp.headers().get(header::CONTENT_RANGE) {
            let value = value
                .to_str()
                .map_err(|_| Error::Probe("malformed content-range header".into()))?;
            return value
                .split_once('/')
                .and_then(|(_, total)| total.parse().ok())
                .ok_or_else(|| Error::Probe(format!("unparseable content-range: {value}")));
        }

        if let Some(value) = resp.headers().get(header::CONTENT_LENGTH) {
            return value
                .to_str()
                .ok()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| Error::Probe("unparseable content-length header".into()));
        }

        Err(Error::Probe(
            "response carried neither content-range nor content-length".into(),
        ))
    }

    fn fetch(&self, first: u64, last: u64) -> Result<Bytes> {
        debug!("fetching range bytes={}-{} from {}", first, last, self.url);
        let resp = self
            .client
            .get(&self.url)
            .header(header::RANGE, format!("bytes={first}-{last}"))
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::UnexpectedStatus(status));
        }
        Ok(resp.bytes()?)
    }
}

/// The segment currently backing reads without a network call.
struct Window {
    offset: u64,
    bytes: Bytes,
}

impl Window {
    fn contains(&self, position: u64) -> bool {
        self.offset <= position && position < self.offset + self.bytes.len() as u64
    }
}

/// Seekable reader over a range-addressable remote resource.
///
/// Presents the standard [`Read`] + [`Seek`] interface on top of a stateless
/// transport. Fetched segments are cached by their starting offset for the
/// lifetime of the reader and never evicted, so seeking back to a previously
/// visited offset is served without a network round trip.
///
/// A reader holds plain mutable state and does no internal locking; wrap it
/// in [`Shared`](super::Shared) to serialize access across threads.
pub struct RangeReader<T> {
    transport: T,
    size: u64,
    position: u64,
    fetch_size: usize,
    segments: HashMap<u64, Bytes>,
    window: Option<Window>,
}

/// [`RangeReader`] backed by [`HttpTransport`].
pub type HttpRangeReader = RangeReader<HttpTransport>;

impl HttpRangeReader {
    /// Open a reader over an HTTP(S) URL.
    ///
    /// Probes the resource size and loads the initial segment, so this makes
    /// two requests up front.
    pub fn open(url: impl Into<String>) -> Result<Self> {
        Self::with_transport(HttpTransport::new(url.into())?)
    }

    pub fn url(&self) -> &str {
        self.transport.url()
    }

    /// Produce an independent reader over the same URL.
    ///
    /// The clone re-probes the resource and starts with an empty segment
    /// cache; nothing is shared with `self`.
    pub fn try_clone(&self) -> Result<Self> {
        Self::open(self.transport.url().to_string())
    }
}

impl<T: RangeTransport> RangeReader<T> {
    /// Build a reader over an arbitrary transport.
    ///
    /// The size is probed exactly once, here; the resource must not change
    /// size during the reader's lifetime.
    pub fn with_transport(transport: T) -> Result<Self> {
        let size = transport.probe()?;
        debug!("resource size is {} bytes", size);
        let mut reader = Self {
            transport,
            size,
            position: 0,
            fetch_size: DEFAULT_FETCH_SIZE,
            segments: HashMap::new(),
            window: None,
        };
        if size > 0 {
            reader.fill_window(0)?;
        }
        Ok(reader)
    }

    /// Total size of the resource, fixed at open time.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Current cursor position, `0 ..= size`.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Change the per-segment fetch length. Takes effect on the next fetch;
    /// already cached segments keep their original length.
    pub fn set_fetch_size(&mut self, fetch_size: usize) {
        self.fetch_size = fetch_size.max(1);
    }

    /// Fetch the segment starting at `offset`, `fetch_size` bytes long
    /// (clamped to the end of the resource), consulting the cache first.
    ///
    /// Caching is keyed by exact starting offset: revisiting an offset that
    /// falls strictly inside an earlier segment still fetches anew.
    fn fetch_segment(&mut self, offset: u64) -> Result<Bytes> {
        if offset >= self.size {
            return Err(Error::EndOfResource);
        }
        if let Some(segment) = self.segments.get(&offset) {
            debug!("segment at offset {} served from cache", offset);
            return Ok(segment.clone());
        }
        let last = (offset + self.fetch_size as u64).min(self.size) - 1;
        let segment = self.transport.fetch(offset, last)?;
        if segment.is_empty() {
            // An in-bounds range must yield at least one byte. Caching an
            // empty body would make every later lookup at this offset a hit
            // that serves no data.
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("empty response body for range bytes={offset}-{last}"),
            )));
        }
        self.segments.insert(offset, segment.clone());
        Ok(segment)
    }

    fn fill_window(&mut self, offset: u64) -> Result<()> {
        let bytes = self.fetch_segment(offset)?;
        self.window = Some(Window { offset, bytes });
        Ok(())
    }
}

impl<T: RangeTransport> Read for RangeReader<T> {
    /// Serve `buf` from the active window, fetching further segments as
    /// needed. Reaching the end of the resource yields a clean short (or
    /// zero-length) read, never an error.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() || self.position >= self.size {
            return Ok(0);
        }

        // Oversized requests bypass the segment cache: one direct fetch,
        // clamped to the remaining length, not retained.
        if buf.len() > self.fetch_size {
            let last = (self.position + buf.len() as u64).min(self.size) - 1;
            let bytes = self
                .transport
                .fetch(self.position, last)
                .map_err(io::Error::from)?;
            let n = bytes.len().min(buf.len());
            buf[..n].copy_from_slice(&bytes[..n]);
            self.position += n as u64;
            self.window = None;
            return Ok(n);
        }

        let mut copied = 0;
        loop {
            if let Some(window) = &self.window {
                if window.contains(self.position) {
                    let rel = (self.position - window.offset) as usize;
                    let n = (window.bytes.len() - rel).min(buf.len() - copied);
                    buf[copied..copied + n].copy_from_slice(&window.bytes[rel..rel + n]);
                    copied += n;
                    self.position += n as u64;
                    if copied == buf.len() || self.position == self.size {
                        return Ok(copied);
                    }
                }
            }
            // Window missing or exhausted mid-request: load the next one.
            match self.fetch_segment(self.position) {
                Ok(bytes) => {
                    self.window = Some(Window {
                        offset: self.position,
                        bytes,
                    })
                }
                Err(Error::EndOfResource) => return Ok(copied),
                Err(e) => {
                    // The Read contract forbids consuming bytes on error.
                    // Roll the cursor back so the bytes already copied are
                    // served again on the next call.
                    self.position -= copied as u64;
                    return Err(e.into());
                }
            }
        }
    }
}

impl<T: RangeTransport> Seek for RangeReader<T> {
    /// Seek within `[0, size]`.
    ///
    /// `SeekFrom::End(n)` uses the standard convention `size + n` (`n`
    /// typically negative). Targets outside the resource are rejected with
    /// an `InvalidSeek` error and leave the cursor unchanged; unlike a local
    /// file, seeking past the end is not representable here.
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(n) => n as i128,
            SeekFrom::Current(delta) => self.position as i128 + delta as i128,
            SeekFrom::End(delta) => self.size as i128 + delta as i128,
        };
        if target < 0 || target > self.size as i128 {
            return Err(Error::InvalidSeek {
                position: target as i64,
                size: self.size,
            }
            .into());
        }
        let target = target as u64;
        self.position = target;

        let in_window = self.window.as_ref().is_some_and(|w| w.contains(target));
        if !in_window {
            if target == self.size {
                // Nothing left to load; the next read reports end of data.
                self.window = None;
            } else {
                self.fill_window(target).map_err(io::Error::from)?;
            }
        }
        Ok(target)
    }
}

impl<T: RangeTransport> ReadSeek for RangeReader<T> {
    fn size(&self) -> u64 {
        self.size
    }
}
