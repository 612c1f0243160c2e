use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use super::ReadSeek;
use crate::error::{Error, Result};

/// Local file fallback for the reader stack.
///
/// Wraps a [`File`] together with its size taken from filesystem metadata at
/// open time, so local and remote resources expose the same surface. Seeks
/// are bounds-checked against that size with the same policy as the remote
/// reader.
pub struct LocalFileReader {
    file: File,
    size: u64,
}

impl LocalFileReader {
    pub fn new(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let size = file.metadata().map_err(Error::Io)?.len();
        Ok(Self { file, size })
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

impl Read for LocalFileReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl Seek for LocalFileReader {
    /// Seek within `[0, size]`; targets past the end are rejected rather
    /// than producing the sparse-extension behavior of a raw file handle.
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(n) => n as i128,
            SeekFrom::Current(delta) => self.file.stream_position()? as i128 + delta as i128,
            SeekFrom::End(delta) => self.size as i128 + delta as i128,
        };
        if target < 0 || target > self.size as i128 {
            return Err(Error::InvalidSeek {
                position: target as i64,
                size: self.size,
            }
            .into());
        }
        self.file.seek(SeekFrom::Start(target as u64))
    }
}

impl ReadSeek for LocalFileReader {
    fn size(&self) -> u64 {
        self.size
    }
}
