use std::io::Error as IoError;
use std::str::Utf8Error;

#[cfg(not(any(feature = "async_std", feature = "async_tokio")))]
use std::io::{BufRead, BufReader, Read};

#[cfg(feature = "async_tokio")]
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

#[cfg(feature = "async_std")]
use async_std::io::{prelude::BufReadExt, BufReader, Read};

/// Reads a beatmap line by line, skipping blank lines.
pub(crate) struct FileReader<R> {
    buf: Vec<u8>,
    line_number: usize,
    inner: BufReader<R>,
}

#[cfg(not(any(feature = "async_std", feature = "async_tokio")))]
impl<R: Read> FileReader<R> {
    pub(crate) fn new(src: R) -> Self {
        Self {
            inner: BufReader::new(src),
            buf: Vec::with_capacity(32),
            line_number: 0,
        }
    }

    /// Read the next relevant line, returning the amount of read bytes; 0 on EOF.
    pub(crate) fn next_line(&mut self) -> Result<usize, IoError> {
        loop {
            self.buf.clear();
            let bytes = self.inner.read_until(b'\n', &mut self.buf)?;
            self.line_number += 1;

            if bytes == 0 || !is_blank(&self.buf) {
                return Ok(bytes);
            }
        }
    }
}

#[cfg(feature = "async_tokio")]
impl<R: AsyncRead + Unpin> FileReader<R> {
    pub(crate) fn new(src: R) -> Self {
        Self {
            inner: BufReader::new(src),
            buf: Vec::with_capacity(32),
            line_number: 0,
        }
    }

    /// Read the next relevant line, returning the amount of read bytes; 0 on EOF.
    pub(crate) async fn next_line(&mut self) -> Result<usize, IoError> {
        loop {
            self.buf.clear();
            let bytes = self.inner.read_until(b'\n', &mut self.buf).await?;
            self.line_number += 1;

            if bytes == 0 || !is_blank(&self.buf) {
                return Ok(bytes);
            }
        }
    }
}

#[cfg(feature = "async_std")]
impl<R: Read + Unpin> FileReader<R> {
    pub(crate) fn new(src: R) -> Self {
        Self {
            inner: BufReader::new(src),
            buf: Vec::with_capacity(32),
            line_number: 0,
        }
    }

    /// Read the next relevant line, returning the amount of read bytes; 0 on EOF.
    pub(crate) async fn next_line(&mut self) -> Result<usize, IoError> {
        loop {
            self.buf.clear();
            let bytes = self.inner.read_until(b'\n', &mut self.buf).await?;
            self.line_number += 1;

            if bytes == 0 || !is_blank(&self.buf) {
                return Ok(bytes);
            }
        }
    }
}

impl<R> FileReader<R> {
    /// The current line without trailing whitespace.
    pub(crate) fn get_line(&self) -> Result<&str, Utf8Error> {
        std::str::from_utf8(&self.buf).map(str::trim_end)
    }

    /// 1-based number of the current line.
    pub(crate) fn line_number(&self) -> usize {
        self.line_number
    }
}

/// Whitespace-only lines, including a lone byte order mark.
pub(crate) fn is_blank(line: &[u8]) -> bool {
    const BOM: &[u8] = &[239, 187, 191]; // U+FEFF

    let line = line.strip_prefix(BOM).unwrap_or(line);

    line.iter().all(u8::is_ascii_whitespace)
}
