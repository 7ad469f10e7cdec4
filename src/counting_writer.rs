//! A `Write` wrapper that tracks the cumulative number of bytes written.
//!
//! The teacher's own ZIP64 writer threads a raw `u64` offset by hand
//! through every write call (`torrentzip_zip64.rs`'s `write_torrentzip_zip64`
//! and `write_central_and_eocd_to`). The streaming rewriter and the
//! central-directory writer both need that running offset, and the latter
//! needs it at three separate checkpoints, so it is worth wrapping once
//! instead of re-threading it by hand at every call site.

use std::io::{self, Write};

pub struct CountingWriter<W> {
    inner: W,
    written: u64,
}

impl<W: Write> CountingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.inner.write_all(buf)?;
        self.written += buf.len() as u64;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
