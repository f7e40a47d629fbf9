//! URL file writer

use crate::error::{Error, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes one URL per line to an underlying writer
pub struct UrlWriter<W: Write = File> {
    /// Buffered output
    writer: BufWriter<W>,
    /// Number of lines written through this writer
    lines_written: usize,
    /// File path, when backed by a file
    path: Option<PathBuf>,
}

impl UrlWriter<File> {
    /// Open `path` for appending, creating it if it does not exist
    pub fn open_append(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| Error::Output {
                message: format!("Failed to open {}: {e}", path.display()),
            })?;

        Ok(Self {
            writer: BufWriter::new(file),
            lines_written: 0,
            path: Some(path.to_path_buf()),
        })
    }
}

impl<W: Write> UrlWriter<W> {
    /// Wrap an arbitrary writer
    pub fn from_writer(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            lines_written: 0,
            path: None,
        }
    }

    /// Append each URL followed by a newline, in order, then flush.
    ///
    /// Returns the number of lines written.
    pub fn append_urls<S: AsRef<str>>(&mut self, urls: &[S]) -> Result<usize> {
        for url in urls {
            self.writer
                .write_all(url.as_ref().as_bytes())
                .and_then(|()| self.writer.write_all(b"\n"))
                .map_err(|e| Error::Output {
                    message: format!("Failed to write URL: {e}"),
                })?;
        }
        self.flush()?;

        self.lines_written += urls.len();
        Ok(urls.len())
    }

    /// Flush buffered lines to the underlying writer
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| Error::Output {
            message: format!("Failed to flush output: {e}"),
        })
    }

    /// Get the number of lines written so far
    #[must_use]
    pub fn lines_written(&self) -> usize {
        self.lines_written
    }

    /// Path of the backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Flush and return the underlying writer
    pub fn into_inner(self) -> Result<W> {
        self.writer.into_inner().map_err(|e| Error::Output {
            message: format!("Failed to flush output: {}", e.error()),
        })
    }
}

impl<W: Write> std::fmt::Debug for UrlWriter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlWriter")
            .field("path", &self.path)
            .field("lines_written", &self.lines_written)
            .finish_non_exhaustive()
    }
}
