//! Sequential writer for one destination archive.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Destination file of one transfer. Created (or truncated) on open; chunks
/// are appended in arrival order. Dropping it without `sync` leaves whatever
/// was written in place.
#[derive(Debug)]
pub struct StorageWriter {
    file: File,
    path: PathBuf,
    written: u64,
}

impl StorageWriter {
    /// Create `path`, truncating any existing file.
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        Ok(StorageWriter {
            file,
            path: path.to_path_buf(),
            written: 0,
        })
    }

    /// Append one body chunk.
    pub fn append(&mut self, data: &[u8]) -> io::Result<()> {
        self.file.write_all(data)?;
        self.written += data.len() as u64;
        Ok(())
    }

    /// Bytes appended so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush file data to disk.
    pub fn sync(&self) -> io::Result<()> {
        self.file.sync_all()
    }
}
