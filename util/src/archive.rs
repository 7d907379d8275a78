//! CSV archiving functionality
//!
//! Archives are CSV files written into the session's archive directory, one serialised record
//! per row.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use std::path::{Path, PathBuf};
use std::fs::{File, OpenOptions};
use csv::WriterBuilder;
pub use csv::Writer;
use serde::Serialize;
use thiserror::Error;

// Internal imports
use crate::session::Session;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An object used to write CSV archive files.
pub struct Archiver {
    writer: Writer<File>,

    path: PathBuf,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors which can occur while archiving.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Cannot open the archive file: {0}")]
    FileOpenError(std::io::Error),

    #[error("Cannot write a record to the archive: {0}")]
    WriteError(csv::Error),

    #[error("Cannot flush the archive: {0}")]
    FlushError(std::io::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Archiver {
    /// Create a new archiver from a paricular path relative to the session's
    /// archive root.
    ///
    /// Any existing file at the path is truncated.
    pub fn from_path<P: AsRef<Path>>(
        session: &Session, path: P
    ) -> Result<Self, ArchiveError> {
        Self::create(session.arch_root.join(path))
    }

    /// Create a new archiver writing to the given path on the host.
    pub fn create<P: Into<PathBuf>>(path: P) -> Result<Self, ArchiveError> {
        let path = path.into();

        let file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(&path)
            .map_err(ArchiveError::FileOpenError)?;

        let writer = WriterBuilder::new()
            .has_headers(true)
            .from_writer(file);

        Ok(Self { writer, path })
    }

    /// The path of the archive file on the host.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialise a record into the archive.
    pub fn serialise<T: Serialize>(&mut self, record: T) -> Result<(), ArchiveError> {
        self.writer.serialize(record).map_err(ArchiveError::WriteError)
    }

    /// Serialise every record from the iterator into the archive and flush it.
    pub fn serialise_all<T, I>(&mut self, records: I) -> Result<(), ArchiveError>
    where
        T: Serialize,
        I: IntoIterator<Item = T>
    {
        for record in records {
            self.serialise(record)?;
        }

        self.flush()
    }

    /// Flush any buffered records to the file.
    pub fn flush(&mut self) -> Result<(), ArchiveError> {
        self.writer.flush().map_err(ArchiveError::FlushError)
    }
}
