//! Disk I/O for downloaded archives.
//!
//! Archives are written straight to their final path; a failed transfer
//! leaves the partial file behind.

mod writer;

pub use writer::StorageWriter;
