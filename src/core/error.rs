use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions that abort a clustering run.
///
/// Argument-count problems never reach this type; clap reports them as usage
/// errors before any input is touched.
#[derive(Error, Debug)]
pub enum ClusterError {
    #[error("Could not open input file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not read header from {path}: {source}")]
    Header {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The record stream failed part-way through. This is never produced for a
    /// clean end of stream.
    #[error("Corrupt record stream: failed to read record {record_number}: {source}")]
    CorruptRecord {
        record_number: u64,
        #[source]
        source: io::Error,
    },

    #[error("Reference id {reference_id} is outside the header's {reference_count} reference sequences")]
    ReferenceOutOfRange {
        reference_id: usize,
        reference_count: usize,
    },

    #[error("Could not write output {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}
