//! Core data types for isoform clustering.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`AlignmentRecord`]: One observation of a read aligned to a reference sequence
//! - [`ReadGroup`]: Every reference id observed for a single read name
//! - [`ReferenceTable`]: The shared, read-only reference-index → name table
//! - [`RecordSource`]: The lazy stream of records consumed by the clustering engine
//! - [`ClusterError`]: Every fatal condition a run can hit
//!
//! ## Vertices
//!
//! Each reference sequence (isoform) in the alignment header is one vertex. The
//! vertex set is always `[0, N)` where `N` is the number of `@SQ` entries, so
//! isoforms that no read touches still appear in the output as singletons.

pub mod error;
pub mod record;
pub mod reference;

pub use error::ClusterError;
pub use record::{AlignmentRecord, MemorySource, ReadGroup, RecordSource};
pub use reference::ReferenceTable;
