//! # isoform-cc
//!
//! A library for clustering isoforms by the reads they share.
//!
//! Long- and short-read aligners frequently place one read on several isoforms
//! of the same gene, or on isoforms of paralogous genes. Treating each
//! reference sequence as a vertex and each multiply-aligned read as evidence
//! that its references belong together yields a graph whose connected
//! components are the groups of isoforms that cannot be told apart by the
//! reads alone.
//!
//! `isoform-cc` builds that graph from a SAM/BAM file in a single pass and
//! reports its connected components.
//!
//! ## Features
//!
//! - **Streaming or buffered grouping**: group queryname-sorted input in
//!   constant memory, or any input order by holding it in memory
//! - **Star or clique edges**: same components, different edge counts
//! - **Every isoform reported**: isoforms without reads are singleton components
//! - **Split output**: one alignment file per component, from a second pass
//!
//! ## Example
//!
//! ```rust
//! use isoform_cc::{ClusteringConfig, ClusteringEngine, MemorySource, ReferenceTable};
//!
//! let references: ReferenceTable = ["A", "B"].into_iter().collect();
//! let mut source = MemorySource::from_pairs(references, [("r1", 0)]);
//!
//! let clustering = ClusteringEngine::new(ClusteringConfig::default())
//!     .cluster(&mut source)
//!     .unwrap();
//!
//! let mut table = Vec::new();
//! isoform_cc::report::write_table(&mut table, &clustering.assignment, &clustering.references)
//!     .unwrap();
//! assert_eq!(
//!     String::from_utf8(table).unwrap(),
//!     "seqid\tseqname\tcomponent\n0\tA\t0\n1\tB\t1\n"
//! );
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Records, read groups, the reference table, and errors
//! - [`clustering`]: Grouping strategies, the isoform graph, and components
//! - [`parsing`]: SAM/BAM record sources
//! - [`report`]: Summary, largest-component, table, and split outputs
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod clustering;
pub mod core;
pub mod parsing;
pub mod report;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::clustering::{
    Clustering, ClusteringConfig, ClusteringEngine, ComponentAssignment, EdgePolicy, Grouping,
};
pub use crate::core::{AlignmentRecord, ClusterError, MemorySource, ReadGroup, RecordSource, ReferenceTable};
