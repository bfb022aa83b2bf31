//! Record sources backed by alignment files.
//!
//! This module reads SAM and BAM files with noodles and exposes them as a
//! [`RecordSource`](crate::core::RecordSource):
//!
//! - **SAM** (`.sam`, or no extension): text alignments
//! - **BAM** (`.bam`): BGZF-compressed binary alignments
//!
//! ## Example
//!
//! ```rust,no_run
//! use isoform_cc::clustering::{ClusteringConfig, ClusteringEngine};
//! use isoform_cc::parsing::alignment::{AlignmentFile, SourceOptions};
//! use std::path::Path;
//!
//! let mut source = AlignmentFile::open(Path::new("reads.bam"), SourceOptions::default()).unwrap();
//! let clustering = ClusteringEngine::new(ClusteringConfig::default())
//!     .cluster(&mut source)
//!     .unwrap();
//! println!("{} components", clustering.assignment.component_count());
//! ```
//!
//! ## What counts as an observation
//!
//! | Record | Observed |
//! |--------|----------|
//! | Mapped, named, MAPQ ≥ minimum | Yes |
//! | Unmapped (flag 0x4 or no reference) | No |
//! | No read name (`*`) | No |
//! | MAPQ below minimum, or missing when a minimum is set | No |
//!
//! Secondary and supplementary alignments are observations: they are exactly
//! the records that tie a read to several isoforms.

pub mod alignment;
