//! Grouping, graph construction and connected components.
//!
//! The pipeline, leaves first:
//!
//! 1. A [`ReadGrouper`] turns the record stream into [`ReadGroup`]s, one per
//!    read name. Two strategies exist and the caller always picks one through
//!    [`Grouping`]:
//!    - [`Grouping::Adjacent`] streams and requires records of a read to be
//!      contiguous (queryname-sorted or query-grouped input).
//!    - [`Grouping::Materialize`] buffers everything and accepts any order.
//! 2. [`IsoformGraph`] turns each group into edges between reference ids under
//!    the chosen [`EdgePolicy`].
//! 3. [`ComponentAssignment`] consumes the graph and labels every vertex.
//!
//! [`ClusteringEngine`] runs all three and hands back the assignment after the
//! graph has been dropped.
//!
//! ## Example
//!
//! ```rust
//! use isoform_cc::clustering::{ClusteringConfig, ClusteringEngine};
//! use isoform_cc::core::{MemorySource, ReferenceTable};
//!
//! let references: ReferenceTable = ["A", "B", "C", "D"].into_iter().collect();
//! let mut source = MemorySource::from_pairs(
//!     references,
//!     [("r1", 0), ("r1", 1), ("r2", 1), ("r2", 2), ("r3", 3)],
//! );
//!
//! let engine = ClusteringEngine::new(ClusteringConfig::default());
//! let clustering = engine.cluster(&mut source).unwrap();
//!
//! assert_eq!(clustering.assignment.component_count(), 2);
//! assert_eq!(
//!     clustering.assignment.component_of(0),
//!     clustering.assignment.component_of(2)
//! );
//! ```
//!
//! [`ReadGroup`]: crate::core::ReadGroup

pub mod components;
pub mod engine;
pub mod graph;
pub mod grouping;

pub use components::ComponentAssignment;
pub use engine::{Clustering, ClusteringConfig, ClusteringEngine, ClusteringStats};
pub use graph::{EdgePolicy, IsoformGraph};
pub use grouping::{AdjacentRunGrouper, Grouping, GroupingStats, MaterializingGrouper, ReadGrouper};
