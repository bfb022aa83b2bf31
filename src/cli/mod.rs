//! Command-line interface for isoform-cc.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **summary**: Print the member count of every component
//! - **largest**: Print the summary plus the largest component
//! - **table**: Print each reference sequence with its component id
//! - **split**: Write one alignment file per component
//!
//! ## Usage
//!
//! ```text
//! # Component sizes from a queryname-sorted BAM
//! isoform-cc summary reads.bam
//!
//! # Input in any order
//! isoform-cc summary reads.bam --grouping materialize
//!
//! # Per-isoform table to a file
//! isoform-cc table reads.bam components.tsv
//!
//! # One BAM per component with at least 2 isoforms
//! isoform-cc split reads.bam --prefix clusters/sample --min-size 2
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::clustering::{Clustering, ClusteringConfig, ClusteringEngine, EdgePolicy, Grouping};
use crate::core::RecordSource;
use crate::parsing::alignment::{AlignmentFile, SourceOptions};

pub mod largest;
pub mod split;
pub mod summary;
pub mod table;

#[derive(Parser)]
#[command(name = "isoform-cc")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Cluster isoforms into connected components of shared reads")]
#[command(
    long_about = "isoform-cc links reference sequences (isoforms) that share aligned reads.\n\nEvery read aligned to two or more isoforms joins them with an edge; the connected components of the resulting graph are reported as counts, the largest component, a per-isoform table, or one alignment file per component."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the member count of each component
    Summary(summary::SummaryArgs),

    /// Print component sizes and the largest component
    Largest(largest::LargestArgs),

    /// Print every isoform with its component id (always TSV)
    Table(table::TableArgs),

    /// Write one alignment file per component
    Split(split::SplitArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Options shared by every command.
#[derive(clap::Args)]
pub struct ClusterArgs {
    /// Input alignments (BAM or SAM)
    #[arg(required = true)]
    pub input: PathBuf,

    /// How records are grouped by read name. `adjacent` streams and requires
    /// all records of a read to be contiguous (queryname sorted or query
    /// grouped); this is not checked. `materialize` holds every record in
    /// memory and accepts any order.
    #[arg(long, value_enum, default_value = "adjacent")]
    pub grouping: Grouping,

    /// How a read's isoforms are joined: `star` links the first isoform to the
    /// rest, `clique` links every pair. Components are identical either way.
    #[arg(long, value_enum, default_value = "star")]
    pub edges: EdgePolicy,

    /// Ignore alignments with a lower mapping quality
    #[arg(long, default_value = "0")]
    pub min_mapq: u8,
}

impl ClusterArgs {
    #[must_use]
    pub fn config(&self) -> ClusteringConfig {
        ClusteringConfig {
            grouping: self.grouping,
            edge_policy: self.edges,
        }
    }

    /// Open the input and run one clustering pass over it. The input file is
    /// closed and the graph released when this returns.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be opened or read.
    pub fn cluster(&self, verbose: bool) -> anyhow::Result<Clustering> {
        let options = SourceOptions {
            min_mapping_quality: self.min_mapq,
        };
        let mut source = AlignmentFile::open(&self.input, options)?;
        source.warn_if_not_grouped(self.grouping);

        if verbose {
            eprintln!(
                "Read header with {} reference sequences from {}",
                source.references().len(),
                self.input.display()
            );
        }

        let clustering = ClusteringEngine::new(self.config()).cluster(&mut source)?;

        if verbose {
            eprintln!(
                "Grouped {} records ({} skipped) into {} reads; {} edges, {} components",
                clustering.stats.records,
                clustering.stats.records_skipped,
                clustering.stats.read_groups,
                clustering.stats.edges,
                clustering.assignment.component_count(),
            );
        }

        Ok(clustering)
    }
}
