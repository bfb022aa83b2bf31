use serde::Serialize;
use tracing::{debug, info};

use crate::clustering::components::ComponentAssignment;
use crate::clustering::graph::{EdgePolicy, IsoformGraph};
use crate::clustering::grouping::{Grouping, GroupingStats};
use crate::core::{ClusterError, RecordSource, ReferenceTable};

/// Configuration for clustering
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ClusteringConfig {
    pub grouping: Grouping,
    pub edge_policy: EdgePolicy,
}

/// Counters describing one clustering run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClusteringStats {
    /// Observations grouped
    pub records: u64,
    /// Records the source read but did not hand over (unmapped, unnamed, filtered)
    pub records_skipped: u64,
    pub read_groups: u64,
    pub multi_reference_groups: u64,
    /// Distinct edges in the graph when it was solved
    pub edges: usize,
}

impl ClusteringStats {
    fn new(grouping: GroupingStats, records_skipped: u64, edges: usize) -> Self {
        Self {
            records: grouping.records,
            records_skipped,
            read_groups: grouping.read_groups,
            multi_reference_groups: grouping.multi_reference_groups,
            edges,
        }
    }
}

/// The outcome of a run: the partition, the reference names it indexes, and
/// counters.
#[derive(Debug, Clone)]
pub struct Clustering {
    pub references: ReferenceTable,
    pub assignment: ComponentAssignment,
    pub stats: ClusteringStats,
}

/// Runs grouping, graph construction and component labelling over one pass of
/// a record source.
pub struct ClusteringEngine {
    config: ClusteringConfig,
}

impl ClusteringEngine {
    #[must_use]
    pub fn new(config: ClusteringConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ClusteringConfig {
        &self.config
    }

    /// Drain `source` and return its component partition.
    ///
    /// The graph lives only inside this call; it is consumed by component
    /// labelling before the result is returned, including on error.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by the source, or
    /// `ClusterError::ReferenceOutOfRange` for a record outside the header.
    pub fn cluster(&self, source: &mut dyn RecordSource) -> Result<Clustering, ClusterError> {
        let references = source.references().clone();
        let policy = self.config.edge_policy;
        let mut grouper = self.config.grouping.grouper();

        debug!(
            references = references.len(),
            grouping = ?self.config.grouping,
            edges = ?policy,
            "Building isoform graph"
        );

        let (assignment, grouping, edges) = {
            let mut graph = IsoformGraph::new(references.len());
            let grouping = grouper.group(source, &mut |group| {
                graph.add_group(&group, policy).map(|_| ())
            })?;
            let edges = graph.edge_count();
            (ComponentAssignment::from_graph(graph), grouping, edges)
        };

        let stats = ClusteringStats::new(grouping, source.records_skipped(), edges);
        info!(
            records = stats.records,
            skipped = stats.records_skipped,
            read_groups = stats.read_groups,
            edges = stats.edges,
            components = assignment.component_count(),
            "Clustered {} isoforms",
            assignment.vertex_count()
        );

        Ok(Clustering {
            references,
            assignment,
            stats,
        })
    }
}
