use std::collections::HashSet;

use serde::Serialize;

use crate::core::{ClusterError, ReadGroup};

/// How a read group becomes edges.
///
/// Both policies make every reference in a group mutually reachable, so they
/// produce the same components. They differ only in how many edges are stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum EdgePolicy {
    /// Connect the first reference of a group to each later one: `k - 1` edges.
    #[default]
    Star,
    /// Connect every pair of distinct references in a group: up to `k(k-1)/2` edges.
    Clique,
}

/// Undirected simple graph over reference ids `[0, N)`.
///
/// The vertex count is fixed up front from the header, so references that no
/// read touches are still vertices. Parallel edges and self-loops are never
/// stored.
#[derive(Debug, Clone)]
pub struct IsoformGraph {
    vertex_count: usize,
    edges: HashSet<(usize, usize)>,
}

impl IsoformGraph {
    #[must_use]
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            edges: HashSet::new(),
        }
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn check_vertex(&self, reference_id: usize) -> Result<(), ClusterError> {
        if reference_id < self.vertex_count {
            Ok(())
        } else {
            Err(ClusterError::ReferenceOutOfRange {
                reference_id,
                reference_count: self.vertex_count,
            })
        }
    }

    /// Insert the undirected edge `a — b`. Returns whether a new edge was added;
    /// self-loops and repeats return `false`.
    ///
    /// # Errors
    ///
    /// Returns `ClusterError::ReferenceOutOfRange` if either end is not a vertex.
    pub fn add_edge(&mut self, a: usize, b: usize) -> Result<bool, ClusterError> {
        self.check_vertex(a)?;
        self.check_vertex(b)?;
        if a == b {
            return Ok(false);
        }
        Ok(self.edges.insert((a.min(b), a.max(b))))
    }

    /// Insert the edges for one read group under `policy`. Returns the number of
    /// edges that were new.
    ///
    /// # Errors
    ///
    /// Returns `ClusterError::ReferenceOutOfRange` if any id in the group is not
    /// a vertex, including ids in single-reference groups.
    pub fn add_group(&mut self, group: &ReadGroup, policy: EdgePolicy) -> Result<usize, ClusterError> {
        for &id in &group.reference_ids {
            self.check_vertex(id)?;
        }

        let ids = &group.reference_ids;
        let mut added = 0;
        match policy {
            EdgePolicy::Star => {
                if let Some((&first, rest)) = ids.split_first() {
                    for &id in rest {
                        added += usize::from(self.add_edge(first, id)?);
                    }
                }
            }
            EdgePolicy::Clique => {
                for (i, &a) in ids.iter().enumerate() {
                    for &b in &ids[i + 1..] {
                        added += usize::from(self.add_edge(a, b)?);
                    }
                }
            }
        }
        Ok(added)
    }

    /// Consume the graph into a compressed adjacency list. The edge set is freed
    /// here.
    pub(crate) fn into_adjacency(self) -> Adjacency {
        let mut offsets = vec![0usize; self.vertex_count + 1];
        for &(a, b) in &self.edges {
            offsets[a + 1] += 1;
            offsets[b + 1] += 1;
        }
        for v in 0..self.vertex_count {
            offsets[v + 1] += offsets[v];
        }

        let mut cursor = offsets.clone();
        let mut targets = vec![0usize; offsets[self.vertex_count]];
        for (a, b) in self.edges {
            targets[cursor[a]] = b;
            cursor[a] += 1;
            targets[cursor[b]] = a;
            cursor[b] += 1;
        }

        Adjacency { offsets, targets }
    }
}

/// Neighbour lists in compressed sparse row form.
#[derive(Debug)]
pub(crate) struct Adjacency {
    offsets: Vec<usize>,
    targets: Vec<usize>,
}

impl Adjacency {
    pub(crate) fn vertex_count(&self) -> usize {
        self.offsets.len() - 1
    }

    pub(crate) fn neighbors(&self, vertex: usize) -> &[usize] {
        &self.targets[self.offsets[vertex]..self.offsets[vertex + 1]]
    }
}
