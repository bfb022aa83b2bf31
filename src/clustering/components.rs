use std::collections::VecDeque;

use serde::Serialize;

use crate::clustering::graph::IsoformGraph;

const UNASSIGNED: usize = usize::MAX;

/// Connected-component labelling of every vertex in an [`IsoformGraph`].
///
/// Component ids are dense from 0 and follow discovery order: a breadth-first
/// traversal is started from each unlabelled vertex in ascending id order, so
/// the component holding vertex 0 is always component 0. Member lists are
/// sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentAssignment {
    vertex_component: Vec<usize>,
    members: Vec<Vec<usize>>,
}

impl ComponentAssignment {
    /// Label the components of `graph`, consuming it. The graph's memory is
    /// gone once this returns.
    #[must_use]
    pub fn from_graph(graph: IsoformGraph) -> Self {
        let adjacency = graph.into_adjacency();
        let vertex_count = adjacency.vertex_count();

        let mut vertex_component = vec![UNASSIGNED; vertex_count];
        let mut members: Vec<Vec<usize>> = Vec::new();
        let mut queue = VecDeque::new();

        for start in 0..vertex_count {
            if vertex_component[start] != UNASSIGNED {
                continue;
            }

            let id = members.len();
            let mut component = Vec::new();
            vertex_component[start] = id;
            queue.push_back(start);

            while let Some(vertex) = queue.pop_front() {
                component.push(vertex);
                for &next in adjacency.neighbors(vertex) {
                    if vertex_component[next] == UNASSIGNED {
                        vertex_component[next] = id;
                        queue.push_back(next);
                    }
                }
            }

            component.sort_unstable();
            members.push(component);
        }

        Self {
            vertex_component,
            members,
        }
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertex_component.len()
    }

    #[must_use]
    pub fn component_count(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn component_of(&self, vertex: usize) -> Option<usize> {
        self.vertex_component.get(vertex).copied()
    }

    #[must_use]
    pub fn members(&self, component: usize) -> Option<&[usize]> {
        self.members.get(component).map(Vec::as_slice)
    }

    /// Component id → member vertices, indexed by component id.
    #[must_use]
    pub fn components(&self) -> &[Vec<usize>] {
        &self.members
    }

    /// Vertex → component id, indexed by vertex.
    #[must_use]
    pub fn labels(&self) -> &[usize] {
        &self.vertex_component
    }

    pub fn sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.members.iter().map(Vec::len)
    }

    #[must_use]
    pub fn singleton_count(&self) -> usize {
        self.sizes().filter(|&size| size == 1).count()
    }

    /// The component with the most members. Ties go to the lowest component id.
    /// `None` only when there are no vertices.
    #[must_use]
    pub fn largest(&self) -> Option<(usize, &[usize])> {
        let mut best: Option<(usize, &[usize])> = None;
        for (id, members) in self.members.iter().enumerate() {
            if best.map_or(true, |(_, current)| members.len() > current.len()) {
                best = Some((id, members));
            }
        }
        best
    }

    /// Whether `other` describes the same partition, ignoring how components
    /// are numbered.
    #[must_use]
    pub fn same_partition(&self, other: &Self) -> bool {
        if self.vertex_count() != other.vertex_count()
            || self.component_count() != other.component_count()
        {
            return false;
        }
        // Members are sorted, so the first member is a numbering-free label.
        (0..self.vertex_count()).all(|v| {
            let ours = self.members[self.vertex_component[v]][0];
            let theirs = other.members[other.vertex_component[v]][0];
            ours == theirs
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clustering::graph::EdgePolicy;
    use crate::core::ReadGroup;

    fn build(vertex_count: usize, groups: &[&[usize]], policy: EdgePolicy) -> ComponentAssignment {
        let mut graph = IsoformGraph::new(vertex_count);
        for ids in groups {
            let mut group = ReadGroup::new("read");
            group.reference_ids.extend_from_slice(ids);
            graph.add_group(&group, policy).unwrap();
        }
        ComponentAssignment::from_graph(graph)
    }

    fn assert_is_partition(assignment: &ComponentAssignment) {
        let mut seen = vec![0usize; assignment.vertex_count()];
        for (id, members) in assignment.components().iter().enumerate() {
            assert!(!members.is_empty());
            for &v in members {
                seen[v] += 1;
                assert_eq!(assignment.component_of(v), Some(id));
            }
        }
        assert!(seen.iter().all(|&count| count == 1), "not a partition: {seen:?}");
    }

    /// Reachability by repeated relaxation, independent of the traversal.
    fn brute_force_reachability(vertex_count: usize, groups: &[Vec<usize>]) -> Vec<Vec<bool>> {
        let mut reach = vec![vec![false; vertex_count]; vertex_count];
        for (v, row) in reach.iter_mut().enumerate() {
            row[v] = true;
        }
        for ids in groups {
            for &a in ids {
                for &b in ids {
                    reach[a][b] = true;
                }
            }
        }
        for k in 0..vertex_count {
            for i in 0..vertex_count {
                for j in 0..vertex_count {
                    if reach[i][k] && reach[k][j] {
                        reach[i][j] = true;
                    }
                }
            }
        }
        reach
    }

    /// Small deterministic generator so fixtures are reproducible.
    struct Lcg(u64);

    impl Lcg {
        fn next(&mut self, bound: usize) -> usize {
            self.0 = self
                .0
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            ((self.0 >> 33) % bound as u64) as usize
        }
    }

    #[test]
    fn test_chain_of_reads_joins_transitively() {
        let assignment = build(4, &[&[0, 1], &[1, 2], &[3]], EdgePolicy::Star);

        assert_is_partition(&assignment);
        assert_eq!(assignment.component_count(), 2);
        assert_eq!(assignment.members(0), Some(&[0, 1, 2][..]));
        assert_eq!(assignment.members(1), Some(&[3][..]));
    }

    #[test]
    fn test_singleton_read_adds_no_edge() {
        let assignment = build(2, &[&[0]], EdgePolicy::Star);

        assert_eq!(assignment.labels(), &[0, 1]);
        assert_eq!(assignment.singleton_count(), 2);
    }

    #[test]
    fn test_untouched_references_are_singletons() {
        let assignment = build(6, &[&[4, 1]], EdgePolicy::Clique);

        assert_is_partition(&assignment);
        assert_eq!(assignment.component_count(), 5);
        assert_eq!(assignment.component_of(1), assignment.component_of(4));
        for v in [0, 2, 3, 5] {
            let id = assignment.component_of(v).unwrap();
            assert_eq!(assignment.members(id), Some(&[v][..]));
        }
    }

    #[test]
    fn test_empty_graph() {
        let assignment = ComponentAssignment::from_graph(IsoformGraph::new(0));
        assert_eq!(assignment.component_count(), 0);
        assert!(assignment.largest().is_none());
    }

    #[test]
    fn test_largest_prefers_first_on_tie() {
        let assignment = build(4, &[&[0, 1], &[2, 3]], EdgePolicy::Star);

        let (id, members) = assignment.largest().unwrap();
        assert_eq!(members.len(), 2);
        assert!(members == [0, 1] || members == [2, 3]);
        assert_eq!(assignment.members(id), Some(members));
    }

    #[test]
    fn test_largest_picks_biggest() {
        let assignment = build(5, &[&[3, 4], &[2, 4]], EdgePolicy::Star);
        let (_, members) = assignment.largest().unwrap();
        assert_eq!(members, &[2, 3, 4]);
    }

    #[test]
    fn test_matches_brute_force_closure() {
        let mut rng = Lcg(17);
        for _ in 0..200 {
            let vertex_count = 1 + rng.next(12);
            let group_count = rng.next(8);
            let groups: Vec<Vec<usize>> = (0..group_count)
                .map(|_| (0..1 + rng.next(4)).map(|_| rng.next(vertex_count)).collect())
                .collect();
            let slices: Vec<&[usize]> = groups.iter().map(Vec::as_slice).collect();

            let reach = brute_force_reachability(vertex_count, &groups);
            for policy in [EdgePolicy::Star, EdgePolicy::Clique] {
                let assignment = build(vertex_count, &slices, policy);
                assert_is_partition(&assignment);
                for a in 0..vertex_count {
                    for b in 0..vertex_count {
                        let together = assignment.component_of(a) == assignment.component_of(b);
                        assert_eq!(together, reach[a][b], "vertices {a} and {b} in {groups:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_star_and_clique_agree() {
        let mut rng = Lcg(99);
        for _ in 0..100 {
            let vertex_count = 1 + rng.next(20);
            let groups: Vec<Vec<usize>> = (0..rng.next(10))
                .map(|_| (0..1 + rng.next(6)).map(|_| rng.next(vertex_count)).collect())
                .collect();
            let slices: Vec<&[usize]> = groups.iter().map(Vec::as_slice).collect();

            let star = build(vertex_count, &slices, EdgePolicy::Star);
            let clique = build(vertex_count, &slices, EdgePolicy::Clique);
            assert!(star.same_partition(&clique));
        }
    }

    #[test]
    fn test_same_partition_ignores_numbering() {
        let a = ComponentAssignment {
            vertex_component: vec![0, 1, 0],
            members: vec![vec![0, 2], vec![1]],
        };
        let b = ComponentAssignment {
            vertex_component: vec![1, 0, 1],
            members: vec![vec![1], vec![0, 2]],
        };
        let c = ComponentAssignment {
            vertex_component: vec![0, 0, 1],
            members: vec![vec![0, 1], vec![2]],
        };
        assert!(a.same_partition(&b));
        assert!(!a.same_partition(&c));
    }
}
