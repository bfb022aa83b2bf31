//! Rendering a component partition.
//!
//! Four mutually exclusive outputs:
//!
//! - **Summary** ([`write_summary`]): one line per component holding its member
//!   count, in component-id order
//! - **Extremes** ([`write_extremes`]): the summary followed by the largest
//!   component
//! - **Table** ([`write_table`]): `seqid\tseqname\tcomponent`, one row per
//!   reference sequence
//! - **Split** ([`split::split_alignments`]): one alignment file per component
//!
//! Summary and extremes also have JSON renderings for `--format json`.

pub mod split;

use std::io::{self, Write};

use serde::Serialize;

use crate::clustering::{Clustering, ClusteringStats, ComponentAssignment};
use crate::core::ReferenceTable;

/// Header line of the per-reference table.
pub const TABLE_HEADER: &str = "seqid\tseqname\tcomponent";

/// Write one member count per line, in component-id order.
///
/// # Errors
///
/// Returns any error from `out`.
pub fn write_summary<W: Write>(out: &mut W, assignment: &ComponentAssignment) -> io::Result<()> {
    for size in assignment.sizes() {
        writeln!(out, "{size}")?;
    }
    Ok(())
}

/// Write the summary and then the largest component. Ties go to the lowest id.
///
/// # Errors
///
/// Returns any error from `out`.
pub fn write_extremes<W: Write>(
    out: &mut W,
    assignment: &ComponentAssignment,
    references: &ReferenceTable,
) -> io::Result<()> {
    write_summary(out, assignment)?;
    writeln!(out, "components\t{}", assignment.component_count())?;
    if let Some((id, members)) = assignment.largest() {
        writeln!(out, "largest\t{id}\t{}", members.len())?;
        let names: Vec<&str> = members
            .iter()
            .map(|&v| references.name(v).unwrap_or("*"))
            .collect();
        writeln!(out, "members\t{}", names.join(","))?;
    }
    Ok(())
}

/// Write the `seqid\tseqname\tcomponent` table, one row per vertex.
///
/// # Errors
///
/// Returns any error from `out`.
pub fn write_table<W: Write>(
    out: &mut W,
    assignment: &ComponentAssignment,
    references: &ReferenceTable,
) -> io::Result<()> {
    writeln!(out, "{TABLE_HEADER}")?;
    for (vertex, &component) in assignment.labels().iter().enumerate() {
        let name = references.name(vertex).unwrap_or("*");
        writeln!(out, "{vertex}\t{name}\t{component}")?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct ComponentSize {
    component: usize,
    size: usize,
}

#[derive(Debug, Serialize)]
struct LargestComponent<'a> {
    component: usize,
    size: usize,
    members: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
struct SummaryReport<'a> {
    references: usize,
    component_count: usize,
    singletons: usize,
    components: Vec<ComponentSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    largest: Option<LargestComponent<'a>>,
    stats: &'a ClusteringStats,
}

impl<'a> SummaryReport<'a> {
    fn new(clustering: &'a Clustering, with_largest: bool) -> Self {
        let assignment = &clustering.assignment;
        let largest = if with_largest {
            assignment
                .largest()
                .map(|(component, members)| LargestComponent {
                    component,
                    size: members.len(),
                    members: members
                        .iter()
                        .map(|&v| clustering.references.name(v).unwrap_or("*"))
                        .collect(),
                })
        } else {
            None
        };

        Self {
            references: assignment.vertex_count(),
            component_count: assignment.component_count(),
            singletons: assignment.singleton_count(),
            components: assignment
                .sizes()
                .enumerate()
                .map(|(component, size)| ComponentSize { component, size })
                .collect(),
            largest,
            stats: &clustering.stats,
        }
    }
}

/// JSON rendering of the summary.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn summary_json(clustering: &Clustering) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&SummaryReport::new(clustering, false))
}

/// JSON rendering of the summary plus the largest component.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn extremes_json(clustering: &Clustering) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&SummaryReport::new(clustering, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clustering::{ClusteringConfig, ClusteringEngine};
    use crate::core::MemorySource;

    fn cluster(names: &[&str], pairs: &[(&str, usize)]) -> Clustering {
        let references: ReferenceTable = names.iter().copied().collect();
        let mut source = MemorySource::from_pairs(references, pairs.iter().copied());
        ClusteringEngine::new(ClusteringConfig::default())
            .cluster(&mut source)
            .unwrap()
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_summary_in_component_order() {
        let clustering = cluster(
            &["A", "B", "C", "D"],
            &[("r1", 0), ("r1", 1), ("r2", 1), ("r2", 2), ("r3", 3)],
        );
        let text = render(|out| write_summary(out, &clustering.assignment));
        assert_eq!(text, "3\n1\n");
    }

    #[test]
    fn test_summary_is_not_size_sorted() {
        let clustering = cluster(&["A", "B", "C"], &[("r1", 1), ("r1", 2)]);
        let text = render(|out| write_summary(out, &clustering.assignment));
        assert_eq!(text, "1\n2\n");
    }

    #[test]
    fn test_table_for_singleton_read() {
        let clustering = cluster(&["A", "B"], &[("r1", 0)]);
        let text = render(|out| write_table(out, &clustering.assignment, &clustering.references));
        assert_eq!(text, "seqid\tseqname\tcomponent\n0\tA\t0\n1\tB\t1\n");
    }

    #[test]
    fn test_extremes_names_largest() {
        let clustering = cluster(
            &["A", "B", "C", "D"],
            &[("r1", 0), ("r1", 1), ("r2", 1), ("r2", 2), ("r3", 3)],
        );
        let text = render(|out| {
            write_extremes(out, &clustering.assignment, &clustering.references)
        });
        assert_eq!(text, "3\n1\ncomponents\t2\nlargest\t0\t3\nmembers\tA,B,C\n");
    }

    #[test]
    fn test_extremes_tie_reports_a_maximal_component() {
        let clustering = cluster(
            &["A", "B", "C", "D"],
            &[("r1", 0), ("r1", 1), ("r2", 2), ("r2", 3)],
        );
        let text = render(|out| {
            write_extremes(out, &clustering.assignment, &clustering.references)
        });
        let members = text
            .lines()
            .find_map(|l| l.strip_prefix("members\t"))
            .unwrap();
        assert!(members == "A,B" || members == "C,D", "unexpected {members}");
    }

    #[test]
    fn test_json_reports() {
        let clustering = cluster(&["A", "B", "C"], &[("r1", 0), ("r1", 2)]);

        let summary: serde_json::Value =
            serde_json::from_str(&summary_json(&clustering).unwrap()).unwrap();
        assert_eq!(summary["references"], 3);
        assert_eq!(summary["component_count"], 2);
        assert_eq!(summary["singletons"], 1);
        assert_eq!(summary["components"][0]["size"], 2);
        assert_eq!(summary["stats"]["edges"], 1);
        assert!(summary.get("largest").is_none());

        let extremes: serde_json::Value =
            serde_json::from_str(&extremes_json(&clustering).unwrap()).unwrap();
        assert_eq!(extremes["largest"]["size"], 2);
        assert_eq!(extremes["largest"]["members"], serde_json::json!(["A", "C"]));
    }
}
