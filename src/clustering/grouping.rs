use std::collections::HashMap;

use serde::Serialize;

use crate::core::{ClusterError, ReadGroup, RecordSource};

/// Which grouping strategy to run. Never inferred from the input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Grouping {
    /// Stream records, closing a group whenever the read name changes.
    /// Records of one read must be contiguous; this is not checked.
    #[default]
    Adjacent,
    /// Buffer every record keyed by read name. Any input order is accepted.
    Materialize,
}

impl Grouping {
    #[must_use]
    pub fn grouper(self) -> Box<dyn ReadGrouper> {
        match self {
            Self::Adjacent => Box::new(AdjacentRunGrouper),
            Self::Materialize => Box::new(MaterializingGrouper),
        }
    }
}

/// Counters collected while grouping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GroupingStats {
    /// Observations consumed from the source
    pub records: u64,
    /// Read groups emitted
    pub read_groups: u64,
    /// Read groups touching two or more distinct references
    pub multi_reference_groups: u64,
}

impl GroupingStats {
    fn observe(&mut self, group: &ReadGroup) {
        self.read_groups += 1;
        if group.spans_multiple_references() {
            self.multi_reference_groups += 1;
        }
    }
}

/// Consumes a record source and emits one complete [`ReadGroup`] per read.
pub trait ReadGrouper {
    /// Drain `source`, handing every finished group to `emit`.
    ///
    /// # Errors
    ///
    /// Propagates errors from the source and from `emit`; grouping stops at the
    /// first one.
    fn group(
        &mut self,
        source: &mut dyn RecordSource,
        emit: &mut dyn FnMut(ReadGroup) -> Result<(), ClusterError>,
    ) -> Result<GroupingStats, ClusterError>;
}

/// Streaming grouper holding only the read currently being collected.
///
/// Correct only when all records of a read are adjacent in the stream. A read
/// split across non-adjacent runs is emitted as several groups, which can
/// leave isoforms that share that read in different components.
#[derive(Debug, Default)]
pub struct AdjacentRunGrouper;

impl ReadGrouper for AdjacentRunGrouper {
    fn group(
        &mut self,
        source: &mut dyn RecordSource,
        emit: &mut dyn FnMut(ReadGroup) -> Result<(), ClusterError>,
    ) -> Result<GroupingStats, ClusterError> {
        let mut stats = GroupingStats::default();
        let mut current: Option<ReadGroup> = None;

        while let Some(record) = source.next_record()? {
            stats.records += 1;

            if let Some(group) = current
                .as_mut()
                .filter(|g| g.read_name == record.read_name)
            {
                group.reference_ids.push(record.reference_id);
                continue;
            }

            let mut next = ReadGroup::new(record.read_name);
            next.reference_ids.push(record.reference_id);
            if let Some(done) = current.replace(next) {
                stats.observe(&done);
                emit(done)?;
            }
        }

        if let Some(done) = current.take() {
            stats.observe(&done);
            emit(done)?;
        }

        Ok(stats)
    }
}

/// Buffers every observation before emitting anything.
///
/// Groups are emitted in order of each read's first appearance.
#[derive(Debug, Default)]
pub struct MaterializingGrouper;

impl ReadGrouper for MaterializingGrouper {
    fn group(
        &mut self,
        source: &mut dyn RecordSource,
        emit: &mut dyn FnMut(ReadGroup) -> Result<(), ClusterError>,
    ) -> Result<GroupingStats, ClusterError> {
        let mut stats = GroupingStats::default();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<ReadGroup> = Vec::new();

        while let Some(record) = source.next_record()? {
            stats.records += 1;
            if let Some(&slot) = index.get(&record.read_name) {
                groups[slot].reference_ids.push(record.reference_id);
            } else {
                index.insert(record.read_name.clone(), groups.len());
                let mut group = ReadGroup::new(record.read_name);
                group.reference_ids.push(record.reference_id);
                groups.push(group);
            }
        }
        drop(index);

        for group in groups {
            stats.observe(&group);
            emit(group)?;
        }

        Ok(stats)
    }
}
