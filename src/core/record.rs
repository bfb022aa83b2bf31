use std::collections::VecDeque;

use crate::core::error::ClusterError;
use crate::core::reference::ReferenceTable;

/// A single alignment observation: `read_name` aligned to `reference_id`.
///
/// All other alignment fields are irrelevant to clustering and are dropped by
/// the record source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentRecord {
    pub read_name: String,
    pub reference_id: usize,
}

impl AlignmentRecord {
    pub fn new(read_name: impl Into<String>, reference_id: usize) -> Self {
        Self {
            read_name: read_name.into(),
            reference_id,
        }
    }
}

/// Every reference id observed for one read, in first-occurrence order.
///
/// Repeats are kept; edge insertion ignores self-pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadGroup {
    pub read_name: String,
    pub reference_ids: Vec<usize>,
}

impl ReadGroup {
    pub fn new(read_name: impl Into<String>) -> Self {
        Self {
            read_name: read_name.into(),
            reference_ids: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.reference_ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reference_ids.is_empty()
    }

    /// True when the read touches more than one distinct reference and so
    /// contributes at least one edge.
    #[must_use]
    pub fn spans_multiple_references(&self) -> bool {
        match self.reference_ids.split_first() {
            Some((first, rest)) => rest.iter().any(|id| id != first),
            None => false,
        }
    }
}

/// A lazy stream of alignment records plus the reference table they index into.
pub trait RecordSource {
    /// The reference table declared by the source's header.
    fn references(&self) -> &ReferenceTable;

    /// Next observation, `Ok(None)` on clean end of stream.
    ///
    /// # Errors
    ///
    /// Returns `ClusterError::CorruptRecord` when the underlying stream fails.
    fn next_record(&mut self) -> Result<Option<AlignmentRecord>, ClusterError>;

    /// Records read from the stream that were not observations (unmapped,
    /// unnamed, or filtered). Zero for sources that never skip.
    fn records_skipped(&self) -> u64 {
        0
    }
}

/// A record source backed by an in-memory list, used for library callers that
/// already hold their observations and throughout the tests.
#[derive(Debug, Clone)]
pub struct MemorySource {
    references: ReferenceTable,
    records: VecDeque<AlignmentRecord>,
}

impl MemorySource {
    #[must_use]
    pub fn new(references: ReferenceTable, records: Vec<AlignmentRecord>) -> Self {
        Self {
            references,
            records: records.into(),
        }
    }

    /// Build from `(read_name, reference_id)` pairs.
    pub fn from_pairs<'a>(
        references: ReferenceTable,
        pairs: impl IntoIterator<Item = (&'a str, usize)>,
    ) -> Self {
        let records = pairs
            .into_iter()
            .map(|(name, id)| AlignmentRecord::new(name, id))
            .collect();
        Self::new(references, records)
    }
}

impl RecordSource for MemorySource {
    fn references(&self) -> &ReferenceTable {
        &self.references
    }

    fn next_record(&mut self) -> Result<Option<AlignmentRecord>, ClusterError> {
        Ok(self.records.pop_front())
    }
}
