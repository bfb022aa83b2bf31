use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use noodles::sam::alignment::record_buf::RecordBuf;
use noodles::sam::header::record::value::map::header::tag as header_tag;
use noodles::{bam, sam};
use tracing::{debug, warn};

use crate::clustering::Grouping;
use crate::core::{AlignmentRecord, ClusterError, RecordSource, ReferenceTable};

/// Container format of an alignment file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlignmentFormat {
    Sam,
    Bam,
}

impl AlignmentFormat {
    /// Detect the format from the file extension; SAM when there is none.
    ///
    /// # Errors
    ///
    /// Returns `ClusterError::UnsupportedFormat` for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, ClusterError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("sam") | None => Ok(Self::Sam),
            Some("bam") => Ok(Self::Bam),
            Some(ext) => Err(ClusterError::UnsupportedFormat(ext.to_string())),
        }
    }

    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Sam => "sam",
            Self::Bam => "bam",
        }
    }
}

/// Record filters applied before records reach grouping.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceOptions {
    /// Records with a lower mapping quality are skipped. Zero keeps everything.
    pub min_mapping_quality: u8,
}

/// Record ordering declared by the `@HD` line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclaredOrder {
    pub sort_order: Option<String>,
    pub group_order: Option<String>,
}

impl DeclaredOrder {
    /// Read `SO` and `GO` from the header's `@HD` record, if it has one.
    #[must_use]
    pub fn from_header(header: &sam::Header) -> Self {
        let Some(hd) = header.header() else {
            return Self::default();
        };

        let fields = hd.other_fields();
        Self {
            sort_order: fields.get(&header_tag::SORT_ORDER).map(ToString::to_string),
            group_order: fields.get(&header_tag::GROUP_ORDER).map(ToString::to_string),
        }
    }

    /// Whether all records of a read are declared to be adjacent.
    #[must_use]
    pub fn is_query_grouped(&self) -> bool {
        self.sort_order.as_deref() == Some("queryname")
            || self.group_order.as_deref() == Some("query")
    }
}

/// Object-safe view over the noodles SAM and BAM readers.
trait RecordRead {
    fn read_next(&mut self, header: &sam::Header, record: &mut RecordBuf) -> io::Result<usize>;
}

impl<R: BufRead> RecordRead for sam::io::Reader<R> {
    fn read_next(&mut self, header: &sam::Header, record: &mut RecordBuf) -> io::Result<usize> {
        self.read_record_buf(header, record)
    }
}

impl<R: Read> RecordRead for bam::io::Reader<R> {
    fn read_next(&mut self, header: &sam::Header, record: &mut RecordBuf) -> io::Result<usize> {
        self.read_record_buf(header, record)
    }
}

/// A SAM or BAM file read sequentially as a [`RecordSource`].
///
/// Opening reads the header; records are decoded one at a time into a single
/// reusable buffer, so memory does not grow with file size.
pub struct AlignmentFile {
    path: PathBuf,
    format: AlignmentFormat,
    header: sam::Header,
    references: ReferenceTable,
    reader: Box<dyn RecordRead>,
    record: RecordBuf,
    options: SourceOptions,
    records_read: u64,
    records_skipped: u64,
}

impl AlignmentFile {
    /// Open `path` and read its header.
    ///
    /// # Errors
    ///
    /// Returns `ClusterError::UnsupportedFormat` for unknown extensions,
    /// `ClusterError::Open` if the file cannot be opened, or
    /// `ClusterError::Header` if the header cannot be decoded.
    pub fn open(path: &Path, options: SourceOptions) -> Result<Self, ClusterError> {
        let format = AlignmentFormat::from_path(path)?;
        let file = File::open(path).map_err(|source| ClusterError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let header_error = |source: io::Error| ClusterError::Header {
            path: path.to_path_buf(),
            source,
        };

        let (header, reader): (sam::Header, Box<dyn RecordRead>) = match format {
            AlignmentFormat::Sam => {
                let mut reader = sam::io::Reader::new(BufReader::new(file));
                let header = reader.read_header().map_err(header_error)?;
                let reader: Box<dyn RecordRead> = Box::new(reader);
                (header, reader)
            }
            AlignmentFormat::Bam => {
                let mut reader = bam::io::Reader::new(file);
                let header = reader.read_header().map_err(header_error)?;
                let reader: Box<dyn RecordRead> = Box::new(reader);
                (header, reader)
            }
        };

        let references = header
            .reference_sequences()
            .keys()
            .map(ToString::to_string)
            .collect::<ReferenceTable>();

        debug!(
            path = %path.display(),
            format = format.extension(),
            references = references.len(),
            "Opened alignment file"
        );

        Ok(Self {
            path: path.to_path_buf(),
            format,
            header,
            references,
            reader,
            record: RecordBuf::default(),
            options,
            records_read: 0,
            records_skipped: 0,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn format(&self) -> AlignmentFormat {
        self.format
    }

    #[must_use]
    pub fn header(&self) -> &sam::Header {
        &self.header
    }

    /// Records decoded so far, observations or not.
    #[must_use]
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    /// The `@HD` ordering of this file.
    #[must_use]
    pub fn declared_order(&self) -> DeclaredOrder {
        DeclaredOrder::from_header(&self.header)
    }

    /// Warn when streaming grouping is requested for input whose header does
    /// not promise that a read's records are adjacent. Records are not checked.
    pub fn warn_if_not_grouped(&self, grouping: Grouping) {
        if grouping != Grouping::Adjacent {
            return;
        }
        let order = self.declared_order();
        if !order.is_query_grouped() {
            warn!(
                path = %self.path.display(),
                sort_order = order.sort_order.as_deref().unwrap_or("none"),
                group_order = order.group_order.as_deref().unwrap_or("none"),
                "Header does not declare queryname sorting or query grouping; \
                 adjacent grouping assumes each read's records are contiguous"
            );
        }
    }

    /// Decode the next record into the internal buffer. `Ok(None)` on clean
    /// end of stream.
    ///
    /// # Errors
    ///
    /// Returns `ClusterError::CorruptRecord` when decoding fails.
    pub fn next_record_buf(&mut self) -> Result<Option<&RecordBuf>, ClusterError> {
        match self.reader.read_next(&self.header, &mut self.record) {
            Ok(0) => Ok(None),
            Ok(_) => {
                self.records_read += 1;
                Ok(Some(&self.record))
            }
            Err(source) => Err(ClusterError::CorruptRecord {
                record_number: self.records_read + 1,
                source,
            }),
        }
    }

    fn observation(&self) -> Result<Option<AlignmentRecord>, ClusterError> {
        let record = &self.record;
        if record.flags().is_unmapped() {
            return Ok(None);
        }
        let Some(reference_id) = record.reference_sequence_id() else {
            return Ok(None);
        };
        let Some(name) = record.name() else {
            return Ok(None);
        };

        if self.options.min_mapping_quality > 0 {
            let mapq = record.mapping_quality().map(u8::from);
            if mapq.map_or(true, |q| q < self.options.min_mapping_quality) {
                return Ok(None);
            }
        }

        if reference_id >= self.references.len() {
            return Err(ClusterError::ReferenceOutOfRange {
                reference_id,
                reference_count: self.references.len(),
            });
        }

        Ok(Some(AlignmentRecord::new(
            String::from_utf8_lossy(name),
            reference_id,
        )))
    }
}

impl RecordSource for AlignmentFile {
    fn references(&self) -> &ReferenceTable {
        &self.references
    }

    fn next_record(&mut self) -> Result<Option<AlignmentRecord>, ClusterError> {
        while self.next_record_buf()?.is_some() {
            match self.observation()? {
                Some(record) => return Ok(Some(record)),
                None => self.records_skipped += 1,
            }
        }
        Ok(None)
    }

    fn records_skipped(&self) -> u64 {
        self.records_skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "@HD\tVN:1.6\tSO:queryname\n@SQ\tSN:tx1\tLN:100\n@SQ\tSN:tx2\tLN:100\n@SQ\tSN:tx3\tLN:100\n";

    fn sam_line(name: &str, flag: u16, reference: &str, mapq: u8) -> String {
        let pos = if reference == "*" { 0 } else { 1 };
        let cigar = if reference == "*" { "*" } else { "4M" };
        format!("{name}\t{flag}\t{reference}\t{pos}\t{mapq}\t{cigar}\t*\t0\t0\tACGT\tIIII\n")
    }

    fn write_sam(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("input.sam");
        let mut file = File::create(&path).unwrap();
        file.write_all(HEADER.as_bytes()).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    fn drain(source: &mut AlignmentFile) -> Vec<AlignmentRecord> {
        let mut records = Vec::new();
        while let Some(record) = source.next_record().unwrap() {
            records.push(record);
        }
        records
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            AlignmentFormat::from_path(Path::new("a.BAM")).unwrap(),
            AlignmentFormat::Bam
        );
        assert_eq!(
            AlignmentFormat::from_path(Path::new("a.sam")).unwrap(),
            AlignmentFormat::Sam
        );
        assert_eq!(
            AlignmentFormat::from_path(Path::new("reads")).unwrap(),
            AlignmentFormat::Sam
        );
        assert!(matches!(
            AlignmentFormat::from_path(Path::new("a.cram")),
            Err(ClusterError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_declared_order_from_header() {
        let header: sam::Header = "@HD\tVN:1.6\tSO:unsorted\tGO:query\n".parse().unwrap();
        let order = DeclaredOrder::from_header(&header);
        assert_eq!(order.sort_order.as_deref(), Some("unsorted"));
        assert_eq!(order.group_order.as_deref(), Some("query"));
        assert!(order.is_query_grouped());

        let header: sam::Header = "@HD\tVN:1.6\tSO:coordinate\n".parse().unwrap();
        assert!(!DeclaredOrder::from_header(&header).is_query_grouped());

        let header: sam::Header = "@SQ\tSN:chr1\tLN:10\n".parse().unwrap();
        assert_eq!(DeclaredOrder::from_header(&header), DeclaredOrder::default());
    }

    #[test]
    fn test_reads_references_and_observations() {
        let dir = tempfile::tempdir().unwrap();
        let body = [
            sam_line("r1", 0, "tx1", 60),
            sam_line("r1", 256, "tx3", 0),
            sam_line("r2", 4, "*", 0),
            sam_line("r3", 0, "tx2", 60),
        ]
        .concat();
        let path = write_sam(&dir, &body);

        let mut source = AlignmentFile::open(&path, SourceOptions::default()).unwrap();
        assert_eq!(source.references().len(), 3);
        assert_eq!(source.references().name(2), Some("tx3"));
        assert!(source.declared_order().is_query_grouped());

        let records = drain(&mut source);
        assert_eq!(
            records,
            vec![
                AlignmentRecord::new("r1", 0),
                AlignmentRecord::new("r1", 2),
                AlignmentRecord::new("r3", 1),
            ]
        );
        assert_eq!(source.records_read(), 4);
        assert_eq!(source.records_skipped(), 1);
    }

    #[test]
    fn test_min_mapping_quality_filters() {
        let dir = tempfile::tempdir().unwrap();
        let body = [sam_line("r1", 0, "tx1", 60), sam_line("r1", 256, "tx2", 3)].concat();
        let path = write_sam(&dir, &body);

        let options = SourceOptions {
            min_mapping_quality: 10,
        };
        let mut source = AlignmentFile::open(&path, options).unwrap();
        assert_eq!(drain(&mut source), vec![AlignmentRecord::new("r1", 0)]);
        assert_eq!(source.records_skipped(), 1);
    }

    #[test]
    fn test_missing_file_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = AlignmentFile::open(&dir.path().join("absent.bam"), SourceOptions::default());
        assert!(matches!(result, Err(ClusterError::Open { .. })));
    }

    #[test]
    fn test_malformed_sam_header_is_header_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.sam");
        std::fs::write(&path, "@HD\tVN:1.6\n@SQ\tSN:A\n").unwrap();

        let result = AlignmentFile::open(&path, SourceOptions::default());
        assert!(matches!(result, Err(ClusterError::Header { .. })));
    }

    #[test]
    fn test_non_bgzf_bam_is_header_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.bam");
        std::fs::write(&path, "this is not a bam file\n").unwrap();

        let result = AlignmentFile::open(&path, SourceOptions::default());
        assert!(matches!(result, Err(ClusterError::Header { .. })));
    }

    #[test]
    fn test_corrupt_record_is_not_end_of_stream() {
        let dir = tempfile::tempdir().unwrap();
        let body = [sam_line("r1", 0, "tx1", 60), "r2\tnot-a-flag\n".to_string()].concat();
        let path = write_sam(&dir, &body);

        let mut source = AlignmentFile::open(&path, SourceOptions::default()).unwrap();
        assert!(source.next_record().unwrap().is_some());
        match source.next_record() {
            Err(ClusterError::CorruptRecord { record_number, .. }) => assert_eq!(record_number, 2),
            other => panic!("expected corrupt record error, got {other:?}"),
        }
    }
}
