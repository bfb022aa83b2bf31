//! Second pass: copy each record into the file of its reference's component.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use noodles::sam::alignment::io::Write as AlignmentWrite;
use noodles::{bam, sam};
use serde::Serialize;
use tracing::{debug, info};

use crate::core::ClusterError;
use crate::parsing::alignment::{AlignmentFile, AlignmentFormat, SourceOptions};
use crate::utils::validation::{component_path, validate_output_prefix};

/// Which components get a file and where.
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// Output paths are `<prefix>.component_<id>.<ext>`.
    pub prefix: PathBuf,
    /// Components with fewer members are not written.
    pub min_size: usize,
}

/// Outcome of a split pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SplitStats {
    pub records_read: u64,
    pub records_written: u64,
    /// Files created, in component-id order
    pub outputs: Vec<PathBuf>,
}

struct OpenOutput {
    path: PathBuf,
    writer: Box<dyn AlignmentWrite>,
}

fn output_error(path: &Path) -> impl FnOnce(std::io::Error) -> ClusterError + '_ {
    move |source| ClusterError::Output {
        path: path.to_path_buf(),
        source,
    }
}

fn create_output(
    path: PathBuf,
    format: AlignmentFormat,
    header: &sam::Header,
) -> Result<OpenOutput, ClusterError> {
    let file = File::create(&path).map_err(output_error(&path))?;
    let mut writer: Box<dyn AlignmentWrite> = match format {
        AlignmentFormat::Sam => Box::new(sam::io::Writer::new(BufWriter::new(file))),
        AlignmentFormat::Bam => Box::new(bam::io::Writer::new(file)),
    };
    writer
        .write_alignment_header(header)
        .map_err(output_error(&path))?;
    debug!(path = %path.display(), "Created component output");
    Ok(OpenOutput { path, writer })
}

/// Re-read `input` and write every record whose reference belongs to a
/// component with at least `min_size` members into that component's file.
///
/// `components` maps component id to member reference ids. Files use the
/// input's format and header, and are created on the first record routed to
/// them, so components that no record touches produce no file. Records with no
/// reference are not written.
///
/// # Errors
///
/// Returns `ClusterError::Open`, `ClusterError::Header` or
/// `ClusterError::CorruptRecord` for input failures and `ClusterError::Output`
/// when a file cannot be created or written.
pub fn split_alignments(
    input: &Path,
    components: &[Vec<usize>],
    options: &SplitOptions,
) -> Result<SplitStats, ClusterError> {
    validate_output_prefix(&options.prefix)?;

    let mut source = AlignmentFile::open(input, SourceOptions::default())?;
    let format = source.format();
    let header = source.header().clone();

    let vertex_count = header.reference_sequences().len();
    let mut route: Vec<Option<usize>> = vec![None; vertex_count];
    for (id, members) in components.iter().enumerate() {
        if members.len() < options.min_size {
            continue;
        }
        for &vertex in members {
            if let Some(slot) = route.get_mut(vertex) {
                *slot = Some(id);
            }
        }
    }

    let mut outputs: BTreeMap<usize, OpenOutput> = BTreeMap::new();
    let mut stats = SplitStats::default();

    while let Some(record) = source.next_record_buf()? {
        let Some(component) = record
            .reference_sequence_id()
            .and_then(|id| route.get(id).copied().flatten())
        else {
            continue;
        };

        if !outputs.contains_key(&component) {
            let path = component_path(&options.prefix, component, format.extension());
            outputs.insert(component, create_output(path, format, &header)?);
        }
        if let Some(output) = outputs.get_mut(&component) {
            output
                .writer
                .write_alignment_record(&header, record)
                .map_err(output_error(&output.path))?;
            stats.records_written += 1;
        }
    }
    stats.records_read = source.records_read();

    for (_, mut output) in outputs {
        output
            .writer
            .finish(&header)
            .map_err(output_error(&output.path))?;
        stats.outputs.push(output.path);
    }

    info!(
        records_read = stats.records_read,
        records_written = stats.records_written,
        outputs = stats.outputs.len(),
        "Split alignments by component"
    );

    Ok(stats)
}
