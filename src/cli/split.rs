use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;

use crate::cli::{ClusterArgs, OutputFormat};
use crate::report::split::{split_alignments, SplitOptions};
use crate::utils::validation::validate_output_prefix;

#[derive(Args)]
pub struct SplitArgs {
    #[command(flatten)]
    pub cluster: ClusterArgs,

    /// Output path prefix; files are named <PREFIX>.component_<ID>.<bam|sam>
    #[arg(short, long, required = true)]
    pub prefix: PathBuf,

    /// Only write components with at least this many isoforms
    #[arg(long, default_value = "1")]
    pub min_size: usize,
}

/// Execute split subcommand
///
/// Clusters in a first pass, then re-reads the input to route records. The
/// graph is gone before the second pass starts; only the component lists are
/// carried over.
///
/// # Errors
///
/// Returns an error if the input cannot be read or any output cannot be
/// created or written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SplitArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    validate_output_prefix(&args.prefix)?;

    let components = args.cluster.cluster(verbose)?.assignment;

    let options = SplitOptions {
        prefix: args.prefix.clone(),
        min_size: args.min_size,
    };
    let stats = split_alignments(&args.cluster.input, components.components(), &options)?;

    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Text => {
            for path in &stats.outputs {
                writeln!(out, "{}", path.display())?;
            }
            if verbose {
                eprintln!(
                    "Wrote {} of {} records to {} files",
                    stats.records_written,
                    stats.records_read,
                    stats.outputs.len()
                );
            }
        }
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?,
    }
    out.flush()?;

    Ok(())
}
