use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Args;

use crate::cli::{ClusterArgs, OutputFormat};
use crate::core::ClusterError;
use crate::report;
use crate::utils::validation::validate_output_path;

#[derive(Args)]
pub struct TableArgs {
    #[command(flatten)]
    pub cluster: ClusterArgs,

    /// Output TSV path (stdout when omitted)
    pub output: Option<PathBuf>,
}

/// Execute table subcommand. The table is always tab-separated.
///
/// The output file is only created once clustering has succeeded, so a failed
/// run leaves nothing behind.
///
/// # Errors
///
/// Returns an error if `--format json` was requested, the input cannot be
/// read, or the output cannot be created or written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: TableArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    if let OutputFormat::Json = format {
        anyhow::bail!("The table command only writes TSV; --format json is not supported");
    }
    if let Some(path) = &args.output {
        validate_output_path(path)?;
    }

    let clustering = args.cluster.cluster(verbose)?;

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|source| ClusterError::Output {
                path: path.clone(),
                source,
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    let written = report::write_table(&mut out, &clustering.assignment, &clustering.references)
        .and_then(|()| out.flush());
    if let Err(source) = written {
        let path = args.output.clone().unwrap_or_else(|| PathBuf::from("-"));
        return Err(ClusterError::Output { path, source }.into());
    }

    if verbose {
        if let Some(path) = &args.output {
            eprintln!("Wrote {} rows to {}", clustering.assignment.vertex_count(), path.display());
        }
    }

    Ok(())
}
