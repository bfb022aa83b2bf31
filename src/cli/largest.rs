use std::io::{self, Write};

use clap::Args;

use crate::cli::{ClusterArgs, OutputFormat};
use crate::report;

#[derive(Args)]
pub struct LargestArgs {
    #[command(flatten)]
    pub cluster: ClusterArgs,
}

/// Execute largest subcommand
///
/// # Errors
///
/// Returns an error if the input cannot be read or output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: LargestArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let clustering = args.cluster.cluster(verbose)?;

    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Text => {
            report::write_extremes(&mut out, &clustering.assignment, &clustering.references)?;
        }
        OutputFormat::Json => writeln!(out, "{}", report::extremes_json(&clustering)?)?,
    }
    out.flush()?;

    Ok(())
}
