//! Centralized validation and helper functions.

use std::path::{Path, PathBuf};

use crate::core::ClusterError;

/// Build the output path for one component: `<prefix>.component_<id>.<ext>`.
///
/// # Examples
///
/// ```
/// use isoform_cc::utils::validation::component_path;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(
///     component_path(Path::new("out/sample"), 7, "bam"),
///     PathBuf::from("out/sample.component_7.bam")
/// );
/// ```
#[must_use]
pub fn component_path(prefix: &Path, component: usize, extension: &str) -> PathBuf {
    let mut name = prefix.as_os_str().to_owned();
    name.push(format!(".component_{component}.{extension}"));
    PathBuf::from(name)
}

/// Check that files can be created under `prefix` before any work is done.
///
/// # Errors
///
/// Returns `ClusterError::Output` if the prefix is empty, ends in a path
/// separator, or names a directory that does not exist.
pub fn validate_output_prefix(prefix: &Path) -> Result<(), ClusterError> {
    validate_output_path(prefix)
}

/// Check that `path` names a file whose directory exists, without creating it.
///
/// # Errors
///
/// Returns `ClusterError::Output` if the path is empty, ends in a path
/// separator, is an existing directory, or its directory does not exist.
pub fn validate_output_path(path: &Path) -> Result<(), ClusterError> {
    let invalid = |message: &str| ClusterError::Output {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, message.to_string()),
    };

    if path.as_os_str().is_empty() || path.file_name().is_none() {
        return Err(invalid("output path must name a file"));
    }

    let path_str = path.to_string_lossy();
    if path_str.ends_with('/') || path_str.ends_with(std::path::MAIN_SEPARATOR) || path.is_dir() {
        return Err(invalid("output path must name a file"));
    }

    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => Err(
            ClusterError::Output {
                path: parent.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "output directory does not exist",
                ),
            },
        ),
        _ => Ok(()),
    }
}
