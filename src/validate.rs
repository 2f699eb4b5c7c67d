//! Path and format validation for file-backed resources

use std::path::{Path, PathBuf};

use crate::error::ResourceError;
use crate::source::AssetSource;

/// Check that `path` exists and carries one of the allowed extensions
///
/// Existence is checked first. Extensions are compared case-sensitively,
/// including the leading dot (`.png`).
pub fn validate_file(
    source: &dyn AssetSource,
    path: &Path,
    resource_type: &str,
    resource_name: &str,
    allowed_extensions: &[&str],
) -> Result<(), ResourceError> {
    if !source.exists(path) {
        return Err(ResourceError::NotFound {
            resource_type: resource_type.to_string(),
            name: resource_name.to_string(),
            path: path.to_path_buf(),
        });
    }

    let extension = extension_of(path);
    if !allowed_extensions.iter().any(|allowed| *allowed == extension) {
        return Err(ResourceError::InvalidFormat {
            resource_type: resource_type.to_string(),
            name: resource_name.to_string(),
            path: path.to_path_buf(),
            allowed: allowed_extensions.iter().map(|s| s.to_string()).collect(),
        });
    }

    Ok(())
}

/// Validate an ordered sequence of paths, stopping at the first failing file
pub fn validate_files(
    source: &dyn AssetSource,
    paths: &[PathBuf],
    resource_type: &str,
    resource_name: &str,
    allowed_extensions: &[&str],
) -> Result<(), ResourceError> {
    for path in paths {
        validate_file(source, path, resource_type, resource_name, allowed_extensions)?;
    }
    Ok(())
}

/// The dotted extension of a path, or an empty string
fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default()
}
