//! Custom validation functions for configuration.
//!
//! Provides shared validation logic used across multiple configuration modules.

use std::path::Path;

use validator::ValidationError;

/// Validate that a dump marker is a single non-blank line.
///
/// Markers are compared against trimmed lines, so surrounding whitespace is
/// also rejected.
pub fn validate_marker(marker: &str) -> Result<(), ValidationError> {
    if marker.trim().is_empty() {
        return Err(ValidationError::new("empty_marker"));
    }
    if marker.contains(['\n', '\r']) || marker.trim() != marker {
        return Err(ValidationError::new("invalid_marker"));
    }
    Ok(())
}

/// Validate that an execution-log prefix is usable for left-trimmed matching.
pub fn validate_prefix(prefix: &str) -> Result<(), ValidationError> {
    if prefix.trim().is_empty() || prefix.trim_start() != prefix || prefix.contains('\n') {
        return Err(ValidationError::new("invalid_prefix"));
    }
    Ok(())
}

/// Validate that an artifact path names a file rather than a directory shape.
pub fn validate_file_path(path: &Path) -> Result<(), ValidationError> {
    if path.as_os_str().is_empty() || path.file_name().is_none() {
        return Err(ValidationError::new("invalid_file_path"));
    }
    Ok(())
}

/// Validate that the executable name has no path separators.
pub fn validate_executable(name: &str) -> Result<(), ValidationError> {
    let valid = !name.is_empty() && !name.contains(['/', '\\']) && !name.contains(char::is_whitespace);
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_executable"))
    }
}
