use std::path::{Path, PathBuf};

/// Quote a path for a concat-demuxer `file '...'` entry. A single quote
/// closes the quoted string, so each one becomes `'\''`.
pub fn escape_manifest_path(path: &Path) -> String {
    path.to_string_lossy().replace('\'', r"'\''")
}

/// Newline-delimited concat manifest, one `file '<path>'` line per segment
pub fn build_manifest(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| format!("file '{}'\n", escape_manifest_path(path)))
        .collect()
}
