//! Helpers for the cross-crate integration tests under `tests/`.

use std::path::PathBuf;

/// A unique scratch directory under the system temp dir. Callers clean up
/// after themselves.
pub fn scratch_dir(label: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("sage_cli_{}_{}", label, std::process::id()));
    path
}
