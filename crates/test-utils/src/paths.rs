//! Where the optional real datasets live.

use std::path::{Path, PathBuf};

/// Workspace root, derived from this crate's manifest (`crates/test-utils`).
pub fn workspace_root() -> PathBuf {
    let here = Path::new(env!("CARGO_MANIFEST_DIR"));
    here.ancestors()
        .nth(2)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| here.to_path_buf())
}

fn search_dirs() -> Vec<PathBuf> {
    let root = workspace_root();
    let mut dirs: Vec<PathBuf> = std::env::var_os("TEST_DATA_DIR")
        .map(PathBuf::from)
        .into_iter()
        .collect();
    dirs.push(root.join("data"));
    dirs.extend(
        ["netcdf-parser", "geotiff-parser"]
            .iter()
            .map(|c| root.join("crates").join(c).join("testdata")),
    );
    dirs.push(root.join("testdata"));
    dirs
}

/// First existing `dir/name` over `$TEST_DATA_DIR`, `data/`, the parser
/// crates' `testdata/` and the root `testdata/`.
pub fn find_test_file(name: &str) -> Option<PathBuf> {
    search_dirs()
        .into_iter()
        .map(|dir| dir.join(name))
        .find(|path| path.is_file())
}
