//! Common test utilities for integration tests.
//!
//! Fixtures live under `tests/fixtures`: `src/` holds sample documents,
//! `expected/` the documents a run over `configs/object_maps.yaml` must
//! produce.

use std::fs;
use std::path::{Path, PathBuf};

use local2cdn::config::{Config, FileGroup, RawMaps};
use tempfile::TempDir;

/// The CDN prefix used by the sample configuration.
#[allow(dead_code)]
pub const BOOTCSS: &str = "http://cdn.bootcss.com/";

/// Path of a fixture file.
pub fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(relative)
}

/// Contents of a fixture file.
#[allow(dead_code)]
pub fn fixture(relative: &str) -> String {
    fs::read_to_string(fixture_path(relative)).unwrap()
}

/// A temporary project with the sample documents copied into `src/`.
#[allow(dead_code)]
pub fn sample_project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    for name in ["sample.css", "sample.html", "sample.ejs"] {
        fs::copy(
            fixture_path(&format!("src/{name}")),
            dir.path().join("src").join(name),
        )
        .unwrap();
    }
    dir
}

/// Write `content` to `dir/name`, creating parents.
#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// The object-form sample maps.
#[allow(dead_code)]
pub fn sample_maps() -> RawMaps {
    RawMaps::object([
        ("jquery.js", "jquery/2.0.3/jquery.min.js"),
        ("bootstrap.js", "bootstrap/3.1.1/js/bootstrap.min.js"),
        ("bootstrap.css", "/bootstrap/3.1.1/css/bootstrap.min.css"),
        ("foo.png", "/xxx/foo.png"),
        ("foo.jpg", "/xxx/foo.jpg"),
        ("foo.gif", "/xxx/foo.gif"),
        ("foo.tif", "/xxx/foo.tif:image"),
    ])
}

/// The sample configuration with the given file groups.
#[allow(dead_code)]
pub fn sample_config(files: Vec<FileGroup>) -> Config {
    Config {
        maps: Some(sample_maps()),
        prefix: Some(BOOTCSS.to_string()),
        files: Some(files),
        ..Default::default()
    }
}

/// One `src/<name>` to `dist/<name>` group per sample document.
#[allow(dead_code)]
pub fn sample_groups() -> Vec<FileGroup> {
    ["sample.css", "sample.html", "sample.ejs"]
        .iter()
        .map(|name| FileGroup::new(format!("src/{name}"), format!("dist/{name}")))
        .collect()
}
