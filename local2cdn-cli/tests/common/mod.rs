//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns
//! - Test data fixtures

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Sample configuration mirroring a typical Gruntfile setup.
#[allow(dead_code)]
pub const SAMPLE_CONFIG: &str = "\
prefix: http://cdn.bootcss.com/
maps:
  jquery.js: jquery/2.0.3/jquery.min.js
  bootstrap.css: /bootstrap/3.1.1/css/bootstrap.min.css
  foo.png: /xxx/foo.png
  foo.tif: /xxx/foo.tif:image
  thing: place
files:
  - src: [src/index.html]
    dest: dist/index.html
  - src: src/site.css
    dest: dist/site.css
";

/// Sample HTML document.
#[allow(dead_code)]
pub const SAMPLE_HTML: &str = r#"<link rel="stylesheet" href="css/bootstrap.css">
<script src="js/jquery.js"></script>
<img src="img/foo.png">
"#;

/// Sample HTML document after rewriting with [`SAMPLE_CONFIG`].
#[allow(dead_code)]
pub const EXPECTED_HTML: &str = r#"<link rel="stylesheet" href="http://cdn.bootcss.com/bootstrap/3.1.1/css/bootstrap.min.css">
<script src="http://cdn.bootcss.com/jquery/2.0.3/jquery.min.js"></script>
<img src="http://cdn.bootcss.com/xxx/foo.png">
"#;

/// Sample stylesheet.
#[allow(dead_code)]
pub const SAMPLE_CSS: &str = "a { background: url('../img/foo.tif') }\n";

/// Sample stylesheet after rewriting with [`SAMPLE_CONFIG`].
#[allow(dead_code)]
pub const EXPECTED_CSS: &str = "a { background: url('http://cdn.bootcss.com/xxx/foo.tif') }\n";

/// Test environment rooted in a temporary project directory.
///
/// Commands run with the project directory as their working directory and
/// with every `LOCAL2CDN_*` variable removed.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create an empty project.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        Self {
            temp_dir,
            temp_path,
        }
    }

    /// Create a project with [`SAMPLE_CONFIG`] and the sample documents.
    pub fn sample() -> Self {
        let env = Self::new();
        env.write_file("local2cdn.yaml", SAMPLE_CONFIG);
        env.write_file("src/index.html", SAMPLE_HTML);
        env.write_file("src/site.css", SAMPLE_CSS);
        env
    }

    /// Get a command builder running in the project directory.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("local2cdn").expect("Failed to find local2cdn binary");
        cmd.current_dir(&self.temp_path);
        for var in [
            "LOCAL2CDN_CONFIG",
            "LOCAL2CDN_PREFIX",
            "LOCAL2CDN_SEPARATOR",
            "LOCAL2CDN_REGEX",
            "LOCAL2CDN_LOG_MODE",
            "LOCAL2CDN_OUTPUT_FORMAT",
        ] {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a file relative to the project, creating parents.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Read a file relative to the project.
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.temp_path.join(name)).expect("Failed to read test file")
    }
}
