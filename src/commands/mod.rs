pub mod engines;
pub mod init;
pub mod roast;

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;
use walkdir::WalkDir;

use roastme::output::OutputFormat;

pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "js", "jsx", "ts", "tsx", "py", "java", "cpp", "c", "cs", "php", "rb", "go", "rs", "swift", "kt",
    "scala",
];

pub fn parse_format(s: &str) -> Result<OutputFormat> {
    match s {
        "pretty" => Ok(OutputFormat::Pretty),
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => anyhow::bail!("unknown format: {other} (expected pretty, text, or json)"),
    }
}

/// Rules for which files under a directory get roasted.
pub struct FileFilter {
    pub ignore: Vec<glob::Pattern>,
    pub max_file_size: u64,
}

impl FileFilter {
    fn ignored(&self, relative: &Path) -> bool {
        let relative = relative.to_string_lossy().replace('\\', "/");
        let name = relative.rsplit('/').next().unwrap_or(&relative);
        self.ignore
            .iter()
            .any(|p| p.matches(&relative) || p.matches(name))
    }
}

/// A file is returned as-is. A directory is walked for supported source
/// files, minus ignored paths and oversized files.
pub fn collect_files(path: &Path, filter: &FileFilter) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path)
        .into_iter()
        .filter_entry(|e| {
            let relative = e.path().strip_prefix(path).unwrap_or(e.path());
            relative.as_os_str().is_empty() || !filter.ignored(relative)
        })
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let p = entry.path();
        let supported = p
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| SUPPORTED_EXTENSIONS.contains(&e))
            .unwrap_or(false);
        if !supported {
            continue;
        }

        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
        if size > filter.max_file_size {
            debug!(path = %p.display(), size, "skipping oversized file");
            continue;
        }
        files.push(p.to_path_buf());
    }
    files.sort();
    Ok(files)
}
