//! Batch extraction over files named on the command line.

use std::path::Path;

use indexmap::IndexMap;
use tracing::{debug, error};

use crate::{
    ast::AstProvider,
    symbols::{SymbolReport, assemble, to_json_pretty},
};

/// Parse every existing regular file in `paths` and report on it.
///
/// Paths that do not exist or name directories are skipped silently.
/// Unreadable files and parse failures are logged and left out of the
/// result; the remaining files are still processed.
pub fn extract_files(
    provider: &dyn AstProvider,
    paths: &[String],
) -> IndexMap<String, SymbolReport> {
    let mut reports = IndexMap::with_capacity(paths.len());

    for path in paths {
        let file = Path::new(path);
        if !file.exists() || file.is_dir() {
            debug!("[batch] skipping {path}: not a file");
            continue;
        }

        let source = match std::fs::read(file) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(err) => {
                error!("[batch] failed to read {path}: {err}");
                continue;
            },
        };

        match provider.parse(path, &source) {
            Ok(unit) => {
                reports.insert(path.clone(), assemble(Some(&unit)));
            },
            Err(err) => {
                error!("[batch] failed to parse {path}: {err}");
                for diagnostic in err.diagnostics() {
                    error!("[batch]   {diagnostic}");
                }
            },
        }
    }

    reports
}

/// Render batch results as 4-space indented JSON.
///
/// With a single input path the output is that file's report alone, or
/// `None` when it produced none. With several paths the output maps each
/// reported path to its report.
pub fn render_reports(
    paths: &[String],
    reports: &IndexMap<String, SymbolReport>,
) -> serde_json::Result<Option<String>> {
    match paths {
        [single] => reports.get(single).map(to_json_pretty).transpose(),
        _ => to_json_pretty(reports).map(Some),
    }
}
