use std::fs;
use std::path::Path;
use std::time::SystemTime;

use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;

use crate::types::config::config;
use crate::types::{AppResult, ProjectPair};

/// Directories directly under each project root that hold build output and
/// never count toward staleness.
const BUILD_OUTPUT_DIRS: &[&str] = &["bin", "obj"];

/// Decide whether a pair's mutation report must be regenerated.
///
/// A report is stale when forced, missing, or older than any source file
/// under either project directory (build outputs, configured ignore globs,
/// and the report file itself excluded).
pub fn is_stale(pair: &ProjectPair, force: bool) -> AppResult<bool> {
    if force {
        return Ok(true);
    }

    let report = pair.report_path();
    if !report.exists() {
        return Ok(true);
    }

    let report_mtime = fs::metadata(&report)?.modified()?;
    let ignore = compile_ignore_globs();

    for dir in [pair.test_project_dir(), pair.tested_project_dir()] {
        if dir_has_newer_file(dir, dir, &report, report_mtime, &ignore)? {
            return Ok(true);
        }
    }

    Ok(false)
}

fn compile_ignore_globs() -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for pattern in config().staleness().ignore() {
        match Glob::new(pattern) {
            Ok(glob) => {
                builder.add(glob);
            }
            Err(e) => debug!("ignoring invalid staleness glob '{pattern}': {e}"),
        }
    }
    builder.build().unwrap_or_else(|_| GlobSet::empty())
}

/// Walk `dir` looking for any file modified strictly after `report_mtime`.
/// `root` is the project directory the walk started from; bin/obj directly
/// under it are skipped, as is the report file itself.
fn dir_has_newer_file(
    root: &Path,
    dir: &Path,
    report: &Path,
    report_mtime: SystemTime,
    ignore: &GlobSet,
) -> AppResult<bool> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if ignore.is_match(&path) {
            continue;
        }

        if path.is_dir() {
            let is_build_output = path.parent() == Some(root)
                && path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| BUILD_OUTPUT_DIRS.contains(&name));
            if is_build_output {
                continue;
            }
            if dir_has_newer_file(root, &path, report, report_mtime, ignore)? {
                return Ok(true);
            }
        } else {
            if path == report {
                continue;
            }
            if entry.metadata()?.modified()? > report_mtime {
                debug!("{} is newer than {}", path.display(), report.display());
                return Ok(true);
            }
        }
    }

    Ok(false)
}
