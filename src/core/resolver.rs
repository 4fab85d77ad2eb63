use std::path::Path;

use log::debug;

use crate::SolutionTool;
use crate::types::config::config;
use crate::types::{AppError, AppResult, ProjectPair};

/// Resolve all (test project, tested project) pairs in a solution, in the
/// solution's project enumeration order.
pub fn resolve(tool: &dyn SolutionTool, solution: &Path) -> AppResult<Vec<ProjectPair>> {
    let suffix = config().test_suffix();
    let test_file_suffix = format!("{}.{}", suffix, config().project_extension());

    let mut pairs = Vec::new();
    for project in tool.list_projects(solution)? {
        let is_test_project = project
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(&test_file_suffix));
        if !is_test_project {
            continue;
        }

        if let Some(pair) = resolve_pair(tool, &project, suffix)? {
            pairs.push(pair);
        }
    }

    Ok(pairs)
}

/// Try to resolve the tested project for one test project. `None` means the
/// test project has no project references and defines no pair.
fn resolve_pair(
    tool: &dyn SolutionTool,
    test_project: &Path,
    suffix: &str,
) -> AppResult<Option<ProjectPair>> {
    let references = tool.list_references(test_project)?;

    if references.is_empty() {
        debug!("skipping {}: no project references", test_project.display());
        return Ok(None);
    }

    // A single reference is the tested project
    if let [reference] = references.as_slice() {
        return Ok(Some(ProjectPair {
            tested_project_path: reference.clone(),
            test_project_path: test_project.to_path_buf(),
        }));
    }

    // Multiple references: the tested project is the one whose name plus the
    // test suffix matches the test project's name
    let test_stem = file_stem_of(test_project);
    for reference in &references {
        if format!("{}{}", file_stem_of(reference), suffix) == test_stem {
            return Ok(Some(ProjectPair {
                tested_project_path: reference.clone(),
                test_project_path: test_project.to_path_buf(),
            }));
        }
    }

    Err(AppError::AmbiguousReferences {
        test_project: test_project.to_path_buf(),
        count: references.len(),
        suffix: suffix.to_string(),
    })
}

fn file_stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
