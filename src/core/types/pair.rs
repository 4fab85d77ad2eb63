use std::path::{Path, PathBuf};

use serde::Serialize;

/// A (test project, tested project) association discovered by reference
/// analysis. Both paths are absolute; everything else is derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectPair {
    pub tested_project_path: PathBuf,
    pub test_project_path: PathBuf,
}

impl ProjectPair {
    pub fn tested_project_dir(&self) -> &Path {
        parent_of(&self.tested_project_path)
    }

    pub fn test_project_dir(&self) -> &Path {
        parent_of(&self.test_project_path)
    }

    /// File name of the tested project, e.g. "Foo.csproj". This is what the
    /// mutation-test command receives as the project under test.
    pub fn tested_project_name(&self) -> String {
        file_name_of(&self.tested_project_path)
    }

    /// File name of the test project, used in per-pair status lines.
    pub fn test_project_name(&self) -> String {
        file_name_of(&self.test_project_path)
    }

    /// One report per test project: the test project path with its extension
    /// replaced by `json`.
    pub fn report_path(&self) -> PathBuf {
        self.test_project_path.with_extension("json")
    }
}

fn parent_of(path: &Path) -> &Path {
    path.parent().unwrap_or(Path::new("."))
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
