use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use muster::SolutionTool;
use muster::types::AppResult;

/// Scripted stand-in for the dotnet CLI.
///
/// `projects` and `references` script the enumeration calls;
/// `report_bodies` maps a tested project name to the JSON the fake mutation
/// run drops at `report_drop`; names in `failing` make the run exit non-zero
/// without producing a report. Every invocation is recorded.
pub struct FakeTool {
    pub projects: Vec<PathBuf>,
    pub references: HashMap<PathBuf, Vec<PathBuf>>,
    pub report_drop: PathBuf,
    pub report_bodies: HashMap<String, String>,
    pub failing: Vec<String>,
    pub invocations: RefCell<Vec<String>>,
}

impl FakeTool {
    pub fn new(report_drop: impl Into<PathBuf>) -> Self {
        Self {
            projects: Vec::new(),
            references: HashMap::new(),
            report_drop: report_drop.into(),
            report_bodies: HashMap::new(),
            failing: Vec::new(),
            invocations: RefCell::new(Vec::new()),
        }
    }
}

impl SolutionTool for FakeTool {
    fn list_projects(&self, _solution: &Path) -> AppResult<Vec<PathBuf>> {
        Ok(self.projects.clone())
    }

    fn list_references(&self, project: &Path) -> AppResult<Vec<PathBuf>> {
        Ok(self.references.get(project).cloned().unwrap_or_default())
    }

    fn run_mutation_test(
        &self,
        _solution: &Path,
        tested_project_name: &str,
        _test_project: &Path,
        _extra_args: &[String],
    ) -> AppResult<bool> {
        self.invocations
            .borrow_mut()
            .push(tested_project_name.to_string());

        if self.failing.iter().any(|name| name == tested_project_name) {
            return Ok(false);
        }

        if let Some(body) = self.report_bodies.get(tested_project_name) {
            if let Some(parent) = self.report_drop.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&self.report_drop, body)?;
        }

        Ok(true)
    }

    fn produced_report_path(&self) -> AppResult<PathBuf> {
        Ok(self.report_drop.clone())
    }
}
