use std::io;
use std::path::{Component, Path, PathBuf};
use std::process::Command;

use log::debug;

use crate::types::AppResult;
use crate::types::config::config;

/// External developer-tool surface the orchestrator depends on. The real
/// implementation shells out to `dotnet`; tests script it.
pub trait SolutionTool {
    /// Absolute paths of the projects in a solution, in solution order.
    fn list_projects(&self, solution: &Path) -> AppResult<Vec<PathBuf>>;

    /// Absolute paths of the projects directly referenced by a project.
    fn list_references(&self, project: &Path) -> AppResult<Vec<PathBuf>>;

    /// Run one mutation-test pass for a pair. `Ok(false)` means the external
    /// command exited non-zero; failing to spawn it at all is an error.
    fn run_mutation_test(
        &self,
        solution: &Path,
        tested_project_name: &str,
        test_project: &Path,
        extra_args: &[String],
    ) -> AppResult<bool>;

    /// Where the external command leaves its JSON report on success.
    fn produced_report_path(&self) -> AppResult<PathBuf>;
}

/// `dotnet` CLI wrapper. The program comes from config/CLI and is looked up
/// on PATH when not an absolute path.
pub struct DotnetTool {
    program: String,
}

impl DotnetTool {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn from_config() -> Self {
        Self::new(config().dotnet())
    }

    /// Run a listing command and parse its stdout as project paths relative
    /// to `base_dir`.
    fn capture_listing(&self, mut command: Command, base_dir: &Path) -> AppResult<Vec<PathBuf>> {
        debug!("running {command:?}");
        let output = command.output()?;
        if !output.status.success() {
            return Err(io::Error::other(format!(
                "{command:?} exited with {}",
                output.status
            ))
            .into());
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_listing(&stdout, base_dir))
    }
}

impl SolutionTool for DotnetTool {
    fn list_projects(&self, solution: &Path) -> AppResult<Vec<PathBuf>> {
        let mut command = Command::new(&self.program);
        command.arg("sln").arg(solution).arg("list");
        let solution_dir = solution.parent().unwrap_or(Path::new("."));
        self.capture_listing(command, solution_dir)
    }

    fn list_references(&self, project: &Path) -> AppResult<Vec<PathBuf>> {
        let mut command = Command::new(&self.program);
        command.arg("list").arg(project).arg("reference");
        let project_dir = project.parent().unwrap_or(Path::new("."));
        self.capture_listing(command, project_dir)
    }

    fn run_mutation_test(
        &self,
        solution: &Path,
        tested_project_name: &str,
        test_project: &Path,
        extra_args: &[String],
    ) -> AppResult<bool> {
        let mut command = Command::new(&self.program);
        command
            .arg("stryker")
            .arg("-s")
            .arg(solution)
            .arg("-p")
            .arg(tested_project_name)
            .arg("-tp")
            .arg(test_project)
            .arg("-r")
            .arg("json")
            .arg("-O")
            .arg(config().output_dir())
            .args(extra_args);

        debug!("running {command:?}");
        // stdio stays inherited: the external tool owns the console while it runs
        let status = command.status()?;
        Ok(status.success())
    }

    fn produced_report_path(&self) -> AppResult<PathBuf> {
        Ok(std::env::current_dir()?
            .join(config().output_dir())
            .join("reports")
            .join("mutation-report.json"))
    }
}

/// `dotnet` listing output: two header lines, then one relative path per
/// line, resolved against `base_dir`.
pub fn parse_listing(output: &str, base_dir: &Path) -> Vec<PathBuf> {
    output
        .lines()
        .skip(2)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| normalize_path(&base_dir.join(line)))
        .collect()
}

/// Lexically resolve `.` and `..` components without touching the
/// filesystem, so reference paths compare equal to solution paths.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component.as_os_str());
                }
            }
            _ => normalized.push(component.as_os_str()),
        }
    }
    normalized
}
