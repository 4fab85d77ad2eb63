use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use console::style;
use log::{debug, info, warn};

use crate::SolutionTool;
use crate::core::cli::Args;
use crate::core::dotnet::normalize_path;
use crate::core::report::{merge, render};
use crate::core::{resolver, staleness};
use crate::types::{AppResult, PairOutcome, ProjectPair, RunSummary};

/// Drive one end-to-end run: resolve pairs, refresh stale reports one pair
/// at a time, then merge and render when anything changed.
pub fn execute_run(
    args: &Args,
    tool: &dyn SolutionTool,
    running: &AtomicBool,
) -> AppResult<RunSummary> {
    let solution = absolute_solution_path(&args.solution)?;
    let pairs = resolver::resolve(tool, &solution)?;

    let mut summary = RunSummary::default();
    if pairs.is_empty() {
        info!(
            "no test projects resolved in {}; nothing to do",
            solution.display()
        );
        return Ok(summary);
    }

    for pair in &pairs {
        if !running.load(Ordering::SeqCst) {
            warn!("interrupted, stopping before {}", pair.test_project_name());
            break;
        }
        let outcome = update_pair(pair, args, tool, &solution)?;
        summary.record(pair.clone(), outcome);
    }

    if summary.any_updated() {
        let with_reports = pairs_with_reports(&pairs);
        let aggregate = merge::merge_reports(&with_reports)?;
        let written = render::write_report(&solution, &aggregate)?;
        info!("merged report written to {}", written.display());
    } else {
        debug!("no report updated; merged report left untouched");
    }

    Ok(summary)
}

/// Refresh one pair's report if it is stale. External command failure is a
/// pair-scoped outcome, not an error; the caller continues with the rest.
fn update_pair(
    pair: &ProjectPair,
    args: &Args,
    tool: &dyn SolutionTool,
    solution: &Path,
) -> AppResult<PairOutcome> {
    print!("{}", pair.test_project_name());
    let _ = io::stdout().flush();

    if !staleness::is_stale(pair, args.force)? {
        println!(" {}", style(PairOutcome::UpToDate).green());
        return Ok(PairOutcome::UpToDate);
    }

    println!(" {} ...", style("updating").cyan());

    let succeeded = tool.run_mutation_test(
        solution,
        &pair.tested_project_name(),
        &pair.test_project_path,
        &args.passthrough,
    )?;

    if !succeeded {
        println!("{}", style("mutation-test command exited with error").red());
        return Ok(PairOutcome::Failed);
    }

    let produced = tool.produced_report_path()?;
    fs::copy(&produced, pair.report_path())?;
    debug!("report copied to {}", pair.report_path().display());

    Ok(PairOutcome::Updated)
}

/// Pairs whose report file exists on disk; the others cannot contribute to
/// the merge and are excluded with a warning.
fn pairs_with_reports(pairs: &[ProjectPair]) -> Vec<ProjectPair> {
    let mut with_reports = Vec::new();
    for pair in pairs {
        if pair.report_path().exists() {
            with_reports.push(pair.clone());
        } else {
            warn!(
                "{} has no report; excluded from the merged report",
                pair.test_project_name()
            );
        }
    }
    with_reports
}

fn absolute_solution_path(solution: &Path) -> AppResult<PathBuf> {
    if solution.is_absolute() {
        Ok(normalize_path(solution))
    } else {
        Ok(normalize_path(&std::env::current_dir()?.join(solution)))
    }
}
