use serde::Serialize;
use strum::Display;

use super::ProjectPair;

/// Observable per-pair outcome of one orchestrator run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum PairOutcome {
    /// The report exists and no source file is newer; nothing was run.
    #[strum(serialize = "up to date")]
    UpToDate,

    /// The mutation-test command ran and the report was replaced.
    #[strum(serialize = "updated")]
    Updated,

    /// The mutation-test command exited non-zero; any prior report is left
    /// untouched.
    #[strum(serialize = "error")]
    Failed,
}

/// Outcomes for all processed pairs of a run, in processing order.
#[derive(Debug, Default)]
pub struct RunSummary {
    outcomes: Vec<(ProjectPair, PairOutcome)>,
}

impl RunSummary {
    pub fn record(&mut self, pair: ProjectPair, outcome: PairOutcome) {
        self.outcomes.push((pair, outcome));
    }

    pub fn outcomes(&self) -> &[(ProjectPair, PairOutcome)] {
        &self.outcomes
    }

    pub fn any_updated(&self) -> bool {
        self.outcomes
            .iter()
            .any(|(_, outcome)| *outcome == PairOutcome::Updated)
    }

    pub fn any_failed(&self) -> bool {
        self.outcomes
            .iter()
            .any(|(_, outcome)| *outcome == PairOutcome::Failed)
    }
}
