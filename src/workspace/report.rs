//! Step bookkeeping for multi-package commands
//!
//! Commands keep going after a failed step and summarize at the end,
//! unless fail-fast is requested.

use crate::error::{CampError, CampResult};
use crate::orchestration::CommandOutput;
use std::fmt;

/// A kind of step performed by `up` or `down`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    CreateEnvironment,
    BuildWheel,
    InstallRequirements,
    RemoveEnvironment,
    ClearWheelhouse,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CreateEnvironment => "create virtualenv",
            Self::BuildWheel => "build wheel",
            Self::InstallRequirements => "install requirements",
            Self::RemoveEnvironment => "remove virtualenv",
            Self::ClearWheelhouse => "clear wheelhouse",
        };
        write!(f, "{}", name)
    }
}

/// One failed step
#[derive(Debug, Clone)]
pub struct Failure {
    pub stage: Stage,
    /// Package path or requirement the step was about
    pub subject: String,
    /// Error message or captured output
    pub detail: String,
}

/// Collects step outcomes for a command
#[derive(Debug, Default)]
pub struct Report {
    fail_fast: bool,
    steps: usize,
    failures: Vec<Failure>,
}

impl Report {
    /// Create a report; with `fail_fast` the first failure aborts
    pub fn new(fail_fast: bool) -> Self {
        Self {
            fail_fast,
            ..Default::default()
        }
    }

    /// Record a step outcome.
    ///
    /// Returns `StepFailed` when the step failed and fail-fast is on.
    pub fn record(
        &mut self,
        stage: Stage,
        subject: impl Into<String>,
        outcome: Result<(), String>,
    ) -> CampResult<()> {
        self.steps += 1;
        let Err(detail) = outcome else {
            return Ok(());
        };

        let subject = subject.into();
        self.failures.push(Failure {
            stage,
            subject: subject.clone(),
            detail,
        });

        if self.fail_fast {
            return Err(CampError::StepFailed {
                stage: stage.to_string(),
                subject,
            });
        }
        Ok(())
    }

    /// Failures recorded so far
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Number of steps recorded
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Whether every recorded step succeeded
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Turn the report into the command's result
    pub fn finish(self) -> CampResult<()> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(CampError::StepsFailed {
                failed: self.failures.len(),
                total: self.steps,
            })
        }
    }
}

/// Classify the result of a command step.
///
/// A spawn error or a non-zero exit becomes `Err` with text for the user.
pub fn step_outcome(result: &CampResult<CommandOutput>) -> Result<(), String> {
    match result {
        Ok(output) if output.success() => Ok(()),
        Ok(output) => {
            let diagnostics = output.diagnostics();
            if diagnostics.is_empty() {
                Err(output.status_text())
            } else {
                Err(format!("{}\n{}", output.status_text(), diagnostics))
            }
        }
        Err(e) => Err(e.to_string()),
    }
}
