//! Command runner abstraction
//!
//! Provides a trait for process execution so the workspace logic can be
//! driven by the real system or by a recording double in tests.

use crate::error::CampResult;
use crate::orchestration::invocation::{CommandOutput, Invocation};
use async_trait::async_trait;

/// Abstract process execution interface
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run an invocation to completion and capture its output.
    ///
    /// Fails only when the process cannot be started; a non-zero exit is
    /// reported through `CommandOutput::status`.
    async fn run(&self, invocation: &Invocation) -> CampResult<CommandOutput>;

    /// Get the human-readable runner name for display
    fn runner_name(&self) -> &'static str;
}
