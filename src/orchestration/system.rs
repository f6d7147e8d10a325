//! Process runner backed by the host operating system
//!
//! Spawns each invocation with `tokio::process`, waits for it to exit and
//! captures both output streams.

use crate::error::{CampError, CampResult};
use crate::orchestration::invocation::{CommandOutput, Invocation};
use crate::orchestration::runtime::CommandRunner;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Runs invocations as real child processes
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, invocation: &Invocation) -> CampResult<CommandOutput> {
        debug!(
            "Executing in {}: {}",
            invocation.cwd.display(),
            invocation.display()
        );

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .envs(invocation.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| CampError::command_failed(invocation.display(), e))?;

        let output = CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };
        debug!("{} finished with {}", invocation.program, output.status_text());

        Ok(output)
    }

    fn runner_name(&self) -> &'static str {
        "system"
    }
}
