//! Recording runner for tests
//!
//! Simulates the filesystem effects of `virtualenv` and `pip wheel` without
//! needing Python on the test machine.

use crate::error::CampResult;
use crate::orchestration::invocation::{CommandOutput, Invocation};
use crate::orchestration::runtime::CommandRunner;
use async_trait::async_trait;
use std::fs;
use std::sync::Mutex;

#[derive(Default)]
pub(crate) struct FakeRunner {
    calls: Mutex<Vec<Invocation>>,
    /// Any invocation whose command line contains one of these fails
    failing: Vec<String>,
    /// Stdout returned for `pip freeze`
    freeze: String,
}

impl FakeRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing_on(mut self, needle: &str) -> Self {
        self.failing.push(needle.to_string());
        self
    }

    pub(crate) fn with_freeze(mut self, stdout: &str) -> Self {
        self.freeze = stdout.to_string();
        self
    }

    pub(crate) fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    fn simulate(&self, inv: &Invocation) -> CommandOutput {
        let ok = |stdout: String| CommandOutput {
            status: Some(0),
            stdout,
            stderr: String::new(),
        };

        if self.failing.iter().any(|n| inv.display().contains(n.as_str())) {
            return CommandOutput {
                status: Some(1),
                stdout: String::new(),
                stderr: format!("ERROR: simulated failure of {}", inv.display()),
            };
        }

        if inv.program.ends_with("virtualenv") {
            let name = inv.args.last().cloned().unwrap_or_default();
            fs::create_dir_all(inv.cwd.join(name).join("bin")).unwrap();
            return ok("created virtual environment".to_string());
        }

        match inv.args.first().map(String::as_str) {
            Some("wheel") => {
                let pos = inv.args.iter().position(|a| a == "--wheel-dir").unwrap();
                let dir = &inv.args[pos + 1];
                let requirement = inv.args.last().unwrap();
                let file = format!("{}-py3-none-any.whl", requirement.replace("==", "-"));
                fs::write(std::path::Path::new(dir).join(file), b"").unwrap();
                ok(format!("Saved {}", requirement))
            }
            Some("freeze") => ok(self.freeze.clone()),
            _ => ok(String::new()),
        }
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, invocation: &Invocation) -> CampResult<CommandOutput> {
        self.calls.lock().unwrap().push(invocation.clone());
        Ok(self.simulate(invocation))
    }

    fn runner_name(&self) -> &'static str {
        "fake"
    }
}
