//! Command lines for the Python tooling
//!
//! `PythonTools` knows how to spell `virtualenv` and `pip` invocations; it
//! does not run anything itself. The returned command lines are executed by
//! `Package` and `Workspace` through a `CommandRunner`.

use crate::config::Config;
use std::path::Path;

/// Name of the pip executable inside a virtualenv
const ENV_PIP: &str = "pip";

/// Builds `virtualenv` and `pip` command lines from configuration
#[derive(Debug, Clone)]
pub struct PythonTools {
    virtualenv: String,
    pip: String,
    python: Option<String>,
    no_cache_dir: bool,
    wheel_args: Vec<String>,
    install_args: Vec<String>,
}

impl PythonTools {
    /// Create tooling from the loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            virtualenv: config.tools.virtualenv.clone(),
            pip: config.tools.pip.clone(),
            python: config.tools.python.clone().filter(|p| !p.is_empty()),
            no_cache_dir: config.wheel.no_cache_dir,
            wheel_args: config.wheel.extra_args.clone(),
            install_args: config.install.extra_args.clone(),
        }
    }

    /// Host pip program
    pub fn pip(&self) -> &str {
        &self.pip
    }

    /// Environment-isolation program
    pub fn virtualenv(&self) -> &str {
        &self.virtualenv
    }

    /// `virtualenv [--python X] <name>`
    pub fn create_env(&self, name: &str) -> Vec<String> {
        let mut command = vec![self.virtualenv.clone()];
        if let Some(ref python) = self.python {
            command.push("--python".to_string());
            command.push(python.clone());
        }
        command.push(name.to_string());
        command
    }

    /// `pip wheel [--no-cache-dir] --wheel-dir <dir> <requirement>`
    pub fn wheel(&self, wheel_dir: &Path, requirement: &str) -> Vec<String> {
        let mut command = vec![self.pip.clone(), "wheel".to_string()];
        if self.no_cache_dir {
            command.push("--no-cache-dir".to_string());
        }
        command.push("--wheel-dir".to_string());
        command.push(wheel_dir.display().to_string());
        command.extend(self.wheel_args.iter().cloned());
        command.push(requirement.to_string());
        command
    }

    /// `pip install --no-index --find-links <dir> -r <manifest>`, run inside
    /// the environment so the environment's own pip is used
    pub fn install(&self, wheel_dir: &Path, manifest: &Path) -> Vec<String> {
        let mut command = vec![
            ENV_PIP.to_string(),
            "install".to_string(),
            "--no-index".to_string(),
            "--find-links".to_string(),
            wheel_dir.display().to_string(),
            "-r".to_string(),
            manifest.display().to_string(),
        ];
        command.extend(self.install_args.iter().cloned());
        command
    }

    /// `pip freeze`, run inside the environment
    pub fn freeze(&self) -> Vec<String> {
        vec![ENV_PIP.to_string(), "freeze".to_string()]
    }

    /// `<tool> --version`, used by the status check
    pub fn version(program: &str) -> Vec<String> {
        vec![program.to_string(), "--version".to_string()]
    }
}

impl Default for PythonTools {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_python_is_ignored() {
        let mut config = Config::default();
        config.tools.python = Some(String::new());
        let tools = PythonTools::from_config(&config);
        assert_eq!(tools.create_env("venv"), vec!["virtualenv", "venv"]);
    }

    #[test]
    fn create_env_default() {
        let tools = PythonTools::default();
        assert_eq!(tools.create_env("venv"), vec!["virtualenv", "venv"]);
    }

    #[test]
    fn create_env_with_python() {
        let mut config = Config::default();
        config.tools.python = Some("python3".to_string());
        let tools = PythonTools::from_config(&config);
        assert_eq!(
            tools.create_env("venv"),
            vec!["virtualenv", "--python", "python3", "venv"]
        );
    }

    #[test]
    fn wheel_puts_requirement_last() {
        let mut config = Config::default();
        config.wheel.extra_args = vec!["--prefer-binary".to_string()];
        let tools = PythonTools::from_config(&config);
        assert_eq!(
            tools.wheel(Path::new("/w/wheelhouse"), "six==1.10"),
            vec![
                "pip",
                "wheel",
                "--no-cache-dir",
                "--wheel-dir",
                "/w/wheelhouse",
                "--prefer-binary",
                "six==1.10"
            ]
        );
    }

    #[test]
    fn wheel_without_no_cache_dir() {
        let mut config = Config::default();
        config.wheel.no_cache_dir = false;
        let tools = PythonTools::from_config(&config);
        assert!(!tools
            .wheel(Path::new("/w"), "six")
            .contains(&"--no-cache-dir".to_string()));
    }

    #[test]
    fn install_uses_environment_pip() {
        let mut config = Config::default();
        config.tools.pip = "/usr/bin/pip3".to_string();
        let tools = PythonTools::from_config(&config);
        let command = tools.install(
            Path::new("/w/wheelhouse"),
            Path::new("/w/a/requirements.txt"),
        );
        assert_eq!(command[0], "pip");
        assert_eq!(
            command[1..],
            [
                "install",
                "--no-index",
                "--find-links",
                "/w/wheelhouse",
                "-r",
                "/w/a/requirements.txt"
            ]
        );
        assert_eq!(tools.pip(), "/usr/bin/pip3");
    }

    #[test]
    fn freeze_command() {
        assert_eq!(PythonTools::default().freeze(), vec!["pip", "freeze"]);
    }
}
