//! Integration tests for camp

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn camp(temp: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("camp");
        cmd.current_dir(temp.path())
            .arg("--config")
            .arg(temp.path().join("global.toml"));
        cmd
    }

    #[test]
    fn help_displays() {
        cargo_bin_cmd!("camp")
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("shared wheelhouse"));
    }

    #[test]
    fn version_displays() {
        cargo_bin_cmd!("camp")
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("camp"));
    }

    #[test]
    fn unknown_command_fails() {
        cargo_bin_cmd!("camp").arg("provision").assert().failure();
    }

    #[test]
    fn completions_bash() {
        cargo_bin_cmd!("camp")
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("camp"));
    }

    #[test]
    fn up_empty_workspace() {
        let temp = TempDir::new().unwrap();
        camp(&temp)
            .arg("up")
            .assert()
            .success()
            .stdout(predicate::str::contains("No Python packages found"));
    }

    #[test]
    fn down_empty_workspace() {
        let temp = TempDir::new().unwrap();
        camp(&temp).arg("down").assert().success();
        camp(&temp).arg("down").assert().success();
    }

    #[test]
    fn missing_root_fails() {
        let temp = TempDir::new().unwrap();
        camp(&temp)
            .args(["-C", "does-not-exist", "down"])
            .assert()
            .failure()
            .stdout(predicate::str::contains("Error:"));
    }

    #[test]
    fn show_lists_skipped_with_reason() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("docs");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("requirements.txt"), "sphinx\n").unwrap();

        camp(&temp)
            .args(["show", "--format", "json", "--skipped"])
            .assert()
            .success()
            .stdout(predicate::str::contains("missing setup.py"))
            .stdout(predicate::str::contains("\"packages\": []"));
    }

    #[test]
    fn show_without_virtualenv() {
        let temp = TempDir::new().unwrap();
        let pkg = temp.path().join("pkg-a");
        std::fs::create_dir(&pkg).unwrap();
        std::fs::write(pkg.join("setup.py"), "").unwrap();
        std::fs::write(pkg.join("requirements.txt"), "six==1.10\n").unwrap();

        camp(&temp)
            .arg("show")
            .assert()
            .success()
            .stdout(predicate::str::contains("No virtualenv"));
    }

    #[test]
    fn init_creates_local_config() {
        let temp = TempDir::new().unwrap();
        camp(&temp).arg("init").assert().success();
        assert!(temp.path().join(".camp.toml").is_file());

        camp(&temp)
            .arg("init")
            .assert()
            .failure()
            .stdout(predicate::str::contains("already exists"));
    }

    #[test]
    fn config_set_local_overrides_global() {
        let temp = TempDir::new().unwrap();
        camp(&temp)
            .args(["config", "set", "--local", "tools.pip", "pip3"])
            .assert()
            .success();

        camp(&temp)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("pip = \"pip3\""));

        camp(&temp)
            .args(["--no-local", "config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("pip = \"pip\""));
    }

    #[test]
    fn config_set_unknown_key_fails() {
        let temp = TempDir::new().unwrap();
        camp(&temp)
            .args(["config", "set", "tools.npm", "npm"])
            .assert()
            .failure()
            .stdout(predicate::str::contains("Unknown config key"))
            .stdout(predicate::str::contains("tools.python"))
            .stderr(predicate::str::is_empty());
    }

    #[test]
    fn config_path_points_at_override() {
        let temp = TempDir::new().unwrap();
        camp(&temp)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("global.toml"));
    }
}

/// End-to-end runs against shell scripts standing in for virtualenv and pip
#[cfg(unix)]
mod workflow_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;
    use tempfile::TempDir;

    const VIRTUALENV: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then echo "virtualenv 20.25.0"; exit 0; fi
for last; do :; done
mkdir -p "$last/bin"
cp "$(dirname "$0")/venv-pip" "$last/bin/pip"
echo "created virtual environment in $last"
"#;

    const HOST_PIP: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then echo "pip 24.0"; exit 0; fi
[ "$1" = "wheel" ] || exit 2
shift
dir=""
while [ $# -gt 1 ]; do
    case "$1" in
        --wheel-dir) dir="$2"; shift 2 ;;
        *) shift ;;
    esac
done
case "$1" in
    broken*) echo "ERROR: No matching distribution found for $1" >&2; exit 1 ;;
esac
name=$(echo "$1" | sed 's/==/-/')
touch "$dir/$name-py3-none-any.whl"
echo "Saved $dir/$name-py3-none-any.whl"
"#;

    const VENV_PIP: &str = r#"#!/bin/sh
case "$1" in
    freeze)
        cat "$VIRTUAL_ENV/installed.txt" 2>/dev/null
        exit 0 ;;
    install)
        while [ $# -gt 0 ]; do
            if [ "$1" = "-r" ]; then
                grep -v '^#' "$2" >> "$VIRTUAL_ENV/installed.txt"
            fi
            shift
        done ;;
esac
exit 0
"#;

    struct Fixture {
        temp: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            let tools = temp.path().join("tools");
            fs::create_dir(&tools).unwrap();
            script(&tools.join("virtualenv"), VIRTUALENV);
            script(&tools.join("pip"), HOST_PIP);
            script(&tools.join("venv-pip"), VENV_PIP);

            let config = format!(
                "[tools]\nvirtualenv = \"{}\"\npip = \"{}\"\n",
                tools.join("virtualenv").display(),
                tools.join("pip").display()
            );
            fs::write(temp.path().join("global.toml"), config).unwrap();
            fs::create_dir(temp.path().join("ws")).unwrap();

            Self { temp }
        }

        fn root(&self) -> std::path::PathBuf {
            self.temp.path().join("ws")
        }

        fn package(&self, name: &str, requirements: Option<&str>) {
            let dir = self.root().join(name);
            fs::create_dir(&dir).unwrap();
            fs::write(dir.join("setup.py"), "").unwrap();
            if let Some(requirements) = requirements {
                fs::write(dir.join("requirements.txt"), requirements).unwrap();
            }
        }

        fn camp(&self) -> Command {
            let mut cmd = cargo_bin_cmd!("camp");
            cmd.arg("--config")
                .arg(self.temp.path().join("global.toml"))
                .arg("--no-local")
                .arg("-C")
                .arg(self.root());
            cmd
        }
    }

    fn script(path: &Path, body: &str) {
        fs::write(path, body).unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn up_then_down() {
        let fx = Fixture::new();
        fx.package("pkg-a", Some("six==1.10\n"));
        fx.package("pkg-b", None);

        fx.camp()
            .arg("up")
            .assert()
            .success()
            .stdout(predicate::str::contains("pkg-a"));

        let root = fx.root();
        assert!(root.join("pkg-a/venv").is_dir());
        assert!(!root.join("pkg-b/venv").exists());
        let wheels: Vec<_> = fs::read_dir(root.join("wheelhouse")).unwrap().collect();
        assert_eq!(wheels.len(), 1);
        assert!(root.join("wheelhouse/six-1.10-py3-none-any.whl").is_file());

        fx.camp()
            .args(["show", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("six==1.10"));

        fx.camp().arg("down").assert().success();
        assert!(!root.join("pkg-a/venv").exists());
        assert!(!root.join("wheelhouse").exists());
        assert!(root.join("pkg-a/setup.py").is_file());
        assert!(root.join("pkg-b/setup.py").is_file());

        fx.camp().arg("down").assert().success();
    }

    #[test]
    fn shared_requirement_builds_once() {
        let fx = Fixture::new();
        fx.package("pkg-a", Some("six==1.10\nrequests==2.31\n"));
        fx.package("pkg-b", Some("# pinned\nsix==1.10\n"));

        fx.camp().arg("up").assert().success();

        let mut wheels: Vec<_> = fs::read_dir(fx.root().join("wheelhouse"))
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        wheels.sort();
        assert_eq!(
            wheels,
            vec!["requests-2.31-py3-none-any.whl", "six-1.10-py3-none-any.whl"]
        );
    }

    #[test]
    fn failed_wheel_fails_run_but_continues() {
        let fx = Fixture::new();
        fx.package("pkg-a", Some("broken==0.1\nsix==1.10\n"));

        fx.camp()
            .arg("up")
            .assert()
            .failure()
            .stdout(predicate::str::contains("No matching distribution"))
            .stdout(predicate::str::contains("steps failed"));

        assert!(fx
            .root()
            .join("wheelhouse/six-1.10-py3-none-any.whl")
            .is_file());
    }

    #[test]
    fn failure_output_stays_on_stdout() {
        let fx = Fixture::new();
        fx.package("pkg-a", Some("broken==0.1\n"));

        fx.camp()
            .arg("up")
            .assert()
            .failure()
            .stdout(predicate::str::contains("Failed to build wheel"))
            .stdout(predicate::str::contains(
                "ERROR: No matching distribution found for broken==0.1",
            ))
            .stdout(predicate::str::contains("Error:"))
            .stderr(predicate::str::is_empty());
    }

    #[test]
    fn fail_fast_stops_at_first_failure() {
        let fx = Fixture::new();
        fx.package("pkg-a", Some("broken==0.1\nsix==1.10\n"));

        fx.camp()
            .args(["up", "--fail-fast"])
            .assert()
            .failure()
            .stdout(predicate::str::contains("build wheel failed for broken==0.1"));

        assert!(!fx
            .root()
            .join("wheelhouse/six-1.10-py3-none-any.whl")
            .exists());
    }

    #[test]
    fn status_reports_tools() {
        let fx = Fixture::new();
        fx.package("pkg-a", Some("six==1.10\n"));

        fx.camp()
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("virtualenv 20.25.0"))
            .stdout(predicate::str::contains("Packages: 1"))
            .stdout(predicate::str::contains("Virtualenvs: 0/1"));
    }
}
