use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test harness for running CLI commands with temporary databases
pub struct CliTestHarness {
    _temp_dir: TempDir,
    db_path: PathBuf,
}

impl CliTestHarness {
    /// Create a new test harness with a temporary database
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");

        Self {
            _temp_dir: temp_dir,
            db_path,
        }
    }

    /// Get a Command instance configured for testing
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("daily3").expect("Failed to find daily3 binary");

        // Point the binary at this harness's database; leave the completion
        // API unconfigured so AI commands fail fast instead of calling out.
        cmd.env("DAILY3_DATABASE_PATH", &self.db_path);
        cmd.env_remove("GEMINI_API_KEY");
        cmd.env_remove("DAILY3_GEMINI_API_KEY");

        cmd
    }

    /// Helper to run a command and assert success
    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    /// Helper to run a command and assert failure
    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }

    /// Run `add` with the given args and return the created task's short id,
    /// parsed from the confirmation line.
    pub fn add_task(&self, args: &[&str]) -> String {
        let mut full = vec!["add"];
        full.extend_from_slice(args);
        let assert = self.run_success(&full);
        let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
        let open = stdout.find('(').expect("no short id in add output");
        let close = stdout[open..].find(')').expect("unterminated short id") + open;
        stdout[open + 1..close].to_string()
    }
}
