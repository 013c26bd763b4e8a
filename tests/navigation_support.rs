use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

pub struct CliOutput {
    pub stdout: String,
    #[allow(dead_code)]
    pub stderr: String,
}

pub struct NavigationTestHarness {
    home: TempDir,
}

impl NavigationTestHarness {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn home(&self) -> &Path {
        self.home.path()
    }

    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("tasting_core_cli").expect("binary exists");
        cmd.env("TASTING_CORE_HOME", self.home())
            .env("NO_COLOR", "1")
            .env_remove("TASTING_CORE_CLI_SCRIPT")
            .env_remove("TASTING_TEST_MENU_EVENTS")
            .env_remove("TASTING_TEST_TEXT_INPUTS");
        cmd
    }

    #[allow(dead_code)]
    pub fn run_interactive(&self, menu_sequences: &[&str], text_inputs: &[&str]) -> CliOutput {
        assert!(
            !menu_sequences.is_empty(),
            "provide at least one menu sequence"
        );
        let mut cmd = self.command();
        cmd.env("TASTING_TEST_MENU_EVENTS", join_sequences(menu_sequences));
        if !text_inputs.is_empty() {
            cmd.env("TASTING_TEST_TEXT_INPUTS", join_sequences(text_inputs));
        }
        let output = cmd.output().expect("run interactive CLI");
        if !output.status.success() {
            panic!(
                "interactive CLI failed: status={}\nstdout:\n{}\nstderr:\n{}",
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        CliOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    #[allow(dead_code)]
    pub fn run_script(&self, script: &str) -> CliOutput {
        let mut cmd = self.command();
        cmd.env("TASTING_CORE_CLI_SCRIPT", "1")
            .write_stdin(script.to_string());
        let output = cmd.output().expect("run script CLI");
        if !output.status.success() {
            panic!(
                "script CLI failed: status={}\nstdout:\n{}\nstderr:\n{}",
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        CliOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Raw JSON of one category's document file.
    #[allow(dead_code)]
    pub fn collection(&self, file: &str) -> serde_json::Value {
        let raw = std::fs::read_to_string(self.home().join(file)).expect("read collection");
        serde_json::from_str(&raw).expect("collection is valid json")
    }
}

#[allow(dead_code)]
fn join_sequences(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("|")
}
