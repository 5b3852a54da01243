//! Test support utilities for opsync integration tests.
//!
//! Provides an isolated environment with fake `op` and `kubectl` programs.

#![allow(dead_code)]

pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Each test gets its own project dir and home dir. Child processes use
/// `.current_dir()` so tests can run in parallel.
pub struct Test {
    /// Temporary directory for the test project
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        Self { dir, home }
    }

    /// Environment with fake `op`/`kubectl` programs and a config pointing at them.
    ///
    /// The vault starts empty.
    #[cfg(unix)]
    pub fn with_fake_op() -> Self {
        let t = Self::new();

        fs::create_dir_all(t.state_dir()).expect("failed to create op state dir");
        t.install_script("fake-op", FAKE_OP);
        t.install_script("fake-kubectl", FAKE_KUBECTL);

        t.write_state("accounts.json", ACCOUNTS_JSON);
        t.write_state("vaults.json", VAULTS_JSON);
        t.write_state("items.json", "[]");
        t.write_state("item.json", ITEM_JSON);
        t.write_state("secret.json", K8S_SECRET_JSON);

        t.write(
            ".opsync.toml",
            &format!(
                "[op]\naccount = \"{}\"\nvault = \"{}\"\nprogram = '{}'\n\n[kubectl]\nprogram = '{}'\n",
                ACCOUNT,
                VAULT,
                t.path("fake-op").display(),
                t.path("fake-kubectl").display()
            ),
        );
        t
    }

    /// Absolute path inside the project dir.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Directory the fake programs read replies from and log calls to.
    pub fn state_dir(&self) -> PathBuf {
        self.path("op-state")
    }

    /// Write a file in the project dir.
    pub fn write(&self, rel: &str, contents: &str) {
        fs::write(self.path(rel), contents).expect("failed to write file");
    }

    /// Read a file from the project dir.
    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel)).expect("failed to read file")
    }

    /// Write a canned reply (or trigger file) for the fake programs.
    pub fn write_state(&self, name: &str, contents: &str) {
        fs::write(self.state_dir().join(name), contents).expect("failed to write op state");
    }

    /// Read something the fake programs recorded, if present.
    pub fn read_state(&self, name: &str) -> Option<String> {
        fs::read_to_string(self.state_dir().join(name)).ok()
    }

    /// Argument lines of every fake `op` invocation, in order.
    pub fn op_calls(&self) -> Vec<String> {
        self.read_state("calls.log")
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// `op` verbs invoked (`item list`, `item create`, ...), in order.
    pub fn op_verbs(&self) -> Vec<String> {
        self.op_calls()
            .iter()
            .map(|line| line.split_whitespace().take(2).collect::<Vec<_>>().join(" "))
            .collect()
    }

    /// Make the vault hold one item named `prod-db`.
    pub fn seed_existing_item(&self) {
        self.write_state("items.json", ONE_ITEM_LIST);
        self.write_state("get.json", ITEM_JSON);
    }

    #[cfg(unix)]
    fn install_script(&self, name: &str, body: &str) {
        use std::os::unix::fs::PermissionsExt;

        let path = self.path(name);
        fs::write(&path, body).expect("failed to write script");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("failed to chmod script");
    }
}
