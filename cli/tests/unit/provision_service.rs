//! Tests for the provisioning run: sequencing, failure mapping and cleanup.

#![allow(clippy::expect_used)]

use std::path::{Path, PathBuf};

use nanda_sdk::application::ports::ShellOutput;
use nanda_sdk::application::services::address::ADDRESS_ENDPOINTS;
use nanda_sdk::application::services::provision::{SetupOptions, SetupPorts, setup};
use nanda_sdk::domain::{ArtifactLayout, HostEnvironment};
use tempfile::TempDir;

use crate::mocks::{Level, MockCommandRunner, MockLookup, RecordingReporter, SandboxFs, host, request};

const RECAP_OK: &str = "PLAY RECAP *****\nserver : ok=12 changed=4 unreachable=0 failed=0\n";
const RECAP_FAILED: &str = "PLAY RECAP *****\nserver : ok=3 changed=1 unreachable=0 failed=1\n";

fn shared(dir: &TempDir) -> ArtifactLayout {
    ArtifactLayout::Shared {
        root: dir.path().to_path_buf(),
    }
}

fn assert_clean(layout: &ArtifactLayout) {
    for path in [
        layout.inventory_path(),
        layout.variables_path(),
        layout.variables_dir(),
    ] {
        assert!(!path.exists(), "left behind: {}", path.display());
    }
    if let Some(run_dir) = layout.run_dir() {
        assert!(!run_dir.exists(), "left behind: {}", run_dir.display());
    }
}

async fn run(
    runner: &MockCommandRunner,
    lookup: &MockLookup,
    fs: &SandboxFs,
    reporter: &RecordingReporter,
    layout: &ArtifactLayout,
    host: &HostEnvironment,
    verbose: bool,
) -> bool {
    let ports = SetupPorts {
        runner,
        lookup,
        fs,
        reporter,
    };
    let opts = SetupOptions {
        layout,
        playbook: Path::new("/opt/nanda/ansible/playbook.yml"),
        host,
        verbose,
    };
    setup(&ports, &request(), &opts).await
}

#[tokio::test]
async fn test_setup_success_runs_playbook_against_written_inventory() {
    let dir = TempDir::new().expect("tempdir");
    let layout = shared(&dir);
    let mut runner = MockCommandRunner::on_path(RECAP_OK);
    runner.watch = Some(layout.inventory_path());
    let lookup = MockLookup::answering(ADDRESS_ENDPOINTS[0], "203.0.113.7\n");
    let reporter = RecordingReporter::default();

    let ok = run(&runner, &lookup, &SandboxFs::default(), &reporter, &layout, &host(), false).await;

    assert!(ok);
    let shell = runner.shell_calls();
    assert_eq!(shell.len(), 1);
    assert!(
        shell[0].starts_with("/usr/bin/ansible-playbook -i "),
        "got: {}",
        shell[0]
    );
    assert!(shell[0].ends_with(" /opt/nanda/ansible/playbook.yml"));

    let inventory = runner
        .watched
        .lock()
        .expect("lock")
        .clone()
        .expect("inventory present during the run");
    assert!(inventory.contains("server ansible_host=203.0.113.7\n"));
    assert!(inventory.contains("ansible_user=tester\n"));
    assert!(inventory.contains("domain_name=x.example.com\n"));

    assert!(reporter.has(Level::Info, "Successfully detected public IP: 203.0.113.7"));
    assert!(reporter.has(Level::Info, "Ansible playbook output: PLAY RECAP"));
    assert!(reporter.has(Level::Success, "Server setup completed successfully"));
    assert_clean(&layout);
}

#[tokio::test]
async fn test_setup_failed_recap_returns_false_and_cleans_up() {
    let dir = TempDir::new().expect("tempdir");
    let layout = shared(&dir);
    let runner = MockCommandRunner::on_path(RECAP_FAILED);
    let lookup = MockLookup::answering(ADDRESS_ENDPOINTS[0], "203.0.113.7");
    let reporter = RecordingReporter::default();

    let ok = run(&runner, &lookup, &SandboxFs::default(), &reporter, &layout, &host(), false).await;

    assert!(!ok);
    assert!(reporter.has(Level::Error, "Failed to setup server: Ansible playbook failed"));
    assert_clean(&layout);
}

#[tokio::test]
async fn test_setup_stderr_output_is_failure() {
    let dir = TempDir::new().expect("tempdir");
    let layout = shared(&dir);
    let mut runner = MockCommandRunner::on_path(RECAP_OK);
    runner.shell.stderr = "[WARNING]: something odd\n".into();
    let lookup = MockLookup::answering(ADDRESS_ENDPOINTS[0], "203.0.113.7");
    let reporter = RecordingReporter::default();

    let ok = run(&runner, &lookup, &SandboxFs::default(), &reporter, &layout, &host(), false).await;

    assert!(!ok);
    assert!(reporter.has(Level::Error, "something odd"));
    assert_clean(&layout);
}

#[tokio::test]
async fn test_setup_tool_not_found_never_runs_playbook() {
    let dir = TempDir::new().expect("tempdir");
    let layout = shared(&dir);
    let runner = MockCommandRunner::without_ansible();
    let lookup = MockLookup::answering(ADDRESS_ENDPOINTS[0], "203.0.113.7");
    let reporter = RecordingReporter::default();

    let ok = run(&runner, &lookup, &SandboxFs::default(), &reporter, &layout, &host(), false).await;

    assert!(!ok);
    assert!(runner.shell_calls().is_empty());
    assert_eq!(
        runner.calls(),
        vec!["which ansible-playbook", "python3 -c import ansible"]
    );
    assert!(reporter.has(Level::Error, "ansible-playbook not found"));
    assert_clean(&layout);
}

#[tokio::test]
async fn test_setup_all_lookups_fail_writes_nothing() {
    let dir = TempDir::new().expect("tempdir");
    let layout = shared(&dir);
    let runner = MockCommandRunner::on_path(RECAP_OK);
    let lookup = MockLookup::failing();
    let reporter = RecordingReporter::default();

    let ok = run(&runner, &lookup, &SandboxFs::default(), &reporter, &layout, &host(), false).await;

    assert!(!ok);
    assert_eq!(lookup.fetched(), ADDRESS_ENDPOINTS);
    assert!(runner.calls().is_empty());
    assert!(runner.shell_calls().is_empty());
    assert_eq!(
        std::fs::read_dir(dir.path()).expect("read_dir").count(),
        0,
        "nothing should be written"
    );
}

#[tokio::test]
async fn test_setup_spawn_failure_is_reported() {
    let dir = TempDir::new().expect("tempdir");
    let layout = shared(&dir);
    let mut runner = MockCommandRunner::on_path("");
    runner.shell = ShellOutput::spawn_failed("sh: not found");
    let lookup = MockLookup::answering(ADDRESS_ENDPOINTS[0], "203.0.113.7");
    let reporter = RecordingReporter::default();

    let ok = run(&runner, &lookup, &SandboxFs::default(), &reporter, &layout, &host(), false).await;

    assert!(!ok);
    assert!(reporter.has(Level::Error, "Failed to execute command: sh: not found"));
    assert_clean(&layout);
}

#[tokio::test]
async fn test_setup_without_user_fails_before_writing() {
    let dir = TempDir::new().expect("tempdir");
    let layout = shared(&dir);
    let runner = MockCommandRunner::on_path(RECAP_OK);
    let lookup = MockLookup::answering(ADDRESS_ENDPOINTS[0], "203.0.113.7");
    let reporter = RecordingReporter::default();
    let anonymous = HostEnvironment {
        user: None,
        ..host()
    };

    let ok = run(&runner, &lookup, &SandboxFs::default(), &reporter, &layout, &anonymous, false).await;

    assert!(!ok);
    assert!(runner.shell_calls().is_empty());
    assert!(!layout.inventory_path().exists());
}

#[tokio::test]
async fn test_setup_unwritable_variables_cleans_inventory() {
    let dir = TempDir::new().expect("tempdir");
    let layout = shared(&dir);
    let runner = MockCommandRunner::on_path(RECAP_OK);
    let lookup = MockLookup::answering(ADDRESS_ENDPOINTS[0], "203.0.113.7");
    let reporter = RecordingReporter::default();
    let fs = SandboxFs {
        read_only: vec![layout.variables_path()],
        ..SandboxFs::default()
    };

    let ok = run(&runner, &lookup, &fs, &reporter, &layout, &host(), false).await;

    assert!(!ok);
    assert!(runner.shell_calls().is_empty());
    assert!(reporter.has(Level::Error, "Failed to write"));
    assert_clean(&layout);
}

#[tokio::test]
async fn test_setup_per_run_layout_removes_run_dir() {
    let dir = TempDir::new().expect("tempdir");
    let layout = ArtifactLayout::PerRun {
        root: dir.path().to_path_buf(),
        token: "0123456789abcdef".into(),
    };
    let mut runner = MockCommandRunner::on_path(RECAP_OK);
    runner.watch = Some(layout.variables_path());
    let lookup = MockLookup::answering(ADDRESS_ENDPOINTS[0], "203.0.113.7");
    let reporter = RecordingReporter::default();

    let ok = run(&runner, &lookup, &SandboxFs::default(), &reporter, &layout, &host(), false).await;

    assert!(ok);
    let vars = runner.watched.lock().expect("lock").clone().expect("vars present");
    assert!(vars.contains("num_agents: 2"));
    assert!(layout.inventory_path().starts_with(dir.path().join("nanda-run-0123456789abcdef")));
    assert_clean(&layout);
}

#[tokio::test]
async fn test_setup_verbose_appends_flag() {
    let dir = TempDir::new().expect("tempdir");
    let layout = shared(&dir);
    let runner = MockCommandRunner::on_path(RECAP_OK);
    let lookup = MockLookup::answering(ADDRESS_ENDPOINTS[0], "203.0.113.7");
    let reporter = RecordingReporter::default();

    let ok = run(&runner, &lookup, &SandboxFs::default(), &reporter, &layout, &host(), true).await;

    assert!(ok);
    assert!(runner.shell_calls()[0].ends_with(" -vvv"));
}

#[tokio::test]
async fn test_setup_prefers_candidate_path_over_which() {
    let dir = TempDir::new().expect("tempdir");
    let layout = shared(&dir);
    let runner = MockCommandRunner::on_path(RECAP_OK);
    let lookup = MockLookup::answering(ADDRESS_ENDPOINTS[0], "203.0.113.7");
    let reporter = RecordingReporter::default();
    let venv_tool = PathBuf::from("/venv/bin/ansible-playbook");
    let fs = SandboxFs {
        executables: vec![venv_tool],
        ..SandboxFs::default()
    };
    let venv_host = HostEnvironment {
        runtime_prefix: Some(PathBuf::from("/venv")),
        ..host()
    };

    let ok = run(&runner, &lookup, &fs, &reporter, &layout, &venv_host, false).await;

    assert!(ok);
    assert!(runner.calls().is_empty(), "no probing once a candidate matches");
    assert!(runner.shell_calls()[0].starts_with("/venv/bin/ansible-playbook -i "));
}
