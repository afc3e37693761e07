//! Tests for locating `ansible-playbook`.

#![allow(clippy::expect_used)]

use std::path::PathBuf;

use nanda_sdk::application::services::locator::locate_playbook;
use nanda_sdk::domain::{HostEnvironment, ToolInvocation};

use crate::mocks::{MockCommandRunner, SandboxFs, host};

#[tokio::test]
async fn test_first_executable_candidate_wins() {
    let runner = MockCommandRunner::on_path("");
    let env = HostEnvironment {
        exe_dir: Some(PathBuf::from("/opt/nanda/bin")),
        home: Some(PathBuf::from("/home/tester")),
        ..host()
    };
    let fs = SandboxFs {
        executables: vec![
            PathBuf::from("/home/tester/.local/bin/ansible-playbook"),
            PathBuf::from("/usr/bin/ansible-playbook"),
        ],
        ..SandboxFs::default()
    };

    let found = locate_playbook(&runner, &fs, &env).await;

    assert_eq!(
        found,
        Some(ToolInvocation::Executable(PathBuf::from(
            "/home/tester/.local/bin/ansible-playbook"
        )))
    );
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn test_falls_back_to_path_lookup() {
    let mut runner = MockCommandRunner::on_path("");
    runner.which = Some("/usr/local/pyenv/shims/ansible-playbook\n".into());

    let found = locate_playbook(&runner, &SandboxFs::default(), &host()).await;

    assert_eq!(
        found,
        Some(ToolInvocation::Executable(PathBuf::from(
            "/usr/local/pyenv/shims/ansible-playbook"
        )))
    );
    assert_eq!(runner.calls(), vec!["which ansible-playbook"]);
}

#[tokio::test]
async fn test_falls_back_to_python_module() {
    let mut runner = MockCommandRunner::without_ansible();
    runner.python_has_ansible = true;

    let found = locate_playbook(&runner, &SandboxFs::default(), &host()).await;

    assert_eq!(
        found,
        Some(ToolInvocation::PythonModule {
            interpreter: PathBuf::from("python3")
        })
    );
    assert_eq!(
        found.expect("found").to_string(),
        "python3 -m ansible.playbook"
    );
}

#[tokio::test]
async fn test_not_found_is_none() {
    let runner = MockCommandRunner::without_ansible();

    let found = locate_playbook(&runner, &SandboxFs::default(), &host()).await;

    assert_eq!(found, None);
    assert_eq!(runner.calls().len(), 2);
}

#[tokio::test]
async fn test_blank_which_output_is_ignored() {
    let mut runner = MockCommandRunner::without_ansible();
    runner.which = Some("\n".into());

    let found = locate_playbook(&runner, &SandboxFs::default(), &host()).await;

    assert_eq!(found, None);
}
