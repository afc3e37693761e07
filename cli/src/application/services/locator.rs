//! Application service: locate a runnable `ansible-playbook`.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! Nothing is cached: the install can change between runs, so every call
//! probes again.

use std::path::PathBuf;

use crate::application::ports::{CommandRunner, LocalFs};
use crate::domain::HostEnvironment;
use crate::domain::playbook::{ANSIBLE_PACKAGE, PLAYBOOK_TOOL, ToolInvocation};

/// One way of finding the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocateStrategy {
    /// Known install locations, checked for an executable file.
    CandidatePaths,
    /// `which ansible-playbook`.
    PathLookup,
    /// `python -c "import ansible"`, then run the module through python.
    PythonModule,
}

/// Strategies in priority order. The first one that yields a result wins.
pub const LOCATE_ORDER: [LocateStrategy; 3] = [
    LocateStrategy::CandidatePaths,
    LocateStrategy::PathLookup,
    LocateStrategy::PythonModule,
];

/// Find `ansible-playbook`, or `None` if no strategy succeeds.
///
/// "Not found" is an ordinary outcome, not an error.
pub async fn locate_playbook(
    runner: &impl CommandRunner,
    fs: &impl LocalFs,
    host: &HostEnvironment,
) -> Option<ToolInvocation> {
    for strategy in LOCATE_ORDER {
        if let Some(found) = probe(strategy, runner, fs, host).await {
            return Some(found);
        }
    }
    None
}

async fn probe(
    strategy: LocateStrategy,
    runner: &impl CommandRunner,
    fs: &impl LocalFs,
    host: &HostEnvironment,
) -> Option<ToolInvocation> {
    match strategy {
        LocateStrategy::CandidatePaths => host
            .playbook_candidates()
            .into_iter()
            .find(|path| fs.is_executable(path))
            .map(ToolInvocation::Executable),
        LocateStrategy::PathLookup => {
            let output = runner.run("which", &[PLAYBOOK_TOOL]).await.ok()?;
            if !output.status.success() {
                return None;
            }
            let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
            (!path.is_empty()).then(|| ToolInvocation::Executable(PathBuf::from(path)))
        }
        LocateStrategy::PythonModule => {
            let python = host.python.to_string_lossy();
            let import = format!("import {ANSIBLE_PACKAGE}");
            let output = runner.run(&python, &["-c", &import]).await.ok()?;
            output.status.success().then(|| ToolInvocation::PythonModule {
                interpreter: host.python.clone(),
            })
        }
    }
}
