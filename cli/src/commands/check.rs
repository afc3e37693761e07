//! `--check-install` and `--check-ansible` diagnostics.

use std::path::{Path, PathBuf};

use crate::app::AppContext;
use crate::application::ports::{CommandRunner, LocalFs};
use crate::application::services::locator::locate_playbook;
use crate::domain::HostEnvironment;
use crate::infra::fs::LocalFs as HostFs;
use crate::output::OutputContext;

/// Name of the installed binary.
pub const BINARY_NAME: &str = "nanda-sdk";

/// Where the SDK binary was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallStatus {
    /// Resolvable through `PATH`.
    OnPath(PathBuf),
    /// Installed, but its directory is not on `PATH`.
    OffPath(PathBuf),
    Missing,
}

/// Work out whether `binary` is installed and reachable.
pub async fn install_status(
    runner: &impl CommandRunner,
    fs: &impl LocalFs,
    host: &HostEnvironment,
    binary: &str,
) -> InstallStatus {
    if let Ok(output) = runner.run("which", &[binary]).await {
        let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if output.status.success() && !path.is_empty() {
            return InstallStatus::OnPath(PathBuf::from(path));
        }
    }
    host.sdk_install_candidates(binary)
        .into_iter()
        .find(|path| fs.exists(path))
        .map_or(InstallStatus::Missing, InstallStatus::OffPath)
}

/// Report installation status and PATH fixes.
pub async fn check_install(app: &AppContext) {
    let ctx = &app.output;
    ctx.header("Installation");
    match install_status(&app.runner, &HostFs, &app.host, BINARY_NAME).await {
        InstallStatus::OnPath(path) => {
            ctx.success(&format!("{BINARY_NAME} is installed and in PATH"));
            ctx.kv("Location", &path.display().to_string());
        }
        InstallStatus::OffPath(path) => {
            ctx.warn(&format!("{BINARY_NAME} is installed but not in PATH"));
            print_path_fix(ctx, &path);
        }
        InstallStatus::Missing => {
            ctx.error(&format!("{BINARY_NAME} is not installed"));
            ctx.info(&format!("Install it with: cargo install {BINARY_NAME}"));
        }
    }
}

fn print_path_fix(ctx: &OutputContext, binary: &Path) {
    if ctx.quiet {
        return;
    }
    let dir = binary.parent().unwrap_or(binary).display();
    ctx.kv("Found at", &binary.display().to_string());
    ctx.info("Add it to PATH for this shell:");
    println!("    export PATH=\"{dir}:$PATH\"");
    ctx.info("Or permanently:");
    println!("    echo 'export PATH=\"{dir}:$PATH\"' >> ~/.bashrc");
    println!("    source ~/.bashrc");
}

/// Report where `ansible-playbook` would be taken from.
pub async fn check_ansible(app: &AppContext) {
    let ctx = &app.output;
    ctx.header("Ansible");
    match locate_playbook(&app.runner, &HostFs, &app.host).await {
        Some(tool) => {
            ctx.success("ansible-playbook is available");
            ctx.kv("Using", &tool.to_string());
        }
        None => {
            ctx.error("ansible-playbook not found");
            ctx.info("Install it with: pip install ansible");
        }
    }
}
