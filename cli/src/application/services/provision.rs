//! Application service: the provisioning run.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::path::Path;

use crate::application::ports::{AddressLookup, CommandRunner, LocalFs, Reporter};
use crate::application::services::address::resolve_public_address;
use crate::application::services::artifacts::{ArtifactGuard, ArtifactWriter};
use crate::application::services::locator::locate_playbook;
use crate::domain::playbook::{build_command_line, interpret};
use crate::domain::{ArtifactLayout, HostEnvironment, ProvisionError, ProvisioningRequest};

/// Ports a provisioning run talks to.
pub struct SetupPorts<'a, C, L, F, R>
where
    C: CommandRunner,
    L: AddressLookup,
    F: LocalFs,
    R: Reporter,
{
    pub runner: &'a C,
    pub lookup: &'a L,
    pub fs: &'a F,
    pub reporter: &'a R,
}

/// Per-run settings resolved by the caller.
pub struct SetupOptions<'a> {
    pub layout: &'a ArtifactLayout,
    pub playbook: &'a Path,
    pub host: &'a HostEnvironment,
    pub verbose: bool,
}

/// Provision this host for `request`.
///
/// Returns `true` only if the playbook ran cleanly. Every failure is
/// reported through the reporter and turned into `false`; generated
/// artifacts are removed before this returns, whatever the outcome.
pub async fn setup<C, L, F, R>(
    ports: &SetupPorts<'_, C, L, F, R>,
    request: &ProvisioningRequest,
    opts: &SetupOptions<'_>,
) -> bool
where
    C: CommandRunner,
    L: AddressLookup,
    F: LocalFs,
    R: Reporter,
{
    let reporter = ports.reporter;
    let outcome = {
        let _cleanup = ArtifactGuard::new(ports.fs, reporter, opts.layout);
        run_playbook(ports, request, opts).await
    };
    match outcome {
        Ok(()) => {
            reporter.success("Server setup completed successfully");
            true
        }
        Err(e) => {
            reporter.error(&format!("Failed to setup server: {e}"));
            false
        }
    }
}

async fn run_playbook<C, L, F, R>(
    ports: &SetupPorts<'_, C, L, F, R>,
    request: &ProvisioningRequest,
    opts: &SetupOptions<'_>,
) -> Result<(), ProvisionError>
where
    C: CommandRunner,
    L: AddressLookup,
    F: LocalFs,
    R: Reporter,
{
    let reporter = ports.reporter;
    let writer = ArtifactWriter::new(ports.fs, opts.layout);

    reporter.step("detecting public IP...");
    let address = resolve_public_address(ports.lookup, reporter).await?;
    let user = opts.host.user.as_deref().ok_or_else(|| {
        ProvisionError::artifact_write("inventory", "cannot determine the current user")
    })?;
    let inventory = writer.write_inventory(request, &address, user)?;
    reporter.info(&format!("Created inventory file at {}", inventory.display()));

    let (vars_dir, _vars_file) = writer.write_variables(request)?;
    reporter.info(&format!("Created group_vars directory at {}", vars_dir.display()));

    reporter.info(&format!("Using playbook at: {}", opts.playbook.display()));
    let tool = locate_playbook(ports.runner, ports.fs, opts.host)
        .await
        .ok_or(ProvisionError::ToolNotFound)?;
    reporter.info(&format!("Using ansible-playbook at: {tool}"));

    let command = build_command_line(&tool, &inventory, opts.playbook, opts.verbose);
    reporter.info(&format!("Running command: {command}"));
    reporter.step("running ansible playbook...");
    let output = ports.runner.run_shell(&command).await;
    if let Some(err) = output.spawn_error {
        return Err(ProvisionError::ProcessSpawnFailed(err));
    }

    if !output.stdout.is_empty() {
        reporter.info(&format!("Ansible playbook output: {}", output.stdout));
    }
    interpret(&output.stdout, &output.stderr)
}
