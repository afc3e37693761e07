//! Default command: provision this host.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::provision::{self, SetupOptions, SetupPorts};
use crate::domain::request::DEFAULT_REGISTRY_URL;
use crate::domain::{HostEnvironment, ProvisioningRequest, SdkConfig};
use crate::infra::fs::LocalFs;
use crate::infra::network::UreqAddressLookup;
use crate::output::TerminalReporter;

/// Smithery key used when none is supplied.
pub const DEFAULT_SMITHERY_KEY: &str = "b4e92d35-0034-43f0-beff-042466777ada";

/// Flags that are meaningless for the diagnostic checks.
const DIAGNOSTICS: [&str; 2] = ["check_install", "check_ansible"];

#[derive(Args)]
pub struct SetupArgs {
    /// Anthropic API key for the agent
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true, required_unless_present_any = DIAGNOSTICS)]
    pub anthropic_key: Option<String>,

    /// Complete domain name (e.g., myapp.example.com)
    #[arg(long, required_unless_present_any = DIAGNOSTICS)]
    pub domain: Option<String>,

    /// Optional Smithery API key for the MCP connections
    #[arg(long, env = "SMITHERY_API_KEY", hide_env_values = true)]
    pub smithery_key: Option<String>,

    /// Optional agent ID (if not provided, will generate one)
    #[arg(long)]
    pub agent_id: Option<u32>,

    /// Number of agents to set up
    #[arg(long, default_value_t = 1)]
    pub num_agents: u32,

    /// Enable verbose output for Ansible playbook
    #[arg(long)]
    pub verbose: bool,

    /// URL of the NANDA registry [default: https://chat.nanda-registry.com]
    #[arg(long)]
    pub registry_url: Option<String>,

    /// Playbook to run [default: ansible/playbook.yml next to this binary]
    #[arg(long, env = "NANDA_PLAYBOOK")]
    pub playbook: Option<PathBuf>,

    /// Write artifacts to a fresh per-run directory instead of the shared /tmp paths
    #[arg(long)]
    pub per_run_artifacts: bool,
}

/// Build the request, run the provisioning sequence and report the result.
///
/// # Errors
///
/// Returns an error if the request parameters are invalid. Provisioning
/// failures are reported through the exit code instead.
pub async fn run(app: &AppContext, args: SetupArgs) -> Result<ExitCode> {
    let ctx = &app.output;
    let request = build_request(&args, &app.config)?;
    ctx.info(&format!("Using agent ID: {}", request.agent_id()));
    ctx.info(&format!("Using domain: {}", request.domain()));
    ctx.info(&format!("Using num_agents: {}", request.num_agents()));
    ctx.info(&format!("Using registry URL: {}", request.registry_url()));

    let playbook = resolve_playbook(args.playbook, &app.config, &app.host);
    if !playbook.exists() {
        ctx.warn(&format!("Playbook not found at {}", playbook.display()));
    }
    let layout = app.config.artifacts.layout(args.per_run_artifacts);

    let reporter = TerminalReporter::new(ctx);
    let ports = SetupPorts {
        runner: &app.runner,
        lookup: &UreqAddressLookup,
        fs: &LocalFs,
        reporter: &reporter,
    };
    let opts = SetupOptions {
        layout: &layout,
        playbook: &playbook,
        host: &app.host,
        verbose: args.verbose,
    };

    if provision::setup(&ports, &request, &opts).await {
        ctx.success("Setup completed successfully");
        Ok(ExitCode::SUCCESS)
    } else {
        ctx.error("Setup failed");
        Ok(ExitCode::FAILURE)
    }
}

/// Merge CLI arguments with configuration defaults into a request.
///
/// # Errors
///
/// Returns an error if a required value is missing or invalid.
pub fn build_request(args: &SetupArgs, config: &SdkConfig) -> Result<ProvisioningRequest> {
    let registry_url = args
        .registry_url
        .as_deref()
        .or(config.registry_url.as_deref())
        .unwrap_or(DEFAULT_REGISTRY_URL);
    ProvisioningRequest::new(
        args.domain.as_deref().unwrap_or_default(),
        args.num_agents,
        registry_url,
        args.agent_id,
        args.anthropic_key.as_deref().unwrap_or_default(),
        args.smithery_key.as_deref().unwrap_or(DEFAULT_SMITHERY_KEY),
    )
}

/// Flag/env, then config file, then `ansible/playbook.yml` beside the binary.
#[must_use]
pub fn resolve_playbook(
    flag: Option<PathBuf>,
    config: &SdkConfig,
    host: &HostEnvironment,
) -> PathBuf {
    flag.or_else(|| config.playbook.clone()).unwrap_or_else(|| {
        host.exe_dir
            .clone()
            .unwrap_or_default()
            .join("ansible")
            .join("playbook.yml")
    })
}
