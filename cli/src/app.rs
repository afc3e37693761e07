//! Application context: unified state passed to every command handler.
//!
//! `AppContext` bundles the output context, the loaded configuration, the
//! detected host environment and the production command runner so command
//! handlers take a single `&AppContext`.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::{HostEnvironment, SdkConfig};
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::output::OutputContext;

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Settings from `~/.nanda/config.yaml` (defaults when absent).
    pub config: SdkConfig,
    /// Snapshot of the invoking environment.
    pub host: HostEnvironment,
    /// Production process runner.
    pub runner: TokioCommandRunner,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be parsed.
    pub fn new(flags: &OutputFlags) -> Result<Self> {
        Ok(Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            config: YamlConfigStore.load()?,
            host: crate::infra::host::detect(),
            runner: TokioCommandRunner::default(),
        })
    }
}
