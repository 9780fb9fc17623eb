//! Application context — unified state passed to every command handler.
//!
//! `AppContext` resolves the endpoint once (flags and env over config file)
//! and hands out infrastructure clients. Adding a new cross-cutting concern
//! (e.g. `--verbose`, telemetry) requires only one field change here — zero
//! command signatures change.

use anyhow::Result;

use crate::application::poll::PollSchedule;
use crate::application::ports::{ConfigStore, Endpoint};
use crate::cli::ConnectionArgs;
use crate::domain::config::VcopsConfig;
use crate::infra::cis::CisClient;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::infra::govc::GovcClient;
use crate::output::OutputContext;

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Enable JSON output mode.
    pub json: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Skip interactive prompts (also set by `CI` / `VCOPS_YES` env vars).
    pub yes: bool,
    /// Endpoint connection flags.
    pub connection: ConnectionArgs,
}

/// Unified application context passed to every command handler.
///
/// Constructed once in `Cli::run()` and passed as `&AppContext` to all
/// command handlers.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Config persistence.
    pub config_store: YamlConfigStore,
    /// Config loaded at startup (defaults when no file exists).
    pub config: VcopsConfig,
    /// When `true`, skip interactive prompts and use defaults.
    ///
    /// Set when `--yes` / `-y` is passed, or when the `CI` or `VCOPS_YES`
    /// environment variables are present.
    pub non_interactive: bool,
    connection: ConnectionArgs,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let ci_env = std::env::var("CI").is_ok() || std::env::var("VCOPS_YES").is_ok();
        let non_interactive = flags.yes || ci_env;

        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        let config_store = YamlConfigStore;
        let config = config_store.load()?;

        Ok(Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            mode,
            config_store,
            config,
            non_interactive,
            connection: ConnectionArgs {
                server: flags.connection.server.clone(),
                username: flags.connection.username.clone(),
                password: flags.connection.password.clone(),
                insecure: flags.connection.insecure,
                datacenter: flags.connection.datacenter.clone(),
            },
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Resolve the endpoint from flags/env, falling back to the config
    /// file. The password never comes from the config file.
    ///
    /// # Errors
    ///
    /// Returns an error naming the missing setting and how to supply it.
    pub fn endpoint(&self) -> Result<Endpoint> {
        let url = self
            .connection
            .server
            .clone()
            .or_else(|| self.config.connection.server.clone())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "no endpoint configured. Pass --server, set VCOPS_SERVER, \
                     or run: vcops config set connection.server <url>"
                )
            })?;
        let username = self
            .connection
            .username
            .clone()
            .or_else(|| self.config.connection.username.clone())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "no username configured. Pass --username, set VCOPS_USERNAME, \
                     or run: vcops config set connection.username <name>"
                )
            })?;
        let password = self.connection.password.clone().ok_or_else(|| {
            anyhow::anyhow!("no password supplied. Pass --password or set VCOPS_PASSWORD")
        })?;
        Ok(Endpoint {
            url,
            username,
            password,
            insecure: self.connection.insecure || self.config.connection.insecure,
            datacenter: self
                .connection
                .datacenter
                .clone()
                .or_else(|| self.config.connection.datacenter.clone()),
        })
    }

    /// A govc client bound to the resolved endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint cannot be resolved.
    pub fn govc(&self) -> Result<GovcClient<TokioCommandRunner>> {
        Ok(GovcClient::new(TokioCommandRunner::default(), self.endpoint()?))
    }

    /// A CIS appliance API client bound to the resolved endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint cannot be resolved or the HTTP
    /// client cannot be built.
    pub fn cis(&self) -> Result<CisClient> {
        CisClient::new(&self.endpoint()?)
    }

    /// Poll tuning: per-command flags win over the config file.
    #[must_use]
    pub fn poll_schedule(&self, interval: Option<u64>, timeout: Option<u64>) -> PollSchedule {
        PollSchedule::from_secs(
            interval.unwrap_or(self.config.poll.interval_secs),
            timeout.unwrap_or(self.config.poll.timeout_secs),
        )
    }

    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is `true` (CI, `--yes` flag, or `VCOPS_YES`
    /// env), returns `default` immediately without prompting.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}
