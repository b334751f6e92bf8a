//! Shared argument definitions.

use anyhow::Context;
use ucare::{Ucare, UcareConfig, WaitOptions};

use crate::util::parse_duration;

/// API connection overrides, applied on top of `UCARE_*` environment variables.
#[derive(clap::Args, Clone, Default)]
pub struct ConnectionArgs {
    /// REST API base URL
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// CDN base URL
    #[arg(long, global = true)]
    pub cdn_base: Option<String>,
}

impl ConnectionArgs {
    /// Build an authenticated client.
    pub fn client(&self) -> anyhow::Result<Ucare> {
        let config = UcareConfig::from_env().context("Uploadcare credentials are required")?;
        Ok(Ucare::new(self.apply(config)?)?)
    }

    /// Build a client for commands that never reach the API.
    pub fn offline_client(&self) -> anyhow::Result<Ucare> {
        let config = UcareConfig::from_env().unwrap_or_else(|_| UcareConfig::new("", ""));
        Ok(Ucare::new(self.apply(config)?)?)
    }

    fn apply(&self, mut config: UcareConfig) -> anyhow::Result<UcareConfig> {
        if let Some(api_base) = &self.api_base {
            config = config
                .with_api_base(api_base)
                .with_context(|| format!("invalid --api-base {api_base}"))?;
        }
        if let Some(cdn_base) = &self.cdn_base {
            config = config.with_cdn_base(cdn_base.as_str());
        }
        Ok(config)
    }
}

/// `--wait` / `--timeout` for commands that can block until the server catches up.
///
/// Can be embedded in other command Args using `#[command(flatten)]`.
#[derive(clap::Args, Clone)]
pub struct WaitArgs {
    /// Block until the change is visible
    #[arg(long)]
    pub wait: bool,

    /// How long to wait (e.g., "500ms", "5s", "1m")
    #[arg(long, default_value = "5s")]
    pub timeout: String,
}

impl WaitArgs {
    pub fn to_wait_options(&self) -> anyhow::Result<WaitOptions> {
        let timeout = parse_duration(&self.timeout)
            .with_context(|| format!("invalid --timeout {}", self.timeout))?;
        Ok(WaitOptions {
            wait: self.wait,
            timeout,
        })
    }
}
