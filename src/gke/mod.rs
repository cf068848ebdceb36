//! The `install gke` subcommand.
//!
//! Declares the GKE flag set, validates it, and hands a [`GkeConfig`] to
//! whichever [`InstallerFactory`] the caller supplies.

use crate::error::{Error, Result};
use crate::installer::{InstallOptions, InstallerFactory};
use clap::{Args, Command};
use std::io::Write;

mod config;

pub use config::{GkeConfig, OauthProxyConfig};

pub const NAME: &str = "gke";

const FLAG_AUTHZ_DOMAIN: &str = "authz-domain";

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct GkeFlags {
    /// Contact email for cluster admin
    #[arg(long, global = true, env = "EMAIL")]
    pub email: Option<String>,
    /// External DNS zone for public endpoints
    #[arg(long = "dns-zone", global = true)]
    pub dns_zone: Option<String>,
    /// Restrict authorized users to this Google email domain (required)
    #[arg(long = "authz-domain", global = true)]
    pub authz_domain: Option<String>,
    /// GCP project to use for managed resources
    #[arg(long, global = true)]
    pub project: Option<String>,
    /// Client ID to use for OAuth
    #[arg(long = "oauth-client-id", global = true)]
    pub oauth_client_id: Option<String>,
    /// Client secret to use for OAuth
    #[arg(long = "oauth-client-secret", global = true)]
    pub oauth_client_secret: Option<String>,
    /// Google groups used to restrict OAuth access
    #[arg(long = "oauth-google-groups", global = true, value_delimiter = ',')]
    pub oauth_google_groups: Vec<String>,
    // Collected so they can be rejected with a usage error instead of a parse error.
    #[arg(hide = true)]
    pub args: Vec<String>,
}

impl GkeFlags {
    /// Runs before anything is constructed.
    pub fn validate(&self) -> Result<()> {
        if !self.args.is_empty() {
            return Err(Error::usage(format!(
                "no arguments accepted by \"{NAME}\", received {:?}",
                self.args
            )));
        }
        match self.authz_domain.as_deref().map(str::trim) {
            Some(domain) if !domain.is_empty() => Ok(()),
            _ => Err(Error::usage(format!("required flag(s) \"{FLAG_AUTHZ_DOMAIN}\" not set"))),
        }
    }
}

pub fn command() -> Command {
    GkeFlags::augment_args(
        Command::new(NAME).about("Install Bitnami Production Runtime for GKE"),
    )
}

/// Attaches `gke` to `parent`, normally the `install` command.
pub fn register(parent: Command) -> Command {
    parent.subcommand(command())
}

pub fn run(
    flags: GkeFlags,
    options: &InstallOptions,
    factory: &dyn InstallerFactory,
    out: &mut dyn Write,
) -> Result<()> {
    flags.validate()?;
    let config = GkeConfig::new(flags);
    tracing::debug!(
        authz_domain = %config.oauth_proxy.authz_domain,
        project = %config.project,
        "resolved gke flags"
    );
    let mut installer = factory.new_install_subcommand(options, NAME, Box::new(config))?;
    installer.run(out)
}
