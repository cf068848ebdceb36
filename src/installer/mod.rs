use crate::colors::*;
use crate::config::{self, DEFAULT_CONFIG_FILE};
use crate::error::{Error, Result};
use clap::Args;
use serde_json::Value;
use std::fmt;
use std::io::Write;
use std::path::PathBuf;

/// Flags shared by every `install <platform>` subcommand.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct InstallOptions {
    /// Path to the generated cluster configuration
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
    /// Print the generated configuration instead of writing it
    #[arg(long, global = true)]
    pub dry_run: bool,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self { config: PathBuf::from(DEFAULT_CONFIG_FILE), dry_run: false }
    }
}

/// Options specific to one deployment target.
pub trait PlatformConfig: fmt::Debug {
    /// Rejects malformed flag combinations before an installer is built.
    fn check(&self) -> Result<()>;

    /// Folds in a configuration written by an earlier run. Flags given on
    /// this invocation win over persisted values.
    fn merge_persisted(&mut self, persisted: Value) -> Result<()>;

    /// Fills derived values once all sources are merged.
    fn generate(&mut self) -> Result<()>;

    fn to_value(&self) -> Result<Value>;
}

pub trait Installer {
    fn run(&mut self, out: &mut dyn Write) -> Result<()>;
}

pub trait InstallerFactory {
    fn new_install_subcommand(
        &self,
        options: &InstallOptions,
        platform: &str,
        config: Box<dyn PlatformConfig>,
    ) -> Result<Box<dyn Installer>>;
}

/// Builds [`ConfigInstaller`]s: the generate step of an install.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigInstallerFactory;

impl InstallerFactory for ConfigInstallerFactory {
    fn new_install_subcommand(
        &self,
        options: &InstallOptions,
        platform: &str,
        config: Box<dyn PlatformConfig>,
    ) -> Result<Box<dyn Installer>> {
        config.check()?;
        tracing::debug!(platform, config = %options.config.display(), "installer constructed");
        Ok(Box::new(ConfigInstaller {
            options: options.clone(),
            platform: platform.to_string(),
            config,
        }))
    }
}

#[derive(Debug)]
pub struct ConfigInstaller {
    options: InstallOptions,
    platform: String,
    config: Box<dyn PlatformConfig>,
}

impl Installer for ConfigInstaller {
    fn run(&mut self, out: &mut dyn Write) -> Result<()> {
        let path = &self.options.config;
        if let Some(persisted) = config::load_persisted(path)? {
            tracing::debug!(path = %path.display(), "merging persisted configuration");
            self.config.merge_persisted(persisted).map_err(|e| match e {
                Error::Json(source) => Error::ConfigFormat { path: path.clone(), source },
                other => other,
            })?;
        }
        writeln!(
            out,
            "{C_GRAY}[kubeprod]{C_RESET} {C_CYAN}generating{C_RESET} {} configuration",
            self.platform
        )?;
        self.config.generate()?;
        let value = self.config.to_value()?;

        if self.options.dry_run {
            writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
            writeln!(
                out,
                "{C_GRAY}[kubeprod]{C_RESET} {C_YELLOW}dry run{C_RESET}: {} not written",
                path.display()
            )?;
            return Ok(());
        }

        config::write_persisted(path, &value)?;
        tracing::info!(platform = %self.platform, path = %path.display(), "configuration written");
        writeln!(
            out,
            "{C_GRAY}[kubeprod]{C_RESET} {C_GREEN}wrote{C_RESET} {}",
            path.display()
        )?;
        Ok(())
    }
}
