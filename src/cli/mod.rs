use crate::error::{Error, Result};
use crate::installer::InstallerFactory;
use clap::{ArgMatches, Command};
use std::ffi::OsString;
use std::io::Write;

pub mod commands;

/// Parsed `kubeprod` invocation.
#[derive(Debug, Clone)]
pub struct KubeprodCli {
    matches: ArgMatches,
}

impl KubeprodCli {
    pub fn command() -> Command {
        Command::new("kubeprod")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Install the Kubernetes Production Runtime")
            .long_about(
                "kubeprod — install the Kubernetes Production Runtime on a managed cluster.\n\nExamples:\n  kubeprod install gke --authz-domain example.com --email admin@example.com\n  kubeprod install --dry-run gke --authz-domain example.com --project my-project",
            )
            .subcommand_required(true)
            .arg_required_else_help(true)
            .subcommand(commands::install::command())
    }

    pub fn parse() -> Self {
        Self { matches: Self::command().get_matches() }
    }

    pub fn try_parse_from<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(args)?;
        Ok(Self { matches })
    }

    pub fn run(&self, factory: &dyn InstallerFactory, out: &mut dyn Write) -> Result<()> {
        match self.matches.subcommand() {
            Some((commands::install::NAME, matches)) => {
                commands::install::run(matches, factory, out)
            }
            Some((other, _)) => Err(Error::usage(format!("unknown command \"{other}\""))),
            None => Err(Error::usage("a command is required")),
        }
    }
}
