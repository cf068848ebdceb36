use crate::error::{Error, Result};
use crate::gke;
use crate::installer::{InstallOptions, InstallerFactory};
use clap::{ArgMatches, Args, Command, FromArgMatches};
use std::io::Write;

pub const NAME: &str = "install";

/// `install` with every supported platform registered under it.
pub fn command() -> Command {
    let install = InstallOptions::augment_args(
        Command::new(NAME)
            .about("Install the runtime into a cluster")
            .subcommand_required(true)
            .arg_required_else_help(true),
    );
    gke::register(install)
}

pub fn run(matches: &ArgMatches, factory: &dyn InstallerFactory, out: &mut dyn Write) -> Result<()> {
    match matches.subcommand() {
        Some((gke::NAME, sub)) => {
            // install's flags are global, so the platform matches carry them too
            let options = InstallOptions::from_arg_matches(sub)?;
            let flags = gke::GkeFlags::from_arg_matches(sub)?;
            gke::run(flags, &options, factory, out)
        }
        Some((other, _)) => {
            Err(Error::usage(format!("unknown platform \"{other}\" for \"{NAME}\"")))
        }
        None => Err(Error::usage(format!("\"{NAME}\" requires a platform subcommand"))),
    }
}
