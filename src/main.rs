use anyhow::Result;
use kubeprod::cli::KubeprodCli;
use kubeprod::installer::ConfigInstallerFactory;
use std::io;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("KUBEPROD_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("kubeprod error: {:#}", e);
        std::process::exit(1);
    }
}

fn real_main() -> Result<()> {
    let cli = KubeprodCli::parse();
    let mut stdout = io::stdout().lock();
    cli.run(&ConfigInstallerFactory, &mut stdout)?;
    Ok(())
}
