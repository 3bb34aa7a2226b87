use clap::Parser;
use tagfind::cli::{Cli, run};
use tagfind::logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(logging::level_for_verbosity(cli.verbose));

    tracing::debug!("Running {:?}", cli.command);
    let output = run(cli).inspect_err(|e| {
        tracing::error!("Command failed: {:#}", e);
    })?;

    if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }

    Ok(())
}
