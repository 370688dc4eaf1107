use std::io;

use anyhow::Context;
use clap::Parser;

use pocketbase_provision::cli::{init_logging, ConnectionArgs};
use pocketbase_provision::prelude::*;
use pocketbase_provision::report;

#[derive(Parser, Debug)]
#[clap(name = "pb-provision", version)]
#[clap(about = "Delete and re-create the app's PocketBase collections", long_about = None)]
struct Cli {
    #[clap(flatten)]
    connection: ConnectionArgs,

    /// Abort when any collection fails to create, not only users/messages
    #[clap(long)]
    strict: bool,
}

async fn run() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.connection.debug);

    let mut config = cli.connection.config().context("Invalid configuration")?;
    if cli.strict {
        config = config.with_strict(true);
    }
    let credentials = cli
        .connection
        .credentials()
        .context("Could not read admin credentials")?;
    println!();

    let pb = PocketBase::new(config).context("Failed to build HTTP client")?;
    let report = Provisioner::new(&pb).run(&credentials).await?;

    report::write_summary(&mut io::stdout(), &report, pb.config())?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
