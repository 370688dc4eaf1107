use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use pocketbase_provision::cli::{init_logging, ConnectionArgs};
use pocketbase_provision::collections::lookup_users_id;
use pocketbase_provision::prelude::*;

#[derive(Parser, Debug)]
#[clap(name = "pb-users-id", version)]
#[clap(about = "Write the id of the PocketBase users collection to a file", long_about = None)]
struct Cli {
    #[clap(flatten)]
    connection: ConnectionArgs,

    /// File to write the id to
    #[clap(long, short)]
    output: Option<PathBuf>,
}

async fn run() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.connection.debug);

    let mut config = cli.connection.config().context("Invalid configuration")?;
    if let Some(path) = cli.output {
        config = config.with_users_id_file(path);
    }
    let credentials = cli
        .connection
        .credentials()
        .context("Could not read admin credentials")?;

    let pb = PocketBase::new(config).context("Failed to build HTTP client")?;
    let collections = pb.authenticate(&credentials).await?;

    lookup_users_id(&collections, &pb.config().users_id_file, &mut io::stdout())
        .await
        .context("Could not look up the users collection")?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
