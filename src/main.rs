use clap::{Parser, Subcommand};
use std::fs::OpenOptions;

mod commands;
mod config;
mod integrations;
mod utils;

#[derive(Parser)]
#[command(version, about = "Walkthrough of the Azure virtual machine lifecycle", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Provision two VMs, run operations on them, then tear everything down
    Run {
        /// Azure region for every created resource
        #[arg(long, default_value = "westus")]
        location: String,

        /// Resource group that will contain the created resources
        #[arg(long = "resource-group", default_value = "azvm-demo-rg")]
        resource_group: String,

        /// Storage account hosting the disk blobs (generated when omitted)
        #[arg(long = "storage-account")]
        storage_account: Option<String>,

        /// Skip the interactive pauses between phases
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// List every virtual machine visible to the configured subscription
    List {},

    /// Delete a resource group and everything it contains
    Teardown {
        /// Resource group to delete
        #[arg(long = "resource-group", default_value = "azvm-demo-rg")]
        resource_group: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Read environment variables
    dotenvy::dotenv().ok();

    // Setup logging
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("azvm.log")
        .expect("Failed to open log file");

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Run {
            location,
            resource_group,
            storage_account,
            yes,
        } => {
            commands::run(location, resource_group, storage_account.clone(), *yes).await?;
        }
        Commands::List {} => {
            commands::list().await?;
        }
        Commands::Teardown {
            resource_group,
            yes,
        } => {
            commands::teardown(resource_group, *yes).await?;
        }
    }

    Ok(())
}
