use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod args;
mod commands;
mod util;

use args::ConnectionArgs;

#[derive(Parser)]
#[command(name = "ucare", about = "Uploadcare file utilities", version)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect, store and delete single files
    File(commands::file::Args),
    /// Inspect and store file groups
    Group(commands::group::Args),
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::File(args) => commands::file::run(args, &cli.connection),
        Commands::Group(args) => commands::group::run(args, &cli.connection),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
