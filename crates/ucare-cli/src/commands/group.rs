//! `ucare group` - file group commands.

use clap::Subcommand;
use tracing::info;

use crate::args::ConnectionArgs;

#[derive(clap::Args)]
pub struct Args {
    #[command(subcommand)]
    command: GroupCommand,
}

#[derive(Subcommand)]
enum GroupCommand {
    /// Print group metadata as JSON
    Info {
        /// Group id (`<uuid>~<count>`) or CDN URL
        group: String,
    },
    /// Store every file of the group
    Store {
        /// Group id (`<uuid>~<count>`) or CDN URL
        group: String,
    },
    /// Print one CDN URL per file slot
    Files {
        /// Group id (`<uuid>~<count>`) or CDN URL
        group: String,
    },
}

pub fn run(args: Args, connection: &ConnectionArgs) -> anyhow::Result<()> {
    let ucare = connection.client()?;
    match args.command {
        GroupCommand::Info { group } => {
            let mut group = ucare.file_group(&group)?;
            println!("{}", serde_json::to_string_pretty(group.info()?)?);
        }
        GroupCommand::Store { group } => {
            let mut group = ucare.file_group(&group)?;
            group.store()?;
            info!(group_id = group.group_id(), "stored");
            println!("{}", group.cdn_url());
        }
        GroupCommand::Files { group } => {
            let mut group = ucare.file_group(&group)?;
            for (index, slot) in group.files()?.into_iter().enumerate() {
                match slot {
                    Some(file) => println!("{file}"),
                    None => println!("{index}: <unavailable>"),
                }
            }
        }
    }
    Ok(())
}
