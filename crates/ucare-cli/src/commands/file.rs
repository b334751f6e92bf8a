//! `ucare file` - single file commands.

use anyhow::{Context, bail};
use clap::Subcommand;
use tracing::info;
use ucare::{DimensionKind, crop_url, resize_url};

use crate::args::{ConnectionArgs, WaitArgs};
use crate::util::parse_dimensions;

#[derive(clap::Args)]
pub struct Args {
    #[command(subcommand)]
    command: FileCommand,
}

#[derive(Subcommand)]
enum FileCommand {
    /// Print file metadata as JSON
    Info {
        /// File UUID or CDN URL
        file: String,
    },
    /// Mark a file as stored
    Store {
        /// File UUID or CDN URL
        file: String,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Delete a file
    Delete {
        /// File UUID or CDN URL
        file: String,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Print the CDN URL, optionally with a resize or crop operation
    Url {
        /// File UUID or CDN URL
        file: String,
        /// Resize to WxH, W or xH
        #[arg(long, conflicts_with = "crop")]
        resize: Option<String>,
        /// Crop to WxH
        #[arg(long)]
        crop: Option<String>,
    },
}

pub fn run(args: Args, connection: &ConnectionArgs) -> anyhow::Result<()> {
    match args.command {
        FileCommand::Info { file } => {
            let ucare = connection.client()?;
            let mut file = ucare.file(&file)?;
            println!("{}", serde_json::to_string_pretty(file.info()?)?);
        }
        FileCommand::Store { file, wait } => {
            let ucare = connection.client()?;
            let mut file = ucare.file(&file)?;
            file.store(wait.to_wait_options()?)?;
            info!(file_id = file.file_id(), "stored");
            println!("{}", file.cdn_url());
        }
        FileCommand::Delete { file, wait } => {
            let ucare = connection.client()?;
            let mut file = ucare.file(&file)?;
            file.delete(wait.to_wait_options()?)?;
            info!(file_id = file.file_id(), "deleted");
        }
        FileCommand::Url { file, resize, crop } => {
            let ucare = connection.offline_client()?;
            let file = ucare.file(&file)?;
            let cdn_url = file.cdn_url();
            let url = match (resize, crop) {
                (Some(dims), _) => {
                    let req = parse_dimensions(DimensionKind::Resize, &dims)
                        .with_context(|| format!("invalid --resize {dims}"))?;
                    resize_url(&cdn_url, req.width, req.height)?
                }
                (None, Some(dims)) => {
                    let req = parse_dimensions(DimensionKind::Crop, &dims)
                        .with_context(|| format!("invalid --crop {dims}"))?;
                    if req.width.is_none() || req.height.is_none() {
                        bail!("--crop needs both width and height, got {dims}");
                    }
                    crop_url(&cdn_url, req.width, req.height)?
                }
                (None, None) => cdn_url,
            };
            println!("{url}");
        }
    }
    Ok(())
}
