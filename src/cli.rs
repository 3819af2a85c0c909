use clap::Parser;
use std::path::PathBuf;

/// Command line interface for the devserve binary.
#[derive(Parser, Debug)]
#[clap(author, version, about = "Static file server for local development")]
pub struct Cli {
    /// Port to listen on
    #[clap(default_value = "8000")]
    pub port: u16,

    /// Directory to serve
    #[clap(short, long, default_value = ".")]
    pub directory: PathBuf,

    /// URL prefix the served tree is mounted under ("/" means none)
    #[clap(short, long)]
    pub subsite: Option<String>,
}
