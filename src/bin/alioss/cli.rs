// CLI argument definitions using clap

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "alioss")]
#[command(author = "hatlonely <hatlonely@foxmail.com>")]
#[command(version = "0.1.0")]
#[command(about = "A thin Aliyun OSS client", long_about = None)]
pub struct Cli {
    /// Path to config file (default: ~/.alioss/config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a new object id (oss://<prefix>/<uuid>[.<suffix>])
    Gen(GenArgs),
    /// Upload a local file
    Put(PutArgs),
    /// Print a signed download url
    Sign(SignArgs),
    /// List objects in a bucket (single page)
    Ls(LsArgs),
    /// Remove an object
    Rm(RmArgs),
}

#[derive(Args, Debug)]
pub struct GenArgs {
    /// Directory-like prefix
    pub prefix: String,

    /// File suffix, e.g. png or .png
    #[arg(short, long, default_value = "")]
    pub suffix: String,
}

#[derive(Args, Debug)]
pub struct PutArgs {
    /// Bucket name
    pub bucket: String,

    /// Local file to upload
    pub file: String,

    /// Object id to upload to (oss://key or plain key)
    #[arg(long, conflicts_with = "prefix")]
    pub id: Option<String>,

    /// Generate an object id under this prefix (default: empty prefix)
    #[arg(long)]
    pub prefix: Option<String>,
}

#[derive(Args, Debug)]
pub struct SignArgs {
    /// Bucket name
    pub bucket: String,

    /// Object id (oss://key); other values are printed unchanged
    pub id: String,

    /// Override expire seconds from config
    #[arg(short, long)]
    pub expire: Option<i64>,
}

#[derive(Args, Debug)]
pub struct LsArgs {
    /// Bucket name
    pub bucket: String,

    /// Long listing format (show details)
    #[arg(short, long)]
    pub long: bool,

    /// Human-readable sizes
    #[arg(short = 'H', long)]
    pub human_readable: bool,
}

#[derive(Args, Debug)]
pub struct RmArgs {
    /// Bucket name
    pub bucket: String,

    /// Object id (oss://key or plain key)
    pub id: String,

    /// Force removal without confirmation
    #[arg(short, long)]
    pub force: bool,
}
