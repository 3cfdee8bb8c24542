use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pbxgraph",
    about = "Render, inspect, and edit project documents",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with encoder and source root settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Write the project as pbxproj text
    Render(RenderArgs),
    /// Print the group tree below the main group
    Tree(TreeArgs),
    /// Add nested groups
    AddGroup(AddGroupArgs),
    /// Add a file to a group
    AddFile(AddFileArgs),
}

#[derive(Args)]
pub struct RenderArgs {
    /// Project converted to JSON (`plutil -convert json`)
    pub project: PathBuf,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct TreeArgs {
    pub project: PathBuf,
}

#[derive(Args)]
pub struct AddGroupArgs {
    pub project: PathBuf,
    /// Slash-separated group path, e.g. `Sources/Feature`
    pub name: String,
    /// Existing group to add under, as a slash-separated path from the main group
    #[arg(long)]
    pub parent: Option<String>,
    /// Create groups without a folder path
    #[arg(long)]
    pub without_folder: bool,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct AddFileArgs {
    pub project: PathBuf,
    pub file: PathBuf,
    /// Group to add to, as a slash-separated path from the main group
    #[arg(long)]
    pub group: Option<String>,
    #[arg(long, default_value = "group")]
    pub source_tree: SourceTreeArg,
    /// Project source root; defaults to the config value, then the current directory
    #[arg(long)]
    pub source_root: Option<PathBuf>,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum SourceTreeArg {
    Group,
    SourceRoot,
    Absolute,
}
