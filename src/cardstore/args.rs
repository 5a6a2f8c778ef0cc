use cardstore::model::Status;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

/// `cards --version` output. Release builds, and builds made outside a git
/// checkout, print the bare package version; other builds append the commit.
fn get_version() -> &'static str {
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| {
        version_string(
            env!("CARGO_PKG_VERSION"),
            env!("GIT_HASH"),
            env!("GIT_COMMIT_DATE"),
            env!("IS_RELEASE") == "true",
        )
    })
}

fn version_string(version: &str, git_hash: &str, commit_date: &str, release: bool) -> String {
    if release || git_hash.is_empty() {
        version.to_string()
    } else {
        format!("{version}@{git_hash} {commit_date}")
    }
}

#[derive(Parser, Debug)]
#[command(name = "cards", bin_name = "cards", version = get_version())]
#[command(about = "Task cards in a namespaced key-value store", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory holding store.json and config.json
    #[arg(long, global = true, env = "CARDS_HOME")]
    pub data_dir: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start a new instance. WIPES the whole store, all instances included
    Init,

    /// Print the configured instance id
    Instance,

    /// Add a card
    #[command(alias = "n")]
    Add {
        /// Card name
        #[arg(short, long)]
        name: String,

        /// Optional description
        #[arg(short, long)]
        description: Option<String>,

        /// TODO, IN_PROGRESS or DONE
        #[arg(short, long)]
        status: Option<Status>,
    },

    /// Show one card
    #[command(alias = "v")]
    Get { id: String },

    /// Change fields of a card
    #[command(alias = "e")]
    Update {
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        /// TODO, IN_PROGRESS or DONE
        #[arg(short, long)]
        status: Option<Status>,
    },

    /// Delete a card
    #[command(alias = "rm")]
    Delete { id: String },

    /// List cards, optionally only those with the given statuses
    #[command(alias = "ls")]
    List {
        /// Status codes to keep (repeatable)
        #[arg(short, long, num_args = 1..)]
        status: Vec<String>,
    },
}
