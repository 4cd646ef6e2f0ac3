use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "chartz")]
#[command(about = "Tabular metadata organizer for Trombone Champ custom charts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Charts directory (overrides the configured default)
    #[arg(short, long, global = true)]
    pub dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List charts as a table
    #[command(alias = "ls")]
    List {
        /// Column to sort by
        #[arg(short, long)]
        sort: Option<String>,

        /// Sort descending
        #[arg(long)]
        desc: bool,
    },

    /// Show every editable field of one or more charts
    #[command(alias = "v")]
    Show {
        /// Chart directory names
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Edit chart fields (column=value pairs) and save
    Set {
        /// Chart directory name
        id: String,

        /// Edits, e.g. difficulty=7 name="New Name"
        #[arg(required = true, num_args = 1..)]
        assignments: Vec<String>,
    },

    /// Remove fields from a chart and save
    Unset {
        /// Chart directory name
        id: String,

        /// Columns to remove, e.g. UNK1 note_color_end
        #[arg(required = true, num_args = 1..)]
        columns: Vec<String>,
    },

    /// Scan the charts directory and report problems
    Check,

    /// Export charts to a tar.gz archive
    Export {
        /// Chart directory names (all charts if omitted)
        ids: Vec<String>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., charts-dir)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
