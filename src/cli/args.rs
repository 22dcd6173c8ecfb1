// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Browse, filter and curate browser bookmarks from the terminal
pub struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Turn debugging information on
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,

    #[arg(long = "no-color", help = "disable colored output")]
    pub no_color: bool,

    #[arg(long = "store", value_name = "FILE", help = "bookmark snapshot file to use")]
    pub store: Option<String>,

    #[arg(long = "generate-config", help = "print default configuration")]
    pub generate_config: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List bookmarks, optionally filtered and sorted
    List {
        #[arg(short = 's', long = "search", help = "match title, url, domain or folder path")]
        search: Option<String>,

        #[arg(
            long = "sort",
            help = "dateDesc (default), dateAsc, titleAsc, titleDesc, urlAsc, urlDesc"
        )]
        sort: Option<String>,

        #[arg(short = 'f', long = "folder", help = "exact folder path, e.g. 'Work > Reviews'")]
        folder: Option<String>,

        #[arg(long = "date", help = "today, week, month or year")]
        date: Option<String>,

        #[arg(long = "json", help = "output as json")]
        is_json: bool,
    },
    /// Bookmarks added during the last 7 days
    Recent {
        #[arg(long = "json", help = "output as json")]
        is_json: bool,
    },
    /// Show the folder hierarchy with bookmark counts
    Folders,
    /// Show bookmark and folder totals
    Stats {
        #[arg(long = "json", help = "output as json")]
        is_json: bool,
    },
    /// Add a bookmark
    Add {
        url: String,
        #[arg(long = "title", help = "title, derived from the host if omitted")]
        title: Option<String>,
        #[arg(short = 'p', long = "parent", help = "id of the parent folder")]
        parent: Option<String>,
    },
    /// Change the title of a bookmark
    Edit { id: String, title: String },
    /// Delete a bookmark
    Delete { id: String },
    /// Initialize an empty bookmark store
    CreateStore {
        /// pathname to snapshot file
        path: String,
    },
}
