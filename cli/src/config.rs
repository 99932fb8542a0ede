//! Command-line configuration.

use clap::{Parser, Subcommand, ValueEnum};

pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

#[derive(Debug, Parser)]
#[command(name = "crud-cli", version, about = "Browse and edit demo API collections")]
pub struct Cli {
    /// Root of the REST API.
    #[arg(long, env = "CRUD_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Give up on a request after this many seconds (0 waits forever).
    #[arg(long, env = "CRUD_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print every record of a collection, one JSON object per line.
    List { resource: ResourceKind },

    /// Post a comment and show the page with it on top.
    AddComment {
        #[arg(long)]
        body: String,
        #[arg(long, default_value_t = 1)]
        post_id: u64,
        #[arg(long, default_value_t = 1)]
        user_id: u64,
    },

    /// Replace the text of a comment.
    EditComment { id: u64, body: String },

    /// Add a todo item.
    AddTodo {
        todo: String,
        #[arg(long, default_value_t = 1)]
        user_id: u64,
        #[arg(long)]
        completed: bool,
    },

    /// Mark a todo as done or not done.
    ToggleTodo {
        id: u64,
        #[arg(action = clap::ArgAction::Set)]
        completed: bool,
    },

    /// Delete a record by id.
    Delete { resource: ResourceKind, id: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    Comments,
    Products,
    Recipes,
    Posts,
    Todos,
}
