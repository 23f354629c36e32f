use std::path::PathBuf;

use clap::Parser;

use rmfs_daemon::state::{AppState, REFRESH_TOKEN_ENV};
use rmfs_daemon::{open_remote_fs, RemoteError, StateError};

pub mod op;
pub mod ops;

use op::OpContext;
use ops::{Get, Ls, Stat, Tree};

crate::command_enum! {
    (Get, Get),
    (Ls, Ls),
    (Stat, Stat),
    (Tree, Tree),
}

#[derive(Parser, Debug)]
#[command(name = "rmfs", version, about = "Browse a reMarkable cloud library as a filesystem")]
pub struct Cli {
    /// Path to the config file (defaults to <config dir>/rmfs/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Device refresh token, overrides the config file
    #[arg(long, global = true, env = REFRESH_TOKEN_ENV, hide_env_values = true)]
    pub refresh_token: Option<String>,

    /// Store-relative directory to root the view at, overrides the config file
    #[arg(long, global = true)]
    pub root: Option<String>,

    /// Hide the virtual Trash directory
    #[arg(long, global = true)]
    pub no_trash: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("failed to load config: {0}")]
    State(#[from] StateError),
    #[error("failed to set up remote client: {0}")]
    Remote(#[from] RemoteError),
}

impl Cli {
    /// Merge config file and flags into an operation context
    pub fn context(&self) -> Result<OpContext, ContextError> {
        let mut config = AppState::load(self.config.clone())?.config;

        if let Some(token) = &self.refresh_token {
            config.refresh_token = Some(token.clone());
        }
        if let Some(root) = &self.root {
            config.root = root.clone();
        }
        if self.no_trash {
            config.inject_trash = false;
        }

        Ok(OpContext {
            fs: open_remote_fs(&config)?,
        })
    }
}
