use std::fmt;

use clap::Args;
use comfy_table::Table;

use rmfs_daemon::{ObjectInfo, RemoteFsError};

use crate::cli::op::{Op, OpContext};

#[derive(Args, Debug, Clone)]
pub struct Ls {
    /// Directory to list, relative to the root (defaults to the root)
    pub path: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug)]
pub enum LsOutput {
    Table(Vec<ObjectInfo>),
    Json(String),
}

impl fmt::Display for LsOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items = match self {
            LsOutput::Json(json) => return write!(f, "{json}"),
            LsOutput::Table(items) => items,
        };

        if items.is_empty() {
            return write!(f, "No items found");
        }

        let mut table = Table::new();
        table.set_header(vec!["TYPE", "NAME", "MODIFIED"]);
        for item in items {
            let type_str = if item.is_dir() { "dir" } else { "file" };
            let modified = item
                .modified
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "-".to_string());
            table.add_row(vec![type_str.to_string(), item.name.clone(), modified]);
        }
        write!(f, "{table}")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LsError {
    #[error(transparent)]
    Fs(#[from] RemoteFsError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[async_trait::async_trait]
impl Op for Ls {
    type Error = LsError;
    type Output = LsOutput;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let items = ctx.fs.list(self.path.as_deref().unwrap_or("")).await?;

        if self.json {
            return Ok(LsOutput::Json(serde_json::to_string_pretty(&items)?));
        }
        Ok(LsOutput::Table(items))
    }
}
