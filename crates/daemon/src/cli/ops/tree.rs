use std::fmt;

use clap::Args;
use owo_colors::OwoColorize;

use rmfs_daemon::{ObjectInfo, RemoteFsError};

use crate::cli::op::{Op, OpContext};

#[derive(Args, Debug, Clone)]
pub struct Tree {
    /// Directory to start from, relative to the root (defaults to the root)
    pub path: Option<String>,
}

#[derive(Debug)]
pub struct TreeOutput {
    pub base: String,
    pub items: Vec<ObjectInfo>,
}

impl TreeOutput {
    fn depth(&self, item: &ObjectInfo) -> usize {
        let relative = item
            .remote
            .strip_prefix(self.base.as_str())
            .unwrap_or(&item.remote)
            .trim_start_matches('/');
        relative.matches('/').count()
    }
}

impl fmt::Display for TreeOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = if self.base.is_empty() { "." } else { &self.base };
        write!(f, "{}", base.bold())?;

        for item in &self.items {
            let indent = "  ".repeat(self.depth(item) + 1);
            if item.is_dir() {
                write!(f, "\n{}{}/", indent, item.name.blue())?;
            } else {
                write!(f, "\n{}{}", indent, item.name)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    #[error(transparent)]
    Fs(#[from] RemoteFsError),
}

#[async_trait::async_trait]
impl Op for Tree {
    type Error = TreeError;
    type Output = TreeOutput;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let base = self
            .path
            .as_deref()
            .unwrap_or("")
            .trim_matches('/')
            .to_string();
        let items = ctx.fs.walk(&base).await?;

        Ok(TreeOutput { base, items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::projection::EntryKind;

    fn info(remote: &str, kind: EntryKind) -> ObjectInfo {
        ObjectInfo {
            remote: remote.to_string(),
            name: remote.rsplit('/').next().unwrap_or(remote).to_string(),
            id: remote.to_string(),
            kind,
            version: 1,
            modified: None,
        }
    }

    #[test]
    fn test_depth_is_relative_to_base() {
        let output = TreeOutput {
            base: "Books".to_string(),
            items: vec![],
        };

        assert_eq!(output.depth(&info("Books/Fiction", EntryKind::Directory)), 0);
        assert_eq!(output.depth(&info("Books/Fiction/dune", EntryKind::File)), 1);
    }

    #[test]
    fn test_render_from_root() {
        let output = TreeOutput {
            base: String::new(),
            items: vec![
                info("Books", EntryKind::Directory),
                info("Books/manual", EntryKind::File),
                info("sketch", EntryKind::File),
            ],
        };

        let rendered = output.to_string();
        assert!(rendered.contains("\n    manual"));
        assert!(rendered.ends_with("\n  sketch"));
    }
}
