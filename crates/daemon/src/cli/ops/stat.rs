use std::fmt;

use clap::Args;
use owo_colors::OwoColorize;

use rmfs_daemon::{BlobDetails, ObjectInfo, RemoteFsError};

use crate::cli::op::{Op, OpContext};

#[derive(Args, Debug, Clone)]
pub struct Stat {
    /// Path to inspect, relative to the root
    pub path: String,

    /// Also fetch blob size and MD5 (documents only, one extra request)
    #[arg(long)]
    pub details: bool,
}

#[derive(Debug)]
pub struct StatOutput {
    pub info: ObjectInfo,
    pub details: Option<BlobDetails>,
}

impl fmt::Display for StatOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let info = &self.info;
        writeln!(f, "{}", info.remote.bold())?;
        writeln!(f, "  {} {}", "id:".dimmed(), info.id)?;
        writeln!(
            f,
            "  {} {}",
            "type:".dimmed(),
            if info.is_dir() { "directory" } else { "file" }
        )?;
        writeln!(f, "  {} {}", "version:".dimmed(), info.version)?;
        match info.modified {
            Some(modified) => write!(f, "  {} {}", "modified:".dimmed(), modified.to_rfc3339())?,
            None => write!(f, "  {} {}", "modified:".dimmed(), "unknown".yellow())?,
        }

        if let Some(details) = &self.details {
            let size = details
                .size
                .map(|size| size.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            let md5 = details.md5.as_deref().unwrap_or("unknown");
            writeln!(f)?;
            writeln!(f, "  {} {}", "size:".dimmed(), size)?;
            write!(f, "  {} {}", "md5:".dimmed(), md5)?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StatError {
    #[error(transparent)]
    Fs(#[from] RemoteFsError),
}

#[async_trait::async_trait]
impl Op for Stat {
    type Error = StatError;
    type Output = StatOutput;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        if self.details {
            let (info, details) = ctx.fs.details(&self.path).await?;
            return Ok(StatOutput {
                info,
                details: Some(details),
            });
        }

        let info = ctx.fs.stat(&self.path).await?;
        Ok(StatOutput {
            info,
            details: None,
        })
    }
}
