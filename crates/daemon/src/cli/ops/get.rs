use std::fmt;
use std::path::PathBuf;

use clap::Args;
use owo_colors::OwoColorize;
use tokio::io::AsyncWriteExt;

use rmfs_daemon::RemoteFsError;

use crate::cli::op::{Op, OpContext};

#[derive(Args, Debug, Clone)]
pub struct Get {
    /// Document to download, relative to the root
    pub path: String,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug)]
pub enum GetOutput {
    /// Contents went to stdout; nothing left to print
    Streamed,
    Saved { path: PathBuf, size: usize },
}

impl fmt::Display for GetOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GetOutput::Streamed => Ok(()),
            GetOutput::Saved { path, size } => write!(
                f,
                "{} {} bytes to {}",
                "saved".green(),
                size,
                path.display()
            ),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GetError {
    #[error(transparent)]
    Fs(#[from] RemoteFsError),
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[async_trait::async_trait]
impl Op for Get {
    type Error = GetError;
    type Output = GetOutput;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let bytes = ctx.fs.read(&self.path).await?;

        match &self.output {
            Some(path) => {
                tokio::fs::write(path, &bytes)
                    .await
                    .map_err(|source| GetError::Write {
                        path: path.display().to_string(),
                        source,
                    })?;
                Ok(GetOutput::Saved {
                    path: path.clone(),
                    size: bytes.len(),
                })
            }
            None => {
                let mut stdout = tokio::io::stdout();
                let written = async {
                    stdout.write_all(&bytes).await?;
                    stdout.flush().await
                };
                written.await.map_err(|source| GetError::Write {
                    path: "stdout".to_string(),
                    source,
                })?;
                Ok(GetOutput::Streamed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streamed_output_prints_nothing() {
        assert_eq!(GetOutput::Streamed.to_string(), "");
    }

    #[test]
    fn test_saved_output_names_file() {
        let output = GetOutput::Saved {
            path: PathBuf::from("/tmp/dune.pdf"),
            size: 1024,
        };

        let rendered = output.to_string();
        assert!(rendered.contains("1024 bytes"));
        assert!(rendered.ends_with("/tmp/dune.pdf"));
    }
}
