mod cli;

use clap::Parser;
use owo_colors::OwoColorize;

use crate::cli::op::Op;
use crate::cli::Cli;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    if let Err(err) = run().await {
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let ctx = cli.context()?;

    let output = cli.command.execute(&ctx).await?.to_string();
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
