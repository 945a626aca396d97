use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tidings::app::AppContext;
use tidings::cli::{commands, Cli, Commands};
use tidings::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Latest => {
            commands::latest(&ctx).await?;
        }
        Commands::List => {
            commands::list(&ctx).await?;
        }
        Commands::Unread => {
            commands::unread(&ctx).await?;
        }
        Commands::Watch { interval } => {
            commands::watch(&ctx, interval).await?;
        }
        Commands::TestNotify => {
            commands::test_notify(&ctx).await?;
        }
    }

    Ok(())
}
