pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tidings")]
#[command(about = "AI daily digest notifier", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the latest digest, rendered
    Latest,
    /// List the digest history
    List,
    /// Print the unread digest count
    Unread,
    /// Poll for new digests in the foreground
    Watch {
        /// Check interval (e.g., "30s", "5m", "1h"); overrides the config
        #[arg(short, long)]
        interval: Option<String>,
    },
    /// Generate a test digest and push it through the notification path
    TestNotify,
}
