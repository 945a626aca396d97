use std::time::Duration;

use chrono::Local;

use crate::app::{AppContext, Result};
use crate::config;
use crate::render::{self, Block, Span};
use crate::service::Banner;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

pub async fn latest(ctx: &AppContext) -> Result<()> {
    let digests = ctx.api.fetch_digests().await?;

    let Some(digest) = digests.first() else {
        println!("No digests yet");
        return Ok(());
    };

    println!("{}{}{}", BOLD, digest.display_title(), RESET);
    println!("{}", digest.created_at.format("%Y-%m-%d %H:%M"));
    if !digest.topics.is_empty() {
        println!("Topics: {}", digest.topics.join(", "));
    }
    println!();

    print_blocks(&render::parse(&digest.content));

    if !digest.sources.is_empty() {
        println!();
        println!("Sources:");
        for source in &digest.sources {
            match (&source.title, &source.url) {
                (Some(title), Some(url)) => println!("  {} ({})", title, url),
                (Some(title), None) => println!("  {}", title),
                (None, Some(url)) => println!("  {}", url),
                (None, None) => {}
            }
        }
    }

    Ok(())
}

pub async fn list(ctx: &AppContext) -> Result<()> {
    let digests = ctx.api.fetch_digests().await?;

    if digests.is_empty() {
        println!("No digests");
        return Ok(());
    }

    for digest in digests {
        let read_marker = if digest.is_read { " " } else { "●" };
        let bookmark_marker = if digest.is_bookmarked { "★" } else { " " };

        println!(
            "{}{} {} {}",
            read_marker,
            bookmark_marker,
            digest.created_at.format("%Y-%m-%d"),
            digest.display_title()
        );
    }

    Ok(())
}

pub async fn unread(ctx: &AppContext) -> Result<()> {
    let count = ctx.api.fetch_unread_count().await?;
    let plural = if count == 1 { "" } else { "s" };
    println!("{} unread digest{}", count, plural);
    Ok(())
}

pub async fn test_notify(ctx: &AppContext) -> Result<()> {
    let digest = ctx.api.generate_test_digest().await?;
    ctx.service.show_test_digest(&digest);

    if let Banner::Visible(payload) = ctx.service.current_notification() {
        println!("{}{}{}", BOLD, payload.title, RESET);
        println!("{}", payload.body);
    }

    Ok(())
}

/// Run the poll loop in the foreground, printing banner events as they
/// fire, until Ctrl+C.
pub async fn watch(ctx: &AppContext, interval: Option<String>) -> Result<()> {
    let period = match interval {
        Some(s) => Duration::from_secs(
            config::parse_interval(&s).map_err(config::ConfigError::InvalidInterval)?,
        ),
        None => ctx.config.poll.interval()?,
    };

    println!(
        "Watching for new digests every {} (Ctrl+C to stop)",
        config::format_interval(period.as_secs())
    );

    let handle = ctx.service.start(period);

    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    let mut last_unread = ctx.service.unread_count();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = ticker.tick() => {
                if let Banner::Visible(payload) = ctx.service.current_notification() {
                    let stamp = Local::now().format("%H:%M:%S");
                    println!("[{}] {}: {}", stamp, payload.title, payload.body);
                    ctx.service.dismiss();
                }

                let unread = ctx.service.unread_count();
                if unread != last_unread {
                    let stamp = Local::now().format("%H:%M:%S");
                    println!("[{}] {} unread", stamp, unread);
                    last_unread = unread;
                }
            }
        }
    }

    handle.stop();
    println!("Stopped");
    Ok(())
}

fn render_spans(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| match span {
            Span::Plain(text) => text.clone(),
            Span::Bold(text) => format!("{}{}{}", BOLD, text, RESET),
        })
        .collect()
}

fn print_blocks(blocks: &[Block]) {
    for block in blocks {
        match block {
            Block::Heading { level, spans } => {
                let text: String = spans.iter().map(Span::text).collect();
                println!("{}{}{}", BOLD, text, RESET);
                match level {
                    1 => println!("{}", "=".repeat(text.chars().count())),
                    2 => println!("{}", "-".repeat(text.chars().count())),
                    _ => {}
                }
            }
            Block::Paragraph { spans } => println!("{}", render_spans(spans)),
            Block::List { items } => {
                for item in items {
                    println!("  • {}", render_spans(item));
                }
            }
            Block::Spacer => println!(),
        }
    }
}
