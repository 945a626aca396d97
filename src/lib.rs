//! # Tidings
//!
//! Client core for an AI-generated daily digest feature: background
//! polling with notification dedup, unread tracking, and structured
//! rendering of digest text.
//!
//! ## Architecture
//!
//! ```text
//! DigestApi → DigestService → Banner / UnreadCounter
//!                  ↑
//!              poll loop
//! ```
//!
//! - [`client`]: the backend collaborator trait and its HTTP adapter
//! - [`service`]: polling, new-digest detection, banner and unread state
//! - [`render`]: digest text → typed blocks and inline spans
//!
//! ## Quick Start
//!
//! ```bash
//! # Show the latest digest
//! tidings latest
//!
//! # List the digest history
//! tidings list
//!
//! # Poll in the foreground, printing notifications
//! tidings watch --interval 30s
//! ```
//!
//! ## Modules
//!
//! - [`app`]: application context and error types
//! - [`cli`]: command-line interface definitions
//! - [`client`]: digest backend collaborator contract + reqwest client
//! - [`config`]: TOML configuration
//! - [`domain`]: core domain models (Digest, NotificationPayload)
//! - [`render`]: block parser and inline span formatter
//! - [`service`]: digest service, poller, banner, unread counter

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the
/// configured backend client and the digest service.
pub mod app;

/// Command-line interface using clap.
///
/// Defines the CLI structure and subcommands:
/// - `latest` - Show the newest digest, rendered
/// - `list` - List the digest history
/// - `unread` - Print the unread count
/// - `watch` - Poll in the foreground
/// - `test-notify` - Push a generated digest through the banner path
pub mod cli;

/// Digest backend collaborators.
///
/// - [`DigestApi`](client::DigestApi): async trait the core consumes
/// - [`HttpDigestApi`](client::http::HttpDigestApi): reqwest-based client
pub mod client;

/// Configuration management.
///
/// Loads from `~/.config/tidings/config.toml`: backend base URL and
/// poll interval.
pub mod config;

/// Core domain models.
///
/// - [`Digest`](domain::Digest): one AI-generated digest record
/// - [`NotificationPayload`](domain::NotificationPayload): banner content
pub mod domain;

/// Digest content rendering.
///
/// A deliberately small line classifier, not a markdown grammar:
/// headings, lists, paragraphs, spacers, and `**bold**` runs.
pub mod render;

/// Polling and notification state.
///
/// - [`DigestService`](service::DigestService): poller memory, banner,
///   unread count behind one handle
/// - [`service::poller`]: the recurring check loop
pub mod service;
