//! Music Catalog CLI Library
//!
//! This library provides the building blocks of the `tunescout` binary: a
//! token-managed HTTP client for OAuth2 client-credentials APIs, thin typed
//! wrappers around several music services, configuration loading and the CLI
//! command implementations that turn upstream responses into JSON documents.
//!
//! # Modules
//!
//! - `apple_music` - iTunes Search API client
//! - `cli` - Command-line interface implementations
//! - `client` - Token-managed API client shared by OAuth2-backed services
//! - `config` - Configuration management (`apis.json`, `.env`, environment)
//! - `deezer` - Deezer public API client
//! - `error` - Error taxonomy used across the crate
//! - `management` - Access token lifecycle (client-credentials grant)
//! - `qobuz` - Qobuz API client
//! - `spotify` - Spotify Web API client
//! - `tidal` - Tidal OpenAPI client
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//! - `youtube` - YouTube Data API client
//!
//! # Example
//!
//! ```
//! use tunescout::{cli, config::Config, spotify::SearchKind};
//!
//! #[tokio::main]
//! async fn main() -> tunescout::Result<()> {
//!     let config = Config::load().await?;
//!     let action = cli::SpotifyAction::Search(SearchKind::Track, "daft punk".into());
//!     let value = cli::spotify(&config, action, 10).await?;
//!     println!("{}", cli::render(&value)?);
//!     Ok(())
//! }
//! ```

pub mod apple_music;
pub mod cli;
pub mod client;
pub mod config;
pub mod deezer;
pub mod error;
pub mod management;
pub mod qobuz;
pub mod spotify;
pub mod tidal;
pub mod types;
pub mod utils;
pub mod youtube;

pub use error::Error;

/// A convenient Result type alias for operations that may fail.
///
/// Every fallible operation in the crate reports one of the variants of
/// [`Error`], so callers can match on the kind of failure instead of on
/// message text.
pub type Result<T> = std::result::Result<T, Error>;

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Used only for failures that happen before a command can report a
/// structured error, such as an invalid `--log-level`.
///
/// # Behavior
///
/// This macro will cause the program to exit with status 1 immediately after
/// printing the message.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark to standard error.
///
/// # Example
///
/// ```
/// warning!("Configuration file {} ignored", path.display());
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
