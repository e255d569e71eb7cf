//! A library for adding a table of downloadable assets to a GitHub release's description.
//!
//! Projects that build binaries for many platforms usually attach one archive per OS and CPU
//! architecture to each release, with names like `gocmd-v0.9.1-linux-amd64.tar.gz`. This crate
//! turns that list of files into a Markdown table that people can read without knowing Go's
//! platform names, and appends it to the release description.
//!
//! This project also ships a CLI tool named `update-release-table`, which is what the release CI
//! job runs after uploading the assets.
//!
//! The main entry point for programmatic use is the [`UpdaterBuilder`] struct. Here is an example of
//! its usage:
//!
//! ```ignore
//! use release_table::UpdaterBuilder;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let updater = UpdaterBuilder::new()
//!         .project("cyverse/gocommands")
//!         .version("v0.9.1")
//!         .build()?;
//!
//!     let outcome = updater.run().await?;
//!     if let Some(table) = outcome.table() {
//!         println!("{table}");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## How the Table Is Built
//!
//! Each asset name is searched for the first `-<os>-<arch>.` segment, where `<os>` is made of ASCII
//! letters and `<arch>` of ASCII letters, digits, and underscores. The Go names for the common
//! platforms are then replaced with friendlier ones:
//!
//! - `darwin` becomes `MacOS`, `linux` becomes `Linux`, and `windows` becomes `Windows`.
//! - `amd64` becomes `Intel/AMD 64-bit` and `386` becomes `Intel/AMD 32-bit`.
//! - `arm64` becomes `M1/M2/M3 (ARM 64-bit)` on MacOS and `ARM 64-bit` everywhere else.
//! - `arm` becomes `ARM 32-bit`.
//!
//! Other names are used as-is. Assets whose name has no such segment still get a row, but with
//! empty OS and architecture cells. Assets ending in `.md5` are left out entirely.
//!
//! ## Avoiding Duplicate Tables
//!
//! Every table starts with the line `### Release Assets`. If the release description already
//! contains that line, the release is not changed. Nothing smarter than that is attempted, so a
//! description with a differently titled table will get a second one.
//!
//! ## Features
//!
//! This crate offers several features to control the TLS dependency used by `reqwest`:
//!
#![doc = document_features::document_features!()]

mod arch;
mod asset;
mod builder;
mod client;
mod github;
mod os;
mod release;
mod table;
#[cfg(test)]
mod test_logging;
mod updater;

pub use crate::{
    asset::{parse_asset_name, AssetPlatform},
    builder::{UpdaterBuilder, UpdaterError, DEFAULT_PROJECT},
    client::ReleaseClient,
    github::GitHubClient,
    release::{find_release, Asset, Release},
    table::{append_table, build_table, has_table, TABLE_HEADER_MARKER},
    updater::{Outcome, Updater},
};

/// The version of the `release-table` crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(feature = "logging")]
use fern::{
    colors::{Color, ColoredLevelConfig},
    Dispatch,
};

/// This function initializes logging for the application. It's public for the sake of the
/// `update-release-table` binary, but it lives in the library crate so that test code can also
/// enable logging.
///
/// # Errors
///
/// This can return a `log::SetLoggerError` error.
#[cfg(feature = "logging")]
pub fn init_logger(level: log::LevelFilter) -> Result<(), log::SetLoggerError> {
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::BrightBlack)
        .trace(Color::BrightBlack);

    Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{target}][{level}] {message}",
                target = record.target(),
                level = colors.color(record.level()),
                message = message,
            ));
        })
        .level(level)
        // These are very noisy at debug level.
        .level_for("hyper", log::LevelFilter::Error)
        .level_for("hyper_util", log::LevelFilter::Error)
        .level_for("reqwest", log::LevelFilter::Warn)
        .chain(std::io::stderr())
        .apply()
}
