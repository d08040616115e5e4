/*!
 * srcbundle - Bundle source files of selected languages into a single archive
 *
 * This library selects source files by language extension from a directory
 * tree and writes them into a zip archive, optionally followed by the
 * sources as comments and an author line.
 */

pub mod annotator;
pub mod bundle;
pub mod collector;
pub mod config;
pub mod error;
pub mod filter;
pub mod language;
pub mod report;
pub mod rsp;
pub mod types;
pub mod utils;
pub mod writer;


use tracing_subscriber::EnvFilter;

// Re-export main components for easier access
pub use annotator::{AnnotateOptions, Annotator};
pub use bundle::Bundler;
pub use collector::FileCollector;
pub use config::Config;
pub use error::{BundleError, Result};
pub use filter::PathFilter;
pub use language::Language;
pub use report::{ReportFormat, Reporter};
pub use types::{BundleOutcome, BundleSummary, CandidateSet, SelectionRequest, SortMode};
pub use writer::ArchiveWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install the stderr log subscriber.
///
/// `RUST_LOG` takes precedence over the verbosity count.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("srcbundle={}", level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
