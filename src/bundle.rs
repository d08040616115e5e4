/*!
 * The bundling pipeline: collect, archive, annotate
 */

use std::fs;
use std::sync::Arc;
use std::time::Instant;

use indicatif::ProgressBar;
use tracing::info;

use crate::annotator::Annotator;
use crate::collector::FileCollector;
use crate::config::Config;
use crate::error::Result;
use crate::types::{BundleOutcome, BundleSummary};
use crate::writer::ArchiveWriter;

/// Runs one bundling pass over a configuration
pub struct Bundler {
    /// Bundling configuration
    config: Config,
    /// Progress bar
    progress: Arc<ProgressBar>,
}

impl Bundler {
    /// Create a new bundler
    pub fn new(config: Config, progress: Arc<ProgressBar>) -> Self {
        Self { config, progress }
    }

    /// Run the whole pipeline.
    ///
    /// An invalid selection fails before any I/O. When nothing matches the
    /// request no file is written and [`BundleOutcome::Empty`] is returned.
    pub fn run(&self) -> Result<BundleOutcome> {
        let start = Instant::now();
        let request = self.config.selection()?;

        let output_file = self.config.resolved_output_file();
        let collector = FileCollector::new(
            &self.config.root,
            &self.config.exclude_dirs,
            Some(&output_file),
            Arc::clone(&self.progress),
        )?;
        let files = collector.collect(&request)?;

        if files.is_empty() {
            info!("no files matched the request");
            return Ok(BundleOutcome::Empty);
        }

        let ordered = self.config.sort.order(&files);

        let archive =
            ArchiveWriter::new(&output_file, Arc::clone(&self.progress)).write(&ordered)?;

        self.progress.set_prefix("📝 Annotating");
        let annotation =
            Annotator::new(&output_file, self.config.annotate_options()).annotate(&ordered)?;

        let output_size = fs::metadata(&output_file)?.len();

        Ok(BundleOutcome::Written(BundleSummary {
            output_file,
            archive,
            annotation,
            output_size,
            duration: start.elapsed(),
        }))
    }
}
