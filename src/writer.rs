/*!
 * Zip archive writer for srcbundle
 */

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::sync::Arc;

use indicatif::ProgressBar;
use tracing::{debug, warn};
use zip::result::ZipResult;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{BundleError, Result};
use crate::types::{ArchiveEntry, ArchiveReport};

/// A planned archive entry before any bytes are written
#[derive(Debug, Clone, PartialEq, Eq)]
struct PlannedEntry {
    name: String,
    source: PathBuf,
}

/// Writes selected files into a fresh zip archive
pub struct ArchiveWriter {
    /// Archive path; replaced if it exists
    output_file: PathBuf,
    /// Progress bar
    progress: Arc<ProgressBar>,
}

impl ArchiveWriter {
    /// Create a new archive writer
    pub fn new(output_file: impl Into<PathBuf>, progress: Arc<ProgressBar>) -> Self {
        Self {
            output_file: output_file.into(),
            progress,
        }
    }

    /// Write `files` as entries named by their base names.
    ///
    /// The archive is finished and closed before this returns.
    pub fn write(&self, files: &[PathBuf]) -> Result<ArchiveReport> {
        let (plan, collisions) = plan_entries(files);

        self.progress.set_prefix("📦 Archiving");
        self.progress.set_length(plan.len() as u64);
        self.progress.set_position(0);

        let entries = self
            .write_entries(&plan)
            .map_err(|source| BundleError::Archive {
                path: self.output_file.clone(),
                source,
            })?;

        Ok(ArchiveReport {
            entries,
            collisions,
        })
    }

    fn write_entries(&self, plan: &[PlannedEntry]) -> ZipResult<Vec<ArchiveEntry>> {
        let file = File::create(&self.output_file)?;
        let mut zip = ZipWriter::new(BufWriter::new(file));
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);

        let mut entries = Vec::with_capacity(plan.len());
        for item in plan {
            self.progress.set_message(item.name.clone());
            zip.start_file(item.name.as_str(), options)?;
            let mut source = File::open(&item.source)?;
            let size = io::copy(&mut source, &mut zip)?;
            debug!(entry = %item.name, source = %item.source.display(), size, "archived");
            entries.push(ArchiveEntry {
                name: item.name.clone(),
                source: item.source.clone(),
                size,
            });
            self.progress.inc(1);
        }

        let mut writer = zip.finish()?;
        io::Write::flush(&mut writer)?;
        Ok(entries)
    }
}

/// Map files to entry names; a later file with the same base name replaces an
/// earlier one but keeps its position.
fn plan_entries(files: &[PathBuf]) -> (Vec<PlannedEntry>, usize) {
    let mut plan: Vec<PlannedEntry> = Vec::with_capacity(files.len());
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut collisions = 0;

    for path in files {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        match positions.get(&name) {
            Some(&idx) => {
                warn!(
                    entry = %name,
                    replaced = %plan[idx].source.display(),
                    by = %path.display(),
                    "duplicate file name, last one wins"
                );
                plan[idx].source = path.clone();
                collisions += 1;
            }
            None => {
                positions.insert(name.clone(), plan.len());
                plan.push(PlannedEntry {
                    name,
                    source: path.clone(),
                });
            }
        }
    }

    (plan, collisions)
}
