/*!
 * Directory walking and candidate file selection
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::ProgressBar;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::Result;
use crate::filter::PathFilter;
use crate::types::{CandidateSet, LanguageToken, SelectionRequest};

/// Collects the files a selection request refers to
pub struct FileCollector {
    /// Eligibility rules, rooted at the canonical scan root
    filter: PathFilter,
    /// Progress spinner
    progress: Arc<ProgressBar>,
}

impl FileCollector {
    /// Create a collector for `root`.
    ///
    /// The root is canonicalized so every collected path is absolute.
    pub fn new(
        root: &Path,
        excluded_dirs: &[String],
        output_file: Option<&Path>,
        progress: Arc<ProgressBar>,
    ) -> Result<Self> {
        let root = fs::canonicalize(root)?;
        let mut filter = PathFilter::new(root).with_excluded_dirs(excluded_dirs);
        if let Some(output) = output_file {
            filter = filter.with_output_file(output);
        }
        Ok(Self { filter, progress })
    }

    /// Canonical scan root
    pub fn root(&self) -> &Path {
        self.filter.root()
    }

    /// Build the candidate set for `request`
    pub fn collect(&self, request: &SelectionRequest) -> Result<CandidateSet> {
        for raw in request.unknown_tokens() {
            warn!(token = %raw, "unrecognized language ignored");
        }

        let files = self.walk()?;
        let mut selected = CandidateSet::new();

        // `all` already covers every language token
        if request.includes_all() {
            selected.extend(files.iter().filter(|p| self.filter.is_eligible(p)).cloned());
        } else {
            for token in request.tokens() {
                let LanguageToken::Known(lang) = token else {
                    continue;
                };
                let before = selected.len();
                selected.extend(
                    files
                        .iter()
                        .filter(|p| self.filter.matches_language(p, *lang))
                        .cloned(),
                );
                debug!(token = %token, added = selected.len() - before, "selected files");
            }
        }

        info!(
            root = %self.root().display(),
            scanned = files.len(),
            selected = selected.len(),
            "collection finished"
        );
        Ok(selected)
    }

    /// List every regular file (or link to one) under the root, skipping excluded directories
    fn walk(&self) -> Result<Vec<PathBuf>> {
        self.progress.set_prefix("🔎 Scanning");
        let root = self.root().to_path_buf();
        let mut files = Vec::new();

        let walker = WalkDir::new(&root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0
                    || !(e.file_type().is_dir() && self.filter.is_excluded_dir_name(e.file_name()))
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if entry.file_type().is_file() || is_file_link(&entry) {
                self.progress.inc(1);
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }
}

/// Whether a symlink entry points at a regular file
fn is_file_link(entry: &DirEntry) -> bool {
    entry.path_is_symlink() && fs::metadata(entry.path()).map_or(false, |m| m.is_file())
}
