/*!
 * Appends source listings and the author line after the archive
 *
 * The bundle is a zip archive followed by plain text. Readers that tolerate
 * trailing bytes still open the archive part.
 */

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{BundleError, Result};
use crate::types::AnnotationSummary;
use crate::utils::strip_empty_lines;

/// What to append after the archive
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotateOptions {
    /// Append each file's text as a labeled block
    pub include_source: bool,
    /// Remove blank lines from appended text
    pub strip_empty_lines: bool,
    /// Author to record; ignored when blank
    pub author: Option<String>,
}

impl AnnotateOptions {
    fn author(&self) -> Option<&str> {
        self.author
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
    }

    /// Whether any text will be appended
    pub fn is_active(&self) -> bool {
        self.include_source || self.author().is_some()
    }
}

/// Appends annotation text to a finished bundle
pub struct Annotator {
    output_file: PathBuf,
    options: AnnotateOptions,
}

impl Annotator {
    pub fn new(output_file: impl Into<PathBuf>, options: AnnotateOptions) -> Self {
        Self {
            output_file: output_file.into(),
            options,
        }
    }

    /// Render and append the annotation for `files`.
    ///
    /// Every source file is read before anything is appended, so a read
    /// failure leaves the bundle untouched.
    pub fn annotate(&self, files: &[PathBuf]) -> Result<AnnotationSummary> {
        if !self.options.is_active() {
            return Ok(AnnotationSummary::default());
        }

        let mut text = String::new();
        let mut source_blocks = 0;

        if self.options.include_source {
            for path in files {
                text.push_str(&self.render_source(path)?);
                source_blocks += 1;
            }
        }

        let author = self.options.author().map(str::to_string);
        if let Some(author) = &author {
            text.push_str(&render_author(author));
        }

        self.append(&text)?;
        info!(
            output = %self.output_file.display(),
            source_blocks,
            bytes = text.len(),
            "annotation appended"
        );

        Ok(AnnotationSummary {
            source_blocks,
            author,
            bytes_appended: text.len() as u64,
        })
    }

    /// Render the labeled block for a single source file
    pub fn render_source(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).map_err(|source| BundleError::SourceRead {
            path: path.to_path_buf(),
            source,
        })?;
        let content = String::from_utf8_lossy(&bytes);
        let content = if self.options.strip_empty_lines {
            strip_empty_lines(&content)
        } else {
            content.into_owned()
        };
        Ok(format!(
            "// Source code from {}\n{}\n\n",
            path.display(),
            content
        ))
    }

    fn append(&self, text: &str) -> Result<()> {
        let annotate_err = |source| BundleError::Annotate {
            path: self.output_file.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.output_file)
            .map_err(annotate_err)?;
        file.write_all(text.as_bytes()).map_err(annotate_err)?;
        file.flush().map_err(annotate_err)
    }
}

fn render_author(author: &str) -> String {
    format!("// Author: {}\n", author)
}
