/*!
 * Core types and data structures for the srcbundle application
 */

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;
use strum::Display;

use crate::error::{BundleError, Result};
use crate::language::Language;

/// Token selecting every recognized extension
pub const ALL_TOKEN: &str = "all";

/// Deduplicated set of absolute paths selected for bundling
pub type CandidateSet = BTreeSet<PathBuf>;

/// A single user-supplied language token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageToken {
    /// The literal `all`
    All,
    /// A recognized language name
    Known(Language),
    /// Anything else; contributes no files
    Unknown(String),
}

impl LanguageToken {
    /// Classify a raw token
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case(ALL_TOKEN) {
            return LanguageToken::All;
        }
        match Language::parse(raw) {
            Some(lang) => LanguageToken::Known(lang),
            None => LanguageToken::Unknown(raw.to_string()),
        }
    }
}

impl fmt::Display for LanguageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageToken::All => f.write_str(ALL_TOKEN),
            LanguageToken::Known(lang) => write!(f, "{}", lang),
            LanguageToken::Unknown(raw) => f.write_str(raw),
        }
    }
}

/// Validated, ordered sequence of language tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRequest {
    tokens: Vec<LanguageToken>,
}

impl SelectionRequest {
    /// Parse and validate raw tokens.
    ///
    /// Rejects an empty request and a request made of a single token that is
    /// neither `all` nor a recognized language. Unknown tokens alongside
    /// other tokens are kept and stay inert.
    pub fn parse<S: AsRef<str>>(raw: &[S]) -> Result<Self> {
        let tokens: Vec<LanguageToken> = raw
            .iter()
            .map(|s| s.as_ref())
            .filter(|s| !s.trim().is_empty())
            .map(LanguageToken::parse)
            .collect();

        match tokens.as_slice() {
            [] => Err(BundleError::InvalidSelection(String::new())),
            [LanguageToken::Unknown(raw)] => Err(BundleError::InvalidSelection(format!(
                "unknown language '{}'",
                raw
            ))),
            _ => Ok(Self { tokens }),
        }
    }

    /// Tokens in the order they were given
    pub fn tokens(&self) -> &[LanguageToken] {
        &self.tokens
    }

    /// Whether `all` was requested
    pub fn includes_all(&self) -> bool {
        self.tokens.iter().any(|t| *t == LanguageToken::All)
    }

    /// Tokens that will not select anything
    pub fn unknown_tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().filter_map(|t| match t {
            LanguageToken::Unknown(raw) => Some(raw.as_str()),
            _ => None,
        })
    }
}

/// Order in which files are copied into the bundle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SortMode {
    /// Alphabetical by file name
    #[default]
    #[value(alias = "filename")]
    Name,
    /// Grouped by code type (extension), then by file name
    #[value(alias = "language")]
    Type,
}

impl SortMode {
    /// Order a candidate set for writing
    pub fn order(self, files: &CandidateSet) -> Vec<PathBuf> {
        let mut ordered: Vec<PathBuf> = files.iter().cloned().collect();
        match self {
            SortMode::Name => ordered.sort_by(|a, b| {
                file_name_key(a)
                    .cmp(&file_name_key(b))
                    .then_with(|| a.cmp(b))
            }),
            SortMode::Type => ordered.sort_by(|a, b| {
                extension_key(a)
                    .cmp(&extension_key(b))
                    .then_with(|| file_name_key(a).cmp(&file_name_key(b)))
                    .then_with(|| a.cmp(b))
            }),
        }
        ordered
    }
}

fn file_name_key(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_lowercase()
}

fn extension_key(path: &Path) -> String {
    path.extension()
        .unwrap_or_default()
        .to_string_lossy()
        .to_lowercase()
}

/// An entry written to the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Entry name inside the archive (base file name)
    pub name: String,
    /// File the entry was copied from
    pub source: PathBuf,
    /// Uncompressed size in bytes
    pub size: u64,
}

/// Result of writing the archive
#[derive(Debug, Clone, Default)]
pub struct ArchiveReport {
    /// Entries in archive order
    pub entries: Vec<ArchiveEntry>,
    /// Number of files dropped because a later file had the same base name
    pub collisions: usize,
}

/// Result of the annotation stage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationSummary {
    /// Number of source blocks appended
    pub source_blocks: usize,
    /// Author line that was appended, if any
    pub author: Option<String>,
    /// Bytes appended after the archive
    pub bytes_appended: u64,
}

/// Details of a completed bundle
#[derive(Debug, Clone)]
pub struct BundleSummary {
    /// Bundle file path
    pub output_file: PathBuf,
    /// Archive details
    pub archive: ArchiveReport,
    /// Annotation details
    pub annotation: AnnotationSummary,
    /// Final size of the bundle file
    pub output_size: u64,
    /// Time taken by the whole pipeline
    pub duration: Duration,
}

/// Outcome of a bundling run
#[derive(Debug, Clone)]
pub enum BundleOutcome {
    /// No file matched the request; nothing was written
    Empty,
    /// The bundle was written
    Written(BundleSummary),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_request() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            SelectionRequest::parse(&empty),
            Err(BundleError::InvalidSelection(_))
        ));
        assert!(matches!(
            SelectionRequest::parse(&["  "]),
            Err(BundleError::InvalidSelection(_))
        ));
    }

    #[test]
    fn rejects_single_unknown_token() {
        assert!(matches!(
            SelectionRequest::parse(&["cobol"]),
            Err(BundleError::InvalidSelection(_))
        ));
    }

    #[test]
    fn rejects_short_names_that_are_not_languages() {
        for token in ["js", "cs", "py"] {
            assert!(
                matches!(
                    SelectionRequest::parse(&[token]),
                    Err(BundleError::InvalidSelection(_))
                ),
                "{} should be rejected",
                token
            );
        }
        let request = SelectionRequest::parse(&["javascript", "js"]).unwrap();
        assert_eq!(request.unknown_tokens().collect::<Vec<_>>(), vec!["js"]);
    }

    #[test]
    fn keeps_unknown_tokens_next_to_valid_ones() {
        let request = SelectionRequest::parse(&["python", "cobol"]).unwrap();
        assert_eq!(
            request.tokens(),
            &[
                LanguageToken::Known(Language::Python),
                LanguageToken::Unknown("cobol".into())
            ]
        );
        assert_eq!(request.unknown_tokens().collect::<Vec<_>>(), vec!["cobol"]);
        assert!(!request.includes_all());
    }

    #[test]
    fn multiple_unknown_tokens_are_accepted_but_inert() {
        let request = SelectionRequest::parse(&["cobol", "fortran"]).unwrap();
        assert_eq!(request.unknown_tokens().count(), 2);
    }

    #[test]
    fn recognizes_all_case_insensitively() {
        let request = SelectionRequest::parse(&["ALL"]).unwrap();
        assert!(request.includes_all());
        assert_eq!(request.tokens()[0].to_string(), "all");
    }

    #[test]
    fn sorts_by_name_and_type() {
        let files: CandidateSet = ["/r/z/a.py", "/r/b.js", "/r/c.py", "/r/A.rs"]
            .iter()
            .map(PathBuf::from)
            .collect();

        let by_name = SortMode::Name.order(&files);
        assert_eq!(
            by_name,
            vec![
                PathBuf::from("/r/z/a.py"),
                PathBuf::from("/r/A.rs"),
                PathBuf::from("/r/b.js"),
                PathBuf::from("/r/c.py"),
            ]
        );

        let by_type = SortMode::Type.order(&files);
        assert_eq!(
            by_type,
            vec![
                PathBuf::from("/r/b.js"),
                PathBuf::from("/r/z/a.py"),
                PathBuf::from("/r/c.py"),
                PathBuf::from("/r/A.rs"),
            ]
        );
    }

    #[test]
    fn sort_mode_accepts_aliases() {
        assert_eq!(SortMode::from_str("filename", true), Ok(SortMode::Name));
        assert_eq!(SortMode::from_str("TYPE", true), Ok(SortMode::Type));
        assert_eq!(SortMode::Type.to_string(), "type");
    }
}
