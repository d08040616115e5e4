/*!
 * Path eligibility rules
 */

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use crate::language::{is_known_extension, Language};
use crate::utils::EXCLUDED_DIRS;

/// Decides which discovered files may enter a bundle
#[derive(Debug, Clone)]
pub struct PathFilter {
    /// Scan root that exclusion checks are relative to
    root: PathBuf,
    /// Excluded directory names, lowercased
    excluded_dirs: Vec<String>,
    /// Path that must never be picked up (the bundle itself)
    output_file: Option<PathBuf>,
}

impl PathFilter {
    /// Create a filter with the default exclusion list
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            excluded_dirs: EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
            output_file: None,
        }
    }

    /// Exclude additional directory names
    pub fn with_excluded_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for dir in dirs {
            let dir = dir.as_ref().trim().trim_matches('/').to_lowercase();
            if !dir.is_empty() && !self.excluded_dirs.contains(&dir) {
                self.excluded_dirs.push(dir);
            }
        }
        self
    }

    /// Never report `path` as eligible
    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }

    /// Scan root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether a single directory name is on the exclusion list
    pub fn is_excluded_dir_name(&self, name: &OsStr) -> bool {
        let name = name.to_string_lossy().to_lowercase();
        self.excluded_dirs.iter().any(|d| *d == name)
    }

    /// Whether any directory between the root and `path` is excluded
    pub fn is_excluded(&self, path: &Path) -> bool {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        let Some(parent) = rel.parent() else {
            return false;
        };
        parent.components().any(|c| match c {
            Component::Normal(name) => self.is_excluded_dir_name(name),
            _ => false,
        })
    }

    /// Whether `path` is the bundle output file
    pub fn is_output_file(&self, path: &Path) -> bool {
        self.output_file.as_deref() == Some(path)
    }

    /// Whether `path` has any recognized extension and passes exclusion
    pub fn is_eligible(&self, path: &Path) -> bool {
        if self.is_excluded(path) || self.is_output_file(path) {
            return false;
        }
        extension_of(path).map_or(false, |ext| is_known_extension(&ext))
    }

    /// Whether `path` belongs to `language` and passes exclusion
    pub fn matches_language(&self, path: &Path, language: Language) -> bool {
        if self.is_excluded(path) || self.is_output_file(path) {
            return false;
        }
        extension_of(path).map_or(false, |ext| language.has_extension(&ext))
    }
}

/// Lowercased extension including the leading dot.
///
/// Everything after the last dot of the file name counts, so a bare `.py`
/// has the extension `.py`. A trailing dot means no extension.
pub fn extension_of(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_string_lossy();
    let dot = name.rfind('.')?;
    let ext = &name[dot + 1..];
    if ext.is_empty() {
        return None;
    }
    Some(format!(".{}", ext.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> PathFilter {
        PathFilter::new("/repo")
    }

    #[test]
    fn accepts_known_extensions_in_any_case() {
        let f = filter();
        assert!(f.is_eligible(Path::new("/repo/a.py")));
        assert!(f.is_eligible(Path::new("/repo/src/Main.JAVA")));
        assert!(!f.is_eligible(Path::new("/repo/notes.txt")));
    }

    #[test]
    fn rejects_files_without_extension() {
        let f = filter();
        assert!(!f.is_eligible(Path::new("/repo/Makefile")));
        assert!(!f.is_eligible(Path::new("/repo/script.")));
    }

    #[test]
    fn dot_named_files_use_the_text_after_the_dot() {
        let f = filter();
        assert_eq!(extension_of(Path::new("/repo/.py")).as_deref(), Some(".py"));
        assert_eq!(extension_of(Path::new("/repo/a.tar.GZ")).as_deref(), Some(".gz"));
        assert!(f.is_eligible(Path::new("/repo/.py")));
        assert!(f.matches_language(Path::new("/repo/.rs"), Language::Rust));
        assert!(!f.is_eligible(Path::new("/repo/.gitignore")));
    }

    #[test]
    fn excludes_build_and_debug_directories_at_any_depth() {
        let f = filter();
        assert!(!f.is_eligible(Path::new("/repo/bin/d.py")));
        assert!(!f.is_eligible(Path::new("/repo/src/BIN/d.py")));
        assert!(!f.is_eligible(Path::new("/repo/x/Debug/y/d.cs")));
        assert!(!f.matches_language(Path::new("/repo/bin/d.py"), Language::Python));
    }

    #[test]
    fn matches_whole_segments_only() {
        let f = filter();
        assert!(f.is_eligible(Path::new("/repo/binary/d.py")));
        assert!(f.is_eligible(Path::new("/repo/debugger/d.py")));
        // A file named like an excluded directory is fine.
        assert!(f.is_eligible(Path::new("/repo/bin.py")));
    }

    #[test]
    fn only_looks_below_the_root() {
        let f = PathFilter::new("/home/bin/repo");
        assert!(f.is_eligible(Path::new("/home/bin/repo/a.py")));
    }

    #[test]
    fn honors_extra_excluded_dirs() {
        let f = filter().with_excluded_dirs(["Vendor/", "obj"]);
        assert!(!f.is_eligible(Path::new("/repo/vendor/lib.js")));
        assert!(!f.is_eligible(Path::new("/repo/a/OBJ/x.cs")));
        assert!(f.is_eligible(Path::new("/repo/src/lib.js")));
    }

    #[test]
    fn skips_the_output_file() {
        let f = filter().with_output_file("/repo/bundle.py");
        assert!(!f.is_eligible(Path::new("/repo/bundle.py")));
        assert!(!f.matches_language(Path::new("/repo/bundle.py"), Language::Python));
        assert!(f.is_eligible(Path::new("/repo/other.py")));
    }

    #[test]
    fn matches_language_by_extension_set() {
        let f = filter();
        assert!(f.matches_language(Path::new("/repo/a.kts"), Language::Kotlin));
        assert!(f.matches_language(Path::new("/repo/a.KT"), Language::Kotlin));
        assert!(!f.matches_language(Path::new("/repo/a.py"), Language::Kotlin));
    }
}
