/*!
 * Language registry: the closed set of supported languages and their extensions
 */

use std::collections::HashMap;

use once_cell::sync::Lazy;
use strum::{Display, EnumIter, IntoEnumIterator};

/// Programming languages recognized by the bundler
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, Display)]
pub enum Language {
    C,
    CPlusPlus,
    CSharp,
    Java,
    Python,
    JavaScript,
    Ruby,
    #[strum(to_string = "PHP")]
    Php,
    Swift,
    Go,
    Kotlin,
    Rust,
    TypeScript,
    Scala,
    Perl,
    Haskell,
    Elixir,
    Dart,
    Lua,
    ObjectiveC,
    R,
    Shell,
    #[strum(to_string = "SQL")]
    Sql,
    Groovy,
    FSharp,
    VisualBasic,
    Assembly,
}

impl Language {
    /// Lowercase, dot-prefixed extensions recognized for this language
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Language::C => &[".c"],
            Language::CPlusPlus => &[".cpp", ".cxx"],
            Language::CSharp => &[".cs"],
            Language::Java => &[".java"],
            Language::Python => &[".py"],
            Language::JavaScript => &[".js"],
            Language::Ruby => &[".rb"],
            Language::Php => &[".php"],
            Language::Swift => &[".swift"],
            Language::Go => &[".go"],
            Language::Kotlin => &[".kt", ".kts"],
            Language::Rust => &[".rs"],
            Language::TypeScript => &[".ts"],
            Language::Scala => &[".scala"],
            Language::Perl => &[".pl"],
            Language::Haskell => &[".hs"],
            Language::Elixir => &[".ex", ".exs"],
            Language::Dart => &[".dart"],
            Language::Lua => &[".lua"],
            Language::ObjectiveC => &[".m"],
            Language::R => &[".r"],
            Language::Shell => &[".sh"],
            Language::Sql => &[".sql"],
            Language::Groovy => &[".groovy", ".gvy"],
            Language::FSharp => &[".fs", ".fsi"],
            Language::VisualBasic => &[".vb"],
            Language::Assembly => &[".asm", ".s"],
        }
    }

    /// Parse a user token into a language, ignoring case
    pub fn parse(token: &str) -> Option<Language> {
        let token = token.trim().to_ascii_lowercase();
        if token.is_empty() {
            return None;
        }
        LANGUAGE_NAMES.get(token.as_str()).copied()
    }

    /// Find the language owning an extension such as `.py` or `PY`
    pub fn from_extension(ext: &str) -> Option<Language> {
        let ext = normalize_extension(ext)?;
        EXTENSION_TABLE.get(ext.as_str()).copied()
    }

    /// Whether `ext` belongs to this language
    pub fn has_extension(self, ext: &str) -> bool {
        normalize_extension(ext).map_or(false, |ext| self.extensions().contains(&ext.as_str()))
    }
}

/// Whether the token names a known language (case-insensitive)
pub fn is_known_language(token: &str) -> bool {
    Language::parse(token).is_some()
}

/// Whether the extension belongs to any known language
pub fn is_known_extension(ext: &str) -> bool {
    Language::from_extension(ext).is_some()
}

/// Lowercase an extension and make sure it carries a leading dot
fn normalize_extension(ext: &str) -> Option<String> {
    let trimmed = ext.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        return None;
    }
    Some(format!(".{}", trimmed.to_ascii_lowercase()))
}

static EXTENSION_TABLE: Lazy<HashMap<&'static str, Language>> = Lazy::new(|| {
    Language::iter()
        .flat_map(|lang| lang.extensions().iter().map(move |ext| (*ext, lang)))
        .collect()
});

static LANGUAGE_NAMES: Lazy<HashMap<String, Language>> = Lazy::new(|| {
    let mut names = HashMap::new();
    for lang in Language::iter() {
        names.insert(lang.to_string().to_ascii_lowercase(), lang);
        names.insert(format!("{:?}", lang).to_ascii_lowercase(), lang);
    }
    names
});
