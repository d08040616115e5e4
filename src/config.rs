/*!
 * Configuration handling for srcbundle
 */

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args as ClapArgs, Parser, Subcommand};
use clap_complete::Shell;

use crate::annotator::AnnotateOptions;
use crate::error::Result;
use crate::types::{SelectionRequest, SortMode};
use crate::{bail, ensure};

/// Command-line arguments for srcbundle
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "srcbundle",
    version = env!("CARGO_PKG_VERSION"),
    about = "Bundle code files to a single file",
    long_about = "Collects source files of the requested languages from the current directory into a zip archive, optionally followed by the sources as comments and an author line. Arguments can be read from a response file with @path."
)]
pub struct Args {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[clap(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Bundle code files to a single file
    Bundle(BundleArgs),

    /// Create a response file with the command options
    #[clap(name = "create-rsp")]
    CreateRsp(CreateRspArgs),

    /// Generate shell completions
    Completions {
        /// Target shell
        #[clap(value_enum)]
        shell: Shell,
    },
}

/// Arguments of the `bundle` command
#[derive(ClapArgs, Debug, Clone, PartialEq, Eq)]
pub struct BundleArgs {
    /// List of programming languages. If 'all' is chosen, all code files will be included
    #[clap(short, long = "language", num_args = 1.., value_delimiter = ',')]
    pub languages: Vec<String>,

    /// Output file name for the bundle
    #[clap(short, long)]
    pub output: PathBuf,

    /// Include the source code as comments in the bundle file
    #[clap(short, long)]
    pub note: bool,

    /// Order of copying code files: by file name or by code type
    #[clap(short, long, value_enum, default_value_t = SortMode::default())]
    pub sort: SortMode,

    /// Remove empty lines from included source code
    #[clap(short, long)]
    pub remove_empty_lines: bool,

    /// Record the name of the file creator
    #[clap(short, long)]
    pub author: Option<String>,

    /// Additional directory names to skip (bin and debug are always skipped)
    #[clap(long = "exclude-dir", value_delimiter = ',')]
    pub exclude_dirs: Vec<String>,
}

/// Arguments of the `create-rsp` command
#[derive(ClapArgs, Debug, Clone)]
pub struct CreateRspArgs {
    /// Where to write the response file
    #[clap(long, default_value = "response.rsp")]
    pub path: PathBuf,
}

/// Bundling configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory that is scanned
    pub root: PathBuf,

    /// Bundle file path
    pub output_file: PathBuf,

    /// Raw language tokens in the order given
    pub languages: Vec<String>,

    /// Append sources as comments
    pub include_source: bool,

    /// Order of archive entries and source blocks
    pub sort: SortMode,

    /// Strip blank lines from appended sources
    pub remove_empty_lines: bool,

    /// Author to record
    pub author: Option<String>,

    /// Extra excluded directory names
    pub exclude_dirs: Vec<String>,
}

impl Config {
    /// Create configuration from `bundle` arguments, scanning `root`
    pub fn from_args(args: BundleArgs, root: PathBuf) -> Self {
        let output_file = if args.output.is_absolute() {
            args.output
        } else {
            root.join(args.output)
        };

        Self {
            root,
            output_file,
            languages: args.languages,
            include_source: args.note,
            sort: args.sort,
            remove_empty_lines: args.remove_empty_lines,
            author: args.author,
            exclude_dirs: args.exclude_dirs,
        }
    }

    /// Parse the language tokens
    pub fn selection(&self) -> Result<SelectionRequest> {
        SelectionRequest::parse(&self.languages)
    }

    /// Annotation options derived from this configuration
    pub fn annotate_options(&self) -> AnnotateOptions {
        AnnotateOptions {
            include_source: self.include_source,
            strip_empty_lines: self.remove_empty_lines,
            author: self.author.clone(),
        }
    }

    /// Absolute output path with its directory resolved through symlinks,
    /// so it can be compared against collected paths
    pub fn resolved_output_file(&self) -> PathBuf {
        let parent = self.output_file.parent().unwrap_or_else(|| Path::new(""));
        match (fs::canonicalize(parent), self.output_file.file_name()) {
            (Ok(dir), Some(name)) => dir.join(name),
            _ => self.output_file.clone(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // Selection problems are reported before touching the filesystem
        self.selection()?;

        ensure!(
            self.root.is_dir(),
            Config,
            "Target directory not found: {}",
            self.root.display()
        );

        if self.output_file.file_name().is_none() {
            bail!(
                Config,
                "Output path has no file name: {}",
                self.output_file.display()
            );
        }

        if let Some(parent) = self.output_file.parent() {
            ensure!(
                parent.as_os_str().is_empty() || parent.is_dir(),
                Config,
                "Output directory not found: {}",
                parent.display()
            );
        }

        ensure!(
            !self.output_file.is_dir(),
            Config,
            "Output path is a directory: {}",
            self.output_file.display()
        );

        Ok(())
    }
}
