/*!
 * Response files: interactive creation and `@file` expansion
 *
 * A response file holds one argument per line, so values containing spaces
 * need no quoting. Blank lines and lines starting with `#` are ignored.
 */

use std::ffi::OsString;
use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use clap::ValueEnum;
use tracing::debug;

use crate::error::{BundleError, Result};
use crate::types::SortMode;
use crate::{bail, error};

/// Options captured for a `bundle` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseOptions {
    pub languages: Vec<String>,
    pub output: String,
    pub include_source: bool,
    pub sort: SortMode,
    pub remove_empty_lines: bool,
    pub author: String,
}

impl ResponseOptions {
    /// Equivalent `bundle` arguments
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec!["bundle".to_string(), "--language".to_string()];
        args.extend(self.languages.iter().cloned());
        args.push("--output".into());
        args.push(self.output.clone());
        if self.include_source {
            args.push("--note".into());
        }
        args.push("--sort".into());
        args.push(self.sort.to_string());
        if self.remove_empty_lines {
            args.push("--remove-empty-lines".into());
        }
        if !self.author.trim().is_empty() {
            args.push("--author".into());
            args.push(self.author.trim().to_string());
        }
        args
    }

    /// Response file contents
    pub fn render(&self) -> String {
        let mut text = self.to_args().join("\n");
        text.push('\n');
        text
    }
}

/// Ask for each option on `output`, reading answers line by line from `input`
pub fn prompt_options<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<ResponseOptions> {
    let mut ask = |question: &str| -> Result<String> {
        writeln!(output, "{}", question)?;
        output.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!(InvalidArgument, "no answer given for: {}", question);
        }
        Ok(line.trim().to_string())
    };

    let languages = split_languages(&ask(
        "Enter the programming languages (comma separated or 'all'):",
    )?);
    if languages.is_empty() {
        bail!(InvalidArgument, "at least one language or 'all' is required");
    }

    let output_file = ask("Enter the output file name:")?;
    if output_file.is_empty() {
        bail!(InvalidArgument, "an output file name is required");
    }

    let include_source = parse_bool(&ask("Include source code as comment? (true/false):")?)?;
    let sort_answer = ask("Sort files by (filename/type):")?;
    let sort = if sort_answer.is_empty() {
        SortMode::default()
    } else {
        SortMode::from_str(&sort_answer, true)
            .map_err(|_| error!(InvalidArgument, "unknown sort order '{}'", sort_answer))?
    };
    let remove_empty_lines = parse_bool(&ask("Remove empty lines? (true/false):")?)?;
    let author = ask("Enter author's name:")?;

    Ok(ResponseOptions {
        languages,
        output: output_file,
        include_source,
        sort,
        remove_empty_lines,
        author,
    })
}

/// Write `options` to a response file
pub fn write_response_file(path: &Path, options: &ResponseOptions) -> Result<()> {
    fs::write(path, options.render())?;
    debug!(path = %path.display(), "response file written");
    Ok(())
}

/// Replace every `@path` argument with the arguments stored in that file
pub fn expand_args<I>(args: I) -> Result<Vec<OsString>>
where
    I: IntoIterator<Item = OsString>,
{
    let mut expanded = Vec::new();
    for arg in args {
        let response_path = arg
            .to_str()
            .and_then(|s| s.strip_prefix('@'))
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        match response_path {
            Some(path) => {
                let text = fs::read_to_string(&path).map_err(|e| {
                    error!(InvalidArgument, "cannot read response file {}: {}", path, e)
                })?;
                expanded.extend(parse_response_text(&text).into_iter().map(OsString::from));
            }
            None => expanded.push(arg),
        }
    }
    Ok(expanded)
}

fn parse_response_text(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

fn split_languages(answer: &str) -> Vec<String> {
    answer
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(answer: &str) -> Result<bool> {
    match answer.to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Ok(true),
        "false" | "f" | "no" | "n" | "0" | "" => Ok(false),
        other => Err(BundleError::InvalidArgument(format!(
            "expected true or false, got '{}'",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn answers(lines: &[&str]) -> Cursor<Vec<u8>> {
        Cursor::new(lines.join("\n").into_bytes())
    }

    #[test]
    fn prompts_for_every_option() -> Result<()> {
        let mut transcript = Vec::new();
        let options = prompt_options(
            answers(&["python, js", "out.zip", "true", "type", "no", "Ada Lovelace"]),
            &mut transcript,
        )?;

        assert_eq!(
            options,
            ResponseOptions {
                languages: vec!["python".into(), "js".into()],
                output: "out.zip".into(),
                include_source: true,
                sort: SortMode::Type,
                remove_empty_lines: false,
                author: "Ada Lovelace".into(),
            }
        );
        let transcript = String::from_utf8(transcript).unwrap();
        assert!(transcript.contains("Enter the output file name:"));
        assert!(transcript.contains("Enter author's name:"));
        Ok(())
    }

    #[test]
    fn rejects_invalid_boolean() {
        let err = prompt_options(answers(&["all", "out.zip", "maybe"]), Vec::new()).unwrap_err();
        assert!(matches!(err, BundleError::InvalidArgument(_)));
    }

    #[test]
    fn rejects_truncated_input() {
        let err = prompt_options(answers(&["all"]), Vec::new()).unwrap_err();
        assert!(matches!(err, BundleError::InvalidArgument(_)));
    }

    #[test]
    fn renders_one_argument_per_line() {
        let options = ResponseOptions {
            languages: vec!["all".into()],
            output: "my bundle.zip".into(),
            include_source: false,
            sort: SortMode::Name,
            remove_empty_lines: true,
            author: "".into(),
        };
        assert_eq!(
            options.render(),
            "bundle\n--language\nall\n--output\nmy bundle.zip\n--sort\nname\n--remove-empty-lines\n"
        );
    }

    #[test]
    fn expands_response_files_in_place() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let rsp = temp.path().join("response.rsp");
        let options = ResponseOptions {
            languages: vec!["rust".into(), "go".into()],
            output: "b.zip".into(),
            include_source: true,
            sort: SortMode::Name,
            remove_empty_lines: false,
            author: "Grace Hopper".into(),
        };
        write_response_file(&rsp, &options)?;

        let args = vec![
            OsString::from("srcbundle"),
            OsString::from("-v"),
            OsString::from(format!("@{}", rsp.display())),
        ];
        let expanded = expand_args(args)?;

        let mut expected = vec!["srcbundle".to_string(), "-v".to_string()];
        expected.extend(options.to_args());
        assert_eq!(
            expanded,
            expected.into_iter().map(OsString::from).collect::<Vec<_>>()
        );
        Ok(())
    }

    #[test]
    fn ignores_comments_and_blank_lines() {
        assert_eq!(
            parse_response_text("# saved\nbundle\n\n  --note  \n"),
            vec!["bundle", "--note"]
        );
    }

    #[test]
    fn missing_response_file_is_an_error() {
        let err = expand_args(vec![OsString::from("@/no/such/file.rsp")]).unwrap_err();
        assert!(matches!(err, BundleError::InvalidArgument(_)));
    }

    #[test]
    fn lone_at_sign_is_kept() -> Result<()> {
        assert_eq!(
            expand_args(vec![OsString::from("@")])?,
            vec![OsString::from("@")]
        );
        Ok(())
    }
}
