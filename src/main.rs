/*!
 * Command-line interface for srcbundle
 */

use std::io::{self, IsTerminal};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};

use srcbundle::config::{Args, BundleArgs, Command, Config, CreateRspArgs};
use srcbundle::report::{ReportFormat, Reporter};
use srcbundle::rsp;
use srcbundle::{Bundler, Result};

fn main() -> ExitCode {
    let argv = match rsp::expand_args(std::env::args_os()) {
        Ok(argv) => argv,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let args = Args::parse_from(argv);
    srcbundle::init_logging(args.verbose);

    let result = match args.command {
        Command::Bundle(bundle) => run_bundle(bundle),
        Command::CreateRsp(create) => run_create_rsp(create),
        Command::Completions { shell } => {
            clap_complete::generate(shell, &mut Args::command(), "srcbundle", &mut io::stdout());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_bundle(args: BundleArgs) -> Result<()> {
    // Create configuration
    let root = std::env::current_dir()?;
    let config = Config::from_args(args, root);

    // Validate configuration
    config.validate()?;

    // Spinner only when a person is watching stderr
    let progress = if io::stderr().is_terminal() {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos} files")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        bar
    } else {
        ProgressBar::hidden()
    };

    // Collect, archive and annotate
    let bundler = Bundler::new(config, Arc::new(progress.clone()));
    let outcome = bundler.run();

    // Clear the progress bar
    progress.finish_and_clear();

    // Tables for terminals, status lines for pipes
    let format = if io::stdout().is_terminal() {
        ReportFormat::ConsoleTable
    } else {
        ReportFormat::Plain
    };
    Reporter::new(format).print_report(&outcome?);
    Ok(())
}

fn run_create_rsp(args: CreateRspArgs) -> Result<()> {
    let stdin = io::stdin();
    let options = rsp::prompt_options(stdin.lock(), io::stdout())?;
    rsp::write_response_file(&args.path, &options)?;
    println!("Response file created at: {}", args.path.display());
    Ok(())
}
