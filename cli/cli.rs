use pathmark_core::syntax::SYNTAX_TABLE;
use pathmark_core::{
    CliArgs, Command as CoreCommand, FileStatus, FsWorkspace, LogSink, OperationMode, Outcome,
    PathmarkArgs, ProcessedFileResult, SettingsOverrides, discover_root, find_files,
    process_files,
};
mod interaction;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use console::style;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

fn print_completions_cli(shell: clap_complete::Shell) {
    let mut cmd = CliArgs::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
}

fn init_logging(args: &PathmarkArgs) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if args.quiet {
        builder.filter_level(log::LevelFilter::Error);
    } else if args.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn print_languages() {
    for (id, syntax) in SYNTAX_TABLE {
        println!("  {:<16} {}", id, style(syntax.render("src/example")).dim());
    }
}

fn build_workspace(args: &PathmarkArgs) -> Result<FsWorkspace> {
    let folders = if args.root.is_empty() {
        let target = args
            .path
            .canonicalize()
            .with_context(|| format!("Resolve: {}", args.path.display()))?;
        vec![discover_root(&target)]
    } else {
        args.root
            .iter()
            .map(|r| {
                r.canonicalize()
                    .with_context(|| format!("Workspace folder: {}", r.display()))
            })
            .collect::<Result<Vec<PathBuf>>>()?
    };
    for folder in &folders {
        log::debug!("Workspace folder: {}", folder.display());
    }
    let overrides = SettingsOverrides {
        include_paths: (!args.include_path.is_empty()).then(|| args.include_path.clone()),
        separator: args.separator,
    };
    Ok(FsWorkspace::new(folders).with_overrides(overrides))
}

#[derive(Default)]
struct Tally {
    inserted: usize,
    replaced: usize,
    unchanged: usize,
    skipped: usize,
    pending: usize,
    failed: usize,
}

fn report(results: &[ProcessedFileResult], quiet: bool) -> Tally {
    let mut tally = Tally::default();
    let single = results.len() == 1;
    for result in results {
        let path = style(result.path.display()).dim();
        match &result.status {
            FileStatus::Inserted => tally.inserted += 1,
            FileStatus::Replaced(_) => tally.replaced += 1,
            FileStatus::Unchanged => tally.unchanged += 1,
            FileStatus::Skipped(skip) => {
                tally.skipped += 1;
                if single && !quiet {
                    println!("  Skipped: {} - {}", path, skip);
                }
            }
            FileStatus::Pending(outcome) => {
                tally.pending += 1;
                let what = match outcome {
                    Outcome::Replace(line) => format!("stale header ({})", line),
                    _ => "missing header".to_string(),
                };
                if !quiet {
                    println!("  {} {} - {}", style("✗").yellow(), path, what);
                }
            }
            FileStatus::Failed(msg) => {
                tally.failed += 1;
                eprintln!(
                    "  {} Failed: {} - {}",
                    style("⚠️").yellow(),
                    path,
                    style(msg).red()
                );
            }
        }
    }
    tally
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli: CliArgs = CliArgs::parse();

    if let Some(command_enum_val) = cli.command {
        match command_enum_val {
            CoreCommand::Completion(args) => {
                print_completions_cli(args.shell);
                return Ok(ExitCode::SUCCESS);
            }
        }
    }

    let main_app_args = cli.main_opts;
    init_logging(&main_app_args);

    if main_app_args.list_languages {
        print_languages();
        return Ok(ExitCode::SUCCESS);
    }

    let files_to_process = match find_files(&main_app_args) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("{}", style(format!("Error finding files: {:#}", e)).red());
            return Ok(ExitCode::FAILURE);
        }
    };

    if files_to_process.is_empty() {
        if !main_app_args.quiet {
            println!("No files found matching the criteria.");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let workspace = match build_workspace(&main_app_args) {
        Ok(workspace) => workspace,
        Err(e) => {
            eprintln!("{}", style(format!("Error resolving workspace: {:#}", e)).red());
            return Ok(ExitCode::FAILURE);
        }
    };

    let quiet = main_app_args.quiet;
    if !quiet {
        println!("Found {} files:", files_to_process.len());
        for file in files_to_process.iter().take(10) {
            println!("  {}", style(file.display()).dim());
        }
        if files_to_process.len() > 10 {
            println!("  ... and {} more.", files_to_process.len() - 10);
        }
    }

    let operation_mode = if main_app_args.check {
        OperationMode::Check
    } else {
        OperationMode::Apply
    };

    if operation_mode == OperationMode::Apply {
        let scope = interaction::describe_scope(&main_app_args.include_path);
        match interaction::confirm_annotation(
            files_to_process.len(),
            &scope,
            main_app_args.no_confirm,
        ) {
            Ok(true) => {}
            Ok(false) => return Ok(ExitCode::SUCCESS),
            Err(e) => {
                eprintln!(
                    "{}",
                    style(format!("Error during confirmation: {:#}", e)).red()
                );
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    let processing_results =
        process_files(files_to_process, &workspace, operation_mode, &LogSink).await;
    let tally = report(&processing_results, quiet);

    if !quiet {
        match operation_mode {
            OperationMode::Apply => println!(
                "Result: {} added, {} updated, {} up to date, {} skipped, {} failed.",
                style(tally.inserted).green(),
                style(tally.replaced).green(),
                tally.unchanged,
                tally.skipped,
                style(tally.failed).red()
            ),
            OperationMode::Check => println!(
                "Result: {} need a header update, {} up to date, {} skipped, {} failed.",
                style(tally.pending).yellow(),
                tally.unchanged,
                tally.skipped,
                style(tally.failed).red()
            ),
        }
    }

    if tally.failed > 0 || tally.pending > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
