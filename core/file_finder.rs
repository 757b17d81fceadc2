use crate::language::detect_language;
use crate::path_policy::SeparatorPolicy;
use crate::syntax;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ignore::WalkBuilder;
use ignore::overrides::OverrideBuilder;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser, Clone, Default)]
#[clap(
    about = "Keep a project-relative path comment at the top of source files (main arguments)"
)]
pub struct PathmarkArgs {
    #[clap(help = "Path to the file or directory to process", default_value = ".")]
    pub path: PathBuf,

    #[clap( long, value_name = "DIR", help = "Workspace folder [multiple allowed; discovered from PATH when omitted]", action = clap::ArgAction::Append )]
    pub root: Vec<PathBuf>,

    #[clap( long = "include-path", value_name = "PREFIX", help = "Relative path prefix to annotate, overrides includePaths [multiple allowed]", action = clap::ArgAction::Append )]
    pub include_path: Vec<String>,

    #[clap(
        long,
        value_enum,
        value_name = "SEPARATOR",
        help = "Separator used in the comment, overrides pathSeparator"
    )]
    pub separator: Option<SeparatorPolicy>,

    #[clap( long, value_name = "LANG", help = "Restrict to specific language ids [multiple allowed]", action = clap::ArgAction::Append )]
    pub lang: Vec<String>,
    #[clap( long, value_name = "PATTERN", help = "Glob pattern for files to include [multiple allowed]", action = clap::ArgAction::Append )]
    pub include: Vec<String>,
    #[clap( long, value_name = "PATTERN", help = "Glob pattern for files/directories to exclude [multiple allowed]", action = clap::ArgAction::Append )]
    pub exclude: Vec<String>,

    #[clap(long, help = "Report files whose header is missing or stale without editing them")]
    pub check: bool,
    #[clap(long, help = "Skip the confirmation prompt")]
    pub no_confirm: bool,
    #[clap(long, help = "List supported language ids and their comment syntax")]
    pub list_languages: bool,

    #[clap(short, long, help = "Trace every decision", conflicts_with = "quiet")]
    pub verbose: bool,
    #[clap(short, long, help = "Only print errors")]
    pub quiet: bool,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    #[clap(about = "Generate shell completion scripts")]
    Completion(CompletionArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct CompletionArgs {
    #[clap(value_parser = clap::value_parser!(clap_complete::Shell))]
    pub shell: clap_complete::Shell,
}

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "pathmark",
    version,
    about = "Keep a project-relative path comment at the top of source files",
    long_about = "Adds or refreshes a one-line header comment holding each file's path relative to its workspace folder.\nFiles outside the configured include paths, or in languages without a comment syntax, are left alone.",
    propagate_version = true
)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Option<Command>,

    #[clap(flatten)]
    pub main_opts: PathmarkArgs,
}

fn target_languages(requested: &[String]) -> Result<Option<HashSet<&'static str>>> {
    if requested.is_empty() {
        return Ok(None);
    }
    let mut targets = HashSet::new();
    for lang in requested {
        match syntax::supported_languages().find(|id| id == lang) {
            Some(id) => {
                targets.insert(id);
            }
            None => log::warn!("Unsupported language specified, skipping: {}", lang),
        }
    }
    if targets.is_empty() {
        anyhow::bail!("No valid languages specified: {:?}", requested);
    }
    Ok(Some(targets))
}

fn is_target(path: &Path, targets: Option<&HashSet<&'static str>>) -> bool {
    let lang = detect_language(path);
    match targets {
        Some(t) => t.contains(lang),
        None => syntax::lookup(lang).is_some(),
    }
}

/// Files under `args.path` worth reconciling, as absolute paths.
///
/// A file given directly is returned even when its language has no comment
/// syntax, so the skip gets reported; `--lang` still filters it.
pub fn find_files(args: &PathmarkArgs) -> Result<Vec<PathBuf>> {
    let r = &args.path;
    if !r.exists() {
        anyhow::bail!("Path not found: {}", r.display());
    }
    let r = r
        .canonicalize()
        .with_context(|| format!("Resolve: {}", r.display()))?;
    let targets = target_languages(&args.lang)?;
    if r.is_file() {
        if targets.as_ref().is_some_and(|t| !is_target(&r, Some(t))) {
            log::warn!("{} is not one of {:?}, skipping", r.display(), args.lang);
            return Ok(Vec::new());
        }
        return Ok(vec![r]);
    }

    let mut w = WalkBuilder::new(&r);
    w.standard_filters(true);
    let mut o = OverrideBuilder::new(&r);
    for p in &args.exclude {
        let q = format!("!{}", p);
        o.add(&q).with_context(|| format!("Exclude: {}", p))?;
    }
    for p in &args.include {
        o.add(p).with_context(|| format!("Include: {}", p))?;
    }
    let v = o.build().context("Overrides")?;
    w.overrides(v);

    let mut f = Vec::new();
    for i in w.build() {
        match i {
            Ok(e) => {
                if e.file_type().is_some_and(|ft| ft.is_file())
                    && is_target(e.path(), targets.as_ref())
                {
                    f.push(e.into_path());
                }
            }
            Err(e) => {
                log::warn!("Walk: {}", e);
            }
        }
    }
    f.sort();
    Ok(f)
}
