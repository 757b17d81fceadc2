use anyhow::{Result, bail};
use console::style;
use dialoguer::Confirm;

/// Which include paths decide the scope, for the prompt.
pub fn describe_scope(include_path_flags: &[String]) -> String {
    if include_path_flags.is_empty() {
        "includePaths from .pathmark.toml (default: src)".to_string()
    } else {
        include_path_flags.join(", ")
    }
}

/// Asks before headers are written. Without a terminal there is nobody to ask,
/// so the caller must opt in with `--no-confirm` or run `--check` instead.
pub fn confirm_annotation(file_count: usize, scope: &str, no_confirm: bool) -> Result<bool> {
    if no_confirm {
        return Ok(true);
    }
    if !console::user_attended() {
        bail!("not a terminal; pass --no-confirm to write headers or --check to only report");
    }

    println!(
        "{} candidate files, scope: {}",
        style(file_count).cyan(),
        style(scope).cyan()
    );
    let confirmed = Confirm::new()
        .with_prompt("Write missing or stale path headers?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("Aborted by user. Run with --check to preview without editing.");
    }

    Ok(confirmed)
}
