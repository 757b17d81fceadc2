use std::borrow::Cow;
use std::path::{Component, MAIN_SEPARATOR_STR, Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SeparatorPolicy {
    Forward,
    Backward,
    #[default]
    #[value(name = "auto")]
    Native,
}

impl SeparatorPolicy {
    /// Parses a `pathSeparator` setting value. Unknown values yield `None`.
    pub fn from_setting(value: &str) -> Option<Self> {
        match value {
            "forward" => Some(SeparatorPolicy::Forward),
            "backward" => Some(SeparatorPolicy::Backward),
            "auto" => Some(SeparatorPolicy::Native),
            _ => None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            SeparatorPolicy::Forward => "/",
            SeparatorPolicy::Backward => "\\",
            SeparatorPolicy::Native => MAIN_SEPARATOR_STR,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("{file} is not reachable under {root}")]
    InvalidRoot { root: PathBuf, file: PathBuf },
}

/// Renders `file` relative to `root`, joining segments with the policy's token.
///
/// The result never starts with `./` and never ends with a separator. A file that
/// is the root itself, lies outside it, or needs `..` to be reached is rejected.
pub fn render(root: &Path, file: &Path, policy: SeparatorPolicy) -> Result<String, PathError> {
    let invalid = || PathError::InvalidRoot {
        root: root.to_path_buf(),
        file: file.to_path_buf(),
    };
    let relative = file.strip_prefix(root).map_err(|_| invalid())?;

    let mut segments: Vec<Cow<'_, str>> = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(segment) => segments.push(segment.to_string_lossy()),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(invalid());
            }
        }
    }
    if segments.is_empty() {
        return Err(invalid());
    }
    Ok(segments.join(policy.token()))
}
