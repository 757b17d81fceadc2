use crate::diagnostics::DiagnosticSink;
use crate::path_policy::SeparatorPolicy;
use crate::scope::default_include_paths;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = ".pathmark.toml";

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub include_paths: Vec<String>,
    pub separator: SeparatorPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            include_paths: default_include_paths(),
            separator: SeparatorPolicy::Native,
        }
    }
}

/// Values given on the command line; they win over the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub include_paths: Option<Vec<String>>,
    pub separator: Option<SeparatorPolicy>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    include_paths: Option<Vec<String>>,
    path_separator: Option<String>,
}

fn read_settings_file(path: &Path) -> Result<Option<SettingsFile>, SettingsError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    toml::from_str(&text)
        .map(Some)
        .map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

impl Settings {
    /// Loads `.pathmark.toml` from `root`. Problems with the file are traced and
    /// replaced by defaults.
    pub fn load(root: &Path, sink: &dyn DiagnosticSink) -> Settings {
        let path = root.join(SETTINGS_FILE);
        let file = match read_settings_file(&path) {
            Ok(file) => file.unwrap_or_default(),
            Err(e) => {
                sink.emit(&format!("Ignoring settings: {}", e));
                SettingsFile::default()
            }
        };
        Settings::from_file(file, sink)
    }

    fn from_file(file: SettingsFile, sink: &dyn DiagnosticSink) -> Settings {
        let separator = match file.path_separator.as_deref() {
            None => SeparatorPolicy::default(),
            Some(value) => SeparatorPolicy::from_setting(value).unwrap_or_else(|| {
                sink.emit(&format!(
                    "Unknown pathSeparator '{}', falling back to 'auto'",
                    value
                ));
                SeparatorPolicy::default()
            }),
        };
        Settings {
            include_paths: file.include_paths.unwrap_or_else(default_include_paths),
            separator,
        }
    }

    pub fn with_overrides(mut self, overrides: &SettingsOverrides) -> Settings {
        if let Some(include_paths) = &overrides.include_paths {
            self.include_paths = include_paths.clone();
        }
        if let Some(separator) = overrides.separator {
            self.separator = separator;
        }
        self
    }
}
