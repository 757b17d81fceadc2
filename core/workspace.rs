use crate::diagnostics::DiagnosticSink;
use crate::host::Workspace;
use crate::settings::{SETTINGS_FILE, Settings, SettingsOverrides};
use std::path::{Path, PathBuf};

const ROOT_MARKERS: &[&str] = &[SETTINGS_FILE, ".git"];

/// Workspace folders on disk.
#[derive(Debug, Clone, Default)]
pub struct FsWorkspace {
    folders: Vec<PathBuf>,
    overrides: SettingsOverrides,
}

impl FsWorkspace {
    pub fn new(folders: Vec<PathBuf>) -> Self {
        FsWorkspace {
            folders,
            overrides: SettingsOverrides::default(),
        }
    }

    pub fn with_overrides(mut self, overrides: SettingsOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn folders(&self) -> &[PathBuf] {
        &self.folders
    }
}

impl Workspace for FsWorkspace {
    fn root_for(&self, file: &Path) -> Option<PathBuf> {
        self.folders
            .iter()
            .filter(|folder| file.starts_with(folder) && file != folder.as_path())
            .max_by_key(|folder| folder.components().count())
            .cloned()
    }

    fn settings(&self, root: &Path, sink: &dyn DiagnosticSink) -> Settings {
        Settings::load(root, sink).with_overrides(&self.overrides)
    }
}

/// Nearest ancestor of `start` (inclusive) holding a root marker, else the
/// directory containing `start`.
pub fn discover_root(start: &Path) -> PathBuf {
    let dir = if start.is_dir() {
        start
    } else {
        start.parent().unwrap_or(start)
    };
    dir.ancestors()
        .find(|candidate| ROOT_MARKERS.iter().any(|m| candidate.join(m).exists()))
        .unwrap_or(dir)
        .to_path_buf()
}
