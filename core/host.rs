use crate::diagnostics::DiagnosticSink;
use crate::reconciler::Edit;
use crate::settings::Settings;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum EditError {
    #[error("document is read-only: {0}")]
    ReadOnly(PathBuf),

    #[error("line {line} does not exist")]
    LineOutOfRange { line: usize },

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("edit task did not complete: {0}")]
    Task(String),
}

/// A live document as seen by the host.
#[allow(async_fn_in_trait)]
pub trait Document {
    /// `None` for buffers that were never saved.
    fn path(&self) -> Option<&Path>;

    fn language_id(&self) -> &str;

    fn line_count(&self) -> usize;

    fn line(&self, index: usize) -> Option<&str>;

    async fn apply_edit(&mut self, edit: &Edit) -> Result<(), EditError>;

    fn display_name(&self) -> String {
        self.path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<untitled>".to_string())
    }
}

/// Workspace folders and their configuration.
pub trait Workspace {
    fn root_for(&self, file: &Path) -> Option<PathBuf>;

    /// Read fresh on every call.
    fn settings(&self, root: &Path, sink: &dyn DiagnosticSink) -> Settings;
}
