use crate::diagnostics::DiagnosticSink;
use crate::document::FileDocument;
use crate::host::Workspace;
use crate::orchestrator::{self, Disposition, Skip, Trigger};
use crate::reconciler::{HeaderLine, Outcome};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    Apply,
    Check,
}

#[derive(Debug)]
pub enum FileStatus {
    Skipped(Skip),
    Unchanged,
    Inserted,
    Replaced(HeaderLine),
    /// Check mode: the edit that would be made.
    Pending(Outcome),
    Failed(String),
}

impl FileStatus {
    pub fn is_failure(&self) -> bool {
        matches!(self, FileStatus::Failed(_))
    }

    fn from_disposition(disposition: Disposition) -> Self {
        match disposition {
            Disposition::Skipped(skip) => FileStatus::Skipped(skip),
            Disposition::Reconciled(Outcome::NoChange(_)) => FileStatus::Unchanged,
            Disposition::Reconciled(Outcome::Insert) => FileStatus::Inserted,
            Disposition::Reconciled(Outcome::Replace(line)) => FileStatus::Replaced(line),
            Disposition::Failed(e) => FileStatus::Failed(e.to_string()),
        }
    }
}

#[derive(Debug)]
pub struct ProcessedFileResult {
    pub path: PathBuf,
    pub status: FileStatus,
}

fn read_failed(path: &Path, e: std::io::Error, sink: &dyn DiagnosticSink) -> FileStatus {
    let message = format!("Read failed for {}: {}", path.display(), e);
    sink.emit(&message);
    FileStatus::Failed(message)
}

fn check_file<W: Workspace>(
    path: &Path,
    workspace: &W,
    sink: &dyn DiagnosticSink,
) -> FileStatus {
    let doc = match FileDocument::open(path) {
        Ok(doc) => doc,
        Err(e) => return read_failed(path, e, sink),
    };
    match orchestrator::plan(workspace, &doc, sink) {
        Err(skip) => FileStatus::Skipped(skip),
        Ok(plan) if plan.outcome.is_no_change() => FileStatus::Unchanged,
        Ok(plan) => FileStatus::Pending(plan.outcome),
    }
}

/// Check mode only reads, so files are planned in parallel. Apply mode opens
/// each file right before reconciling it so an edit never writes back an
/// older snapshot.
pub async fn process_files<W: Workspace + Sync>(
    files: Vec<PathBuf>,
    workspace: &W,
    mode: OperationMode,
    sink: &dyn DiagnosticSink,
) -> Vec<ProcessedFileResult> {
    if mode == OperationMode::Check {
        return files
            .into_par_iter()
            .map(|path| {
                let status = check_file(&path, workspace, sink);
                ProcessedFileResult { path, status }
            })
            .collect();
    }

    let mut results = Vec::with_capacity(files.len());
    for path in files {
        let status = match FileDocument::open(&path) {
            Err(e) => read_failed(&path, e, sink),
            Ok(mut doc) => {
                let disposition =
                    orchestrator::reconcile_document(workspace, &mut doc, Trigger::Command, sink)
                        .await;
                FileStatus::from_disposition(disposition)
            }
        };
        results.push(ProcessedFileResult { path, status });
    }
    results
}
