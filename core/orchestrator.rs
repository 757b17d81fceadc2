use crate::diagnostics::DiagnosticSink;
use crate::host::{Document, EditError, Workspace};
use crate::path_policy::{self, PathError, SeparatorPolicy};
use crate::reconciler::{self, Edit, HeaderLine, Outcome};
use crate::scope;
use crate::syntax;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Opened,
    ActiveChanged,
    Command,
    /// Sweep over documents already open when the host starts.
    Activation,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Trigger::Opened => "File opened",
            Trigger::ActiveChanged => "Switched to editor",
            Trigger::Command => "Command invoked",
            Trigger::Activation => "Already open at activation",
        };
        f.write_str(s)
    }
}

/// Why a document was left alone. These are normal, silent paths.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Skip {
    #[error("document has no file path")]
    NoPath,

    #[error("no workspace folder found for {0}")]
    NotInWorkspace(PathBuf),

    #[error("not in included paths: {0}")]
    OutOfScope(String),

    #[error("unsupported file type: {0}")]
    UnsupportedLanguage(String),

    #[error(transparent)]
    InvalidRoot(#[from] PathError),

    #[error("path contains a line break: {0:?}")]
    LineBreakInPath(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub relative_path: String,
    pub desired: String,
    pub outcome: Outcome,
}

impl Plan {
    pub fn edit(&self) -> Option<Edit> {
        self.outcome.edit(&self.desired)
    }
}

#[derive(Debug)]
pub enum Disposition {
    Skipped(Skip),
    Reconciled(Outcome),
    Failed(EditError),
}

/// Runs every step short of editing: scope check, syntax lookup, desired
/// comment and reconciliation against the document's first two lines.
pub fn plan<W: Workspace, D: Document>(
    workspace: &W,
    document: &D,
    sink: &dyn DiagnosticSink,
) -> Result<Plan, Skip> {
    let name = document.display_name();
    sink.emit(&format!("Checking file: {}", name));

    let path = document.path().ok_or(Skip::NoPath)?;
    let root = workspace
        .root_for(path)
        .ok_or_else(|| Skip::NotInWorkspace(path.to_path_buf()))?;
    let settings = workspace.settings(&root, sink);

    let native = path_policy::render(&root, path, SeparatorPolicy::Native)?;
    let included = scope::is_included(&native, &settings.include_paths);
    sink.emit(&format!(
        "File: {}, Workspace: {}, Include paths: {}, Result: {}",
        name,
        root.display(),
        settings.include_paths.join(", "),
        included
    ));
    if !included {
        return Err(Skip::OutOfScope(native));
    }

    let language_id = document.language_id();
    let syntax = syntax::lookup(language_id)
        .ok_or_else(|| Skip::UnsupportedLanguage(language_id.to_string()))?;

    let relative_path = path_policy::render(&root, path, settings.separator)?;
    // A header must stay on one line or it can never match again.
    if relative_path.contains(['\n', '\r']) {
        return Err(Skip::LineBreakInPath(relative_path));
    }
    let desired = syntax.render(&relative_path);

    let line1 = if document.line_count() > 1 {
        document.line(1)
    } else {
        None
    };
    let outcome = reconciler::reconcile(&desired, syntax.opening, document.line(0), line1);

    Ok(Plan {
        relative_path,
        desired,
        outcome,
    })
}

fn describe(outcome: Outcome, name: &str) -> String {
    match outcome {
        Outcome::NoChange(_) => format!("Comment is up to date in {}", name),
        Outcome::Replace(HeaderLine::First) => format!("Comment updated in {}", name),
        Outcome::Replace(HeaderLine::Second) => {
            format!("Comment updated on second line in {}", name)
        }
        Outcome::Insert => format!("Comment added to {}", name),
    }
}

/// Brings one document's header comment up to date.
///
/// Skips and edit failures are reported through `sink` and the returned
/// [`Disposition`]; nothing here is raised to the caller.
pub async fn reconcile_document<W: Workspace, D: Document>(
    workspace: &W,
    document: &mut D,
    trigger: Trigger,
    sink: &dyn DiagnosticSink,
) -> Disposition {
    let name = document.display_name();
    sink.emit(&format!("{}: {}", trigger, name));

    let plan = match plan(workspace, document, sink) {
        Ok(plan) => plan,
        Err(skip) => {
            sink.emit(&format!("Skipping {}: {}", name, skip));
            return Disposition::Skipped(skip);
        }
    };

    let Some(edit) = plan.edit() else {
        sink.emit(&describe(plan.outcome, &name));
        return Disposition::Reconciled(plan.outcome);
    };

    sink.emit(&format!("Attempting to add/update comment in: {}", name));
    match document.apply_edit(&edit).await {
        Ok(()) => {
            sink.emit(&describe(plan.outcome, &name));
            Disposition::Reconciled(plan.outcome)
        }
        Err(e) => {
            sink.emit(&format!("Error updating comment in {}: {}", name, e));
            Disposition::Failed(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MemorySink;
    use crate::document::TextBuffer;
    use crate::settings::Settings;
    use std::path::Path;

    struct TestWorkspace {
        root: PathBuf,
        settings: Settings,
    }

    impl TestWorkspace {
        fn new() -> Self {
            TestWorkspace {
                root: PathBuf::from("/work"),
                settings: Settings {
                    separator: SeparatorPolicy::Forward,
                    ..Settings::default()
                },
            }
        }
    }

    impl Workspace for TestWorkspace {
        fn root_for(&self, file: &Path) -> Option<PathBuf> {
            file.starts_with(&self.root).then(|| self.root.clone())
        }

        fn settings(&self, _root: &Path, _sink: &dyn DiagnosticSink) -> Settings {
            self.settings.clone()
        }
    }

    struct MemoryDocument {
        path: Option<PathBuf>,
        language_id: String,
        buffer: TextBuffer,
        read_only: bool,
        edits: usize,
    }

    impl MemoryDocument {
        fn new(path: &str, language_id: &str, lines: &[&str]) -> Self {
            MemoryDocument {
                path: Some(PathBuf::from(path)),
                language_id: language_id.to_string(),
                buffer: TextBuffer::new(lines.join("\n")),
                read_only: false,
                edits: 0,
            }
        }

        fn lines(&self) -> Vec<String> {
            self.buffer.contents().split('\n').map(String::from).collect()
        }
    }

    impl Document for MemoryDocument {
        fn path(&self) -> Option<&Path> {
            self.path.as_deref()
        }

        fn language_id(&self) -> &str {
            &self.language_id
        }

        fn line_count(&self) -> usize {
            self.buffer.line_count()
        }

        fn line(&self, index: usize) -> Option<&str> {
            self.buffer.line(index)
        }

        async fn apply_edit(&mut self, edit: &Edit) -> Result<(), EditError> {
            if self.read_only {
                return Err(EditError::ReadOnly(self.path.clone().unwrap_or_default()));
            }
            self.edits += 1;
            self.buffer.apply(edit)
        }
    }

    async fn run(doc: &mut MemoryDocument) -> (Disposition, MemorySink) {
        let sink = MemorySink::new();
        let disposition =
            reconcile_document(&TestWorkspace::new(), doc, Trigger::Command, &sink).await;
        (disposition, sink)
    }

    #[tokio::test]
    async fn inserts_header_above_code() {
        let mut doc = MemoryDocument::new("/work/src/app.js", "javascript", &["function f() {}"]);
        let (disposition, sink) = run(&mut doc).await;
        assert!(matches!(disposition, Disposition::Reconciled(Outcome::Insert)));
        assert_eq!(doc.lines(), vec!["// src/app.js", "function f() {}"]);
        assert!(sink.contains("Comment added to /work/src/app.js"));
    }

    #[tokio::test]
    async fn replaces_stale_header() {
        let mut doc = MemoryDocument::new(
            "/work/src/new/path.py",
            "python",
            &["# old/path.py", "print(1)"],
        );
        let (disposition, _) = run(&mut doc).await;
        assert!(matches!(
            disposition,
            Disposition::Reconciled(Outcome::Replace(HeaderLine::First))
        ));
        assert_eq!(doc.lines(), vec!["# src/new/path.py", "print(1)"]);
    }

    #[tokio::test]
    async fn shebang_with_correct_header_is_untouched() {
        let mut doc = MemoryDocument::new(
            "/work/src/run.py",
            "python",
            &["#!/usr/bin/env python", "# src/run.py", "import os"],
        );
        let (disposition, sink) = run(&mut doc).await;
        assert!(matches!(
            disposition,
            Disposition::Reconciled(Outcome::NoChange(HeaderLine::Second))
        ));
        assert_eq!(doc.edits, 0);
        assert!(sink.contains("up to date"));
    }

    #[tokio::test]
    async fn unsupported_language_is_skipped() {
        let mut doc = MemoryDocument::new("/work/src/notes.txt", "plaintext", &["hello"]);
        let (disposition, sink) = run(&mut doc).await;
        assert!(matches!(
            disposition,
            Disposition::Skipped(Skip::UnsupportedLanguage(ref id)) if id == "plaintext"
        ));
        assert_eq!(doc.edits, 0);
        assert!(sink.contains("unsupported file type: plaintext"));
    }

    #[tokio::test]
    async fn bracketed_syntax() {
        let mut doc = MemoryDocument::new("/work/src/style.css", "css", &["body {}"]);
        run(&mut doc).await;
        assert_eq!(doc.lines(), vec!["/* src/style.css */", "body {}"]);
    }

    #[tokio::test]
    async fn second_pass_is_a_no_op() {
        let mut doc = MemoryDocument::new("/work/src/lib.rs", "rust", &["fn main() {}"]);
        run(&mut doc).await;
        let after_first = doc.lines();
        let (disposition, _) = run(&mut doc).await;
        assert!(matches!(
            disposition,
            Disposition::Reconciled(Outcome::NoChange(HeaderLine::First))
        ));
        assert_eq!(doc.lines(), after_first);
        assert_eq!(doc.edits, 1);
    }

    #[tokio::test]
    async fn out_of_scope_and_outside_workspace() {
        let mut doc = MemoryDocument::new("/work/docs/guide.md", "markdown", &["# Guide"]);
        let (disposition, _) = run(&mut doc).await;
        assert!(matches!(disposition, Disposition::Skipped(Skip::OutOfScope(_))));

        let mut doc = MemoryDocument::new("/srcfoo/app.ts", "typescript", &[""]);
        let (disposition, sink) = run(&mut doc).await;
        assert!(matches!(disposition, Disposition::Skipped(Skip::NotInWorkspace(_))));
        assert!(sink.contains("no workspace folder found"));
        assert_eq!(doc.edits, 0);
    }

    #[tokio::test]
    async fn untitled_buffers_are_rejected() {
        let mut doc = MemoryDocument::new("/work/src/a.js", "javascript", &["x"]);
        doc.path = None;
        let (disposition, sink) = run(&mut doc).await;
        assert!(matches!(disposition, Disposition::Skipped(Skip::NoPath)));
        assert!(sink.contains("<untitled>"));
    }

    #[tokio::test]
    async fn edit_failures_are_contained() {
        let mut doc = MemoryDocument::new("/work/src/app.go", "go", &["package main"]);
        doc.read_only = true;
        let (disposition, sink) = run(&mut doc).await;
        assert!(matches!(disposition, Disposition::Failed(EditError::ReadOnly(_))));
        assert!(sink.contains("Error updating comment in /work/src/app.go"));
        assert_eq!(doc.lines(), vec!["package main"]);
    }

    #[test]
    fn plan_reports_desired_comment() {
        let mut workspace = TestWorkspace::new();
        workspace.settings.separator = SeparatorPolicy::Backward;
        let doc = MemoryDocument::new("/work/src/ui/view.html", "html", &["<div></div>"]);
        let plan = plan(&workspace, &doc, &MemorySink::new()).unwrap();
        assert_eq!(plan.relative_path, "src\\ui\\view.html");
        assert_eq!(plan.desired, "<!-- src\\ui\\view.html -->");
        assert_eq!(plan.outcome, Outcome::Insert);
    }

    #[test]
    fn header_beyond_second_line_is_invisible() {
        let doc = MemoryDocument::new(
            "/work/src/tool.sh",
            "shellscript",
            &["#!/bin/sh", "set -e", "# src/tool.sh"],
        );
        let plan = plan(&TestWorkspace::new(), &doc, &MemorySink::new()).unwrap();
        assert_eq!(plan.outcome, Outcome::Insert);
    }

    #[tokio::test]
    async fn each_trigger_is_traced_on_entry() {
        let cases = [
            (Trigger::Opened, "File opened: /work/src/a.rb"),
            (Trigger::ActiveChanged, "Switched to editor: /work/src/a.rb"),
            (Trigger::Command, "Command invoked: /work/src/a.rb"),
            (Trigger::Activation, "Already open at activation: /work/src/a.rb"),
        ];
        for (trigger, entry) in cases {
            let mut doc = MemoryDocument::new("/work/src/a.rb", "ruby", &["puts 1"]);
            let sink = MemorySink::new();
            let disposition =
                reconcile_document(&TestWorkspace::new(), &mut doc, trigger, &sink).await;
            assert!(matches!(disposition, Disposition::Reconciled(Outcome::Insert)));
            assert_eq!(sink.lines().first().map(String::as_str), Some(entry));
        }
    }

    #[test]
    fn line_breaks_in_paths_are_skipped() {
        let doc = MemoryDocument::new("/work/src/a\nb.js", "javascript", &["let x = 1;"]);
        let skip = plan(&TestWorkspace::new(), &doc, &MemorySink::new()).unwrap_err();
        assert_eq!(skip, Skip::LineBreakInPath("src/a\nb.js".to_string()));

        let doc = MemoryDocument::new("/work/src/a\rb.js", "javascript", &["let x = 1;"]);
        let skip = plan(&TestWorkspace::new(), &doc, &MemorySink::new()).unwrap_err();
        assert!(matches!(skip, Skip::LineBreakInPath(_)));
    }
}
