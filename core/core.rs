pub mod diagnostics;
pub mod document;
pub mod file_finder;
pub mod host;
pub mod language;
pub mod orchestrator;
pub mod path_policy;
pub mod processor;
pub mod reconciler;
pub mod scope;
pub mod settings;
pub mod syntax;
pub mod workspace;

pub use diagnostics::{DiagnosticSink, LogSink, MemorySink};
pub use document::{FileDocument, TextBuffer};
pub use file_finder::{CliArgs, Command, CompletionArgs, PathmarkArgs, find_files};
pub use host::{Document, EditError, Workspace};
pub use orchestrator::{Disposition, Plan, Skip, Trigger, plan, reconcile_document};
pub use path_policy::{PathError, SeparatorPolicy};
pub use processor::{FileStatus, OperationMode, ProcessedFileResult, process_files};
pub use reconciler::{Edit, HeaderLine, Outcome, reconcile};
pub use settings::{Settings, SettingsError, SettingsOverrides};
pub use syntax::{CommentSyntax, lookup};
pub use workspace::{FsWorkspace, discover_root};
