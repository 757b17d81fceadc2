use crate::host::{Document, EditError};
use crate::language::detect_language;
use crate::reconciler::Edit;
use std::io::Write;
use std::ops::Range;
use std::path::{Path, PathBuf};

const BOM: char = '\u{feff}';

/// Line view over a file's text.
///
/// Lines are split on `\n`; a trailing `\r` belongs to the terminator, not the
/// line. Empty text has a single empty line. A byte-order mark is held apart so
/// it never shows up in line 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    bom: bool,
    text: String,
}

impl TextBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        match text.strip_prefix(BOM) {
            Some(rest) => TextBuffer {
                bom: true,
                text: rest.to_string(),
            },
            None => TextBuffer { bom: false, text },
        }
    }

    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    fn line_span(&self, index: usize) -> Option<Range<usize>> {
        let mut start = 0;
        for (i, segment) in self.text.split('\n').enumerate() {
            if i == index {
                let content = segment.strip_suffix('\r').unwrap_or(segment);
                return Some(start..start + content.len());
            }
            start += segment.len() + 1;
        }
        None
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.line_span(index).map(|span| &self.text[span])
    }

    pub fn line_ending(&self) -> &'static str {
        if self.text.contains("\r\n") { "\r\n" } else { "\n" }
    }

    pub fn apply(&mut self, edit: &Edit) -> Result<(), EditError> {
        match edit {
            Edit::Insert { text } => {
                let eol = self.line_ending();
                let mut next = String::with_capacity(text.len() + eol.len() + self.text.len());
                next.push_str(text);
                next.push_str(eol);
                next.push_str(&self.text);
                self.text = next;
            }
            Edit::Replace { line, text } => {
                let span = self
                    .line_span(line.index())
                    .ok_or(EditError::LineOutOfRange { line: line.index() })?;
                self.text.replace_range(span, text);
            }
        }
        Ok(())
    }

    /// Full file contents, byte-order mark included.
    pub fn contents(&self) -> String {
        if self.bom {
            let mut out = String::with_capacity(BOM.len_utf8() + self.text.len());
            out.push(BOM);
            out.push_str(&self.text);
            out
        } else {
            self.text.clone()
        }
    }
}

/// A file on disk opened as a document.
#[derive(Debug, Clone)]
pub struct FileDocument {
    path: PathBuf,
    language_id: &'static str,
    buffer: TextBuffer,
    read_only: bool,
}

impl FileDocument {
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let read_only = std::fs::metadata(path)?.permissions().readonly();
        Ok(FileDocument {
            path: path.to_path_buf(),
            language_id: detect_language(path),
            buffer: TextBuffer::new(text),
            read_only,
        })
    }

    pub fn contents(&self) -> String {
        self.buffer.contents()
    }
}

fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), EditError> {
    let io_err = |source| EditError::Io {
        path: path.to_path_buf(),
        source,
    };
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let permissions = std::fs::metadata(path).map_err(io_err)?.permissions();
    let mut temp_file = tempfile::Builder::new()
        .prefix(&format!(
            ".{}_pathmark_",
            path.file_name()
                .map(|s| s.to_string_lossy())
                .unwrap_or_default()
        ))
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(io_err)?;
    temp_file.write_all(contents).map_err(io_err)?;
    temp_file
        .as_file()
        .set_permissions(permissions)
        .map_err(io_err)?;
    temp_file
        .persist(path)
        .map_err(|persist_error| io_err(persist_error.error))?;
    Ok(())
}

impl Document for FileDocument {
    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }

    fn language_id(&self) -> &str {
        self.language_id
    }

    fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    fn line(&self, index: usize) -> Option<&str> {
        self.buffer.line(index)
    }

    async fn apply_edit(&mut self, edit: &Edit) -> Result<(), EditError> {
        if self.read_only {
            return Err(EditError::ReadOnly(self.path.clone()));
        }
        let mut next = self.buffer.clone();
        next.apply(edit)?;

        let path = self.path.clone();
        let contents = next.contents();
        tokio::task::spawn_blocking(move || write_atomically(&path, contents.as_bytes()))
            .await
            .map_err(|e| EditError::Task(e.to_string()))??;

        self.buffer = next;
        Ok(())
    }
}
