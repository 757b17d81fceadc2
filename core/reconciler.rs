use std::fmt;

/// The two lines a header comment may occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderLine {
    First,
    /// After a directive line such as a shebang.
    Second,
}

impl HeaderLine {
    pub fn index(self) -> usize {
        match self {
            HeaderLine::First => 0,
            HeaderLine::Second => 1,
        }
    }
}

impl fmt::Display for HeaderLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}", self.index() + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    NoChange(HeaderLine),
    Replace(HeaderLine),
    Insert,
}

impl Outcome {
    pub fn is_no_change(&self) -> bool {
        matches!(self, Outcome::NoChange(_))
    }

    /// The edit that carries `desired` into the document, if any.
    pub fn edit(self, desired: &str) -> Option<Edit> {
        match self {
            Outcome::NoChange(_) => None,
            Outcome::Replace(line) => Some(Edit::Replace {
                line,
                text: desired.to_string(),
            }),
            Outcome::Insert => Some(Edit::Insert {
                text: desired.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Prepends `text` as a new first line.
    Insert { text: String },
    /// Replaces the content of `line`, keeping its terminator.
    Replace { line: HeaderLine, text: String },
}

/// Decides the single action that brings a document's header up to date.
///
/// Only the first two lines are examined. A line counts as a header when it starts
/// with `opening`; the first matching line wins and the second line is never
/// looked at once the first one matches.
pub fn reconcile(
    desired: &str,
    opening: &str,
    line0: Option<&str>,
    line1: Option<&str>,
) -> Outcome {
    let is_header = |line: &str| line.starts_with(opening);
    let settle = |line: &str, at: HeaderLine| {
        if line == desired {
            Outcome::NoChange(at)
        } else {
            Outcome::Replace(at)
        }
    };

    match (line0, line1) {
        (Some(first), _) if is_header(first) => settle(first, HeaderLine::First),
        (_, Some(second)) if is_header(second) => settle(second, HeaderLine::Second),
        _ => Outcome::Insert,
    }
}
