/// Comment tokens for one language. `closing` is empty for line-comment languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentSyntax {
    pub opening: &'static str,
    pub closing: &'static str,
}

impl CommentSyntax {
    const fn line(opening: &'static str) -> Self {
        CommentSyntax {
            opening,
            closing: "",
        }
    }

    const fn block(opening: &'static str, closing: &'static str) -> Self {
        CommentSyntax { opening, closing }
    }

    pub fn is_bracketed(&self) -> bool {
        !self.closing.is_empty()
    }

    /// Wraps `body` in this syntax, e.g. `/* src/style.css */`.
    pub fn render(&self, body: &str) -> String {
        let mut out = String::with_capacity(self.opening.len() + body.len() + self.closing.len());
        out.push_str(self.opening);
        out.push_str(body);
        out.push_str(self.closing);
        out
    }
}

const SLASHES: CommentSyntax = CommentSyntax::line("// ");
const HASH: CommentSyntax = CommentSyntax::line("# ");
const DASHES: CommentSyntax = CommentSyntax::line("-- ");
const APOSTROPHE: CommentSyntax = CommentSyntax::line("' ");
const MARKUP: CommentSyntax = CommentSyntax::block("<!-- ", " -->");
const STYLESHEET: CommentSyntax = CommentSyntax::block("/* ", " */");

pub const SYNTAX_TABLE: &[(&str, CommentSyntax)] = &[
    ("c", SLASHES),
    ("cpp", SLASHES),
    ("csharp", SLASHES),
    ("dart", SLASHES),
    ("go", SLASHES),
    ("java", SLASHES),
    ("javascript", SLASHES),
    ("javascriptreact", SLASHES),
    ("kotlin", SLASHES),
    ("objective-c", SLASHES),
    ("php", SLASHES),
    ("rust", SLASHES),
    ("scala", SLASHES),
    ("swift", SLASHES),
    ("typescript", SLASHES),
    ("typescriptreact", SLASHES),
    ("crystal", HASH),
    ("dockerfile", HASH),
    ("elixir", HASH),
    ("fish", HASH),
    ("makefile", HASH),
    ("nix", HASH),
    ("perl", HASH),
    ("powershell", HASH),
    ("python", HASH),
    ("r", HASH),
    ("ruby", HASH),
    ("shellscript", HASH),
    ("toml", HASH),
    ("yaml", HASH),
    ("elm", DASHES),
    ("haskell", DASHES),
    ("lua", DASHES),
    ("sql", DASHES),
    ("vb", APOSTROPHE),
    ("html", MARKUP),
    ("markdown", MARKUP),
    ("svelte", MARKUP),
    ("svg", MARKUP),
    ("vue", MARKUP),
    ("xml", MARKUP),
    ("css", STYLESHEET),
    ("less", STYLESHEET),
    ("scss", STYLESHEET),
];

/// Returns `None` for every language id not listed in [`SYNTAX_TABLE`].
pub fn lookup(language_id: &str) -> Option<CommentSyntax> {
    SYNTAX_TABLE
        .iter()
        .find(|(id, _)| *id == language_id)
        .map(|(_, syntax)| *syntax)
}

pub fn supported_languages() -> impl Iterator<Item = &'static str> {
    SYNTAX_TABLE.iter().map(|(id, _)| *id)
}
