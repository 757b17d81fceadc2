use std::path::Path;

pub const PLAINTEXT: &str = "plaintext";

fn language_from_file_name(name: &str) -> Option<&'static str> {
    match name {
        "Rakefile" | "Gemfile" => Some("ruby"),
        "Dockerfile" | "Containerfile" => Some("dockerfile"),
        "Makefile" | "GNUmakefile" => Some("makefile"),
        _ => None,
    }
}

fn language_from_extension(ext: &str) -> Option<&'static str> {
    match ext {
        "c" | "h" => Some("c"),
        "cpp" | "cxx" | "cc" | "hpp" | "hh" => Some("cpp"),
        "cs" => Some("csharp"),
        "dart" => Some("dart"),
        "go" => Some("go"),
        "java" => Some("java"),
        "js" | "mjs" | "cjs" => Some("javascript"),
        "jsx" => Some("javascriptreact"),
        "kt" | "kts" => Some("kotlin"),
        "m" => Some("objective-c"),
        "php" => Some("php"),
        "rs" => Some("rust"),
        "scala" | "sc" => Some("scala"),
        "swift" => Some("swift"),
        "ts" | "mts" | "cts" => Some("typescript"),
        "tsx" => Some("typescriptreact"),
        "cr" => Some("crystal"),
        "ex" | "exs" => Some("elixir"),
        "fish" => Some("fish"),
        "mk" => Some("makefile"),
        "nix" => Some("nix"),
        "pl" | "pm" => Some("perl"),
        "ps1" | "psm1" => Some("powershell"),
        "py" | "pyw" => Some("python"),
        "r" => Some("r"),
        "rb" | "rake" => Some("ruby"),
        "sh" | "bash" | "zsh" => Some("shellscript"),
        "toml" => Some("toml"),
        "yaml" | "yml" => Some("yaml"),
        "elm" => Some("elm"),
        "hs" => Some("haskell"),
        "lua" => Some("lua"),
        "sql" => Some("sql"),
        "vb" => Some("vb"),
        "html" | "htm" => Some("html"),
        "md" | "markdown" => Some("markdown"),
        "svelte" => Some("svelte"),
        "svg" => Some("svg"),
        "vue" => Some("vue"),
        "xml" | "xhtml" => Some("xml"),
        "css" => Some("css"),
        "less" => Some("less"),
        "scss" => Some("scss"),
        "json" | "jsonc" => Some("json"),
        _ => None,
    }
}

/// Editor-style language id for `path`. Unrecognized files are [`PLAINTEXT`].
pub fn detect_language(path: &Path) -> &'static str {
    if let Some(id) = path
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(language_from_file_name)
    {
        return id;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .and_then(|e| language_from_extension(&e))
        .unwrap_or(PLAINTEXT)
}
