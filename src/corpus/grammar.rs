// src/corpus/grammar.rs

//! Extension grammar: a fixed, closed set of filename suffixes mapped to
//! canonical language tags.
//!
//! Matching is suffix-anchored against the full entry path and
//! case-insensitive. Entries whose suffix is not in the set are ignored
//! entirely by the extractor.

/// Recognized source-file extensions, lowercased.
///
/// The set covers common compiled, scripting, functional, JVM, hardware
/// description, shell and markup language suffixes. Deliberately closed:
/// adding a tag here is the only way to widen the corpus.
const EXTENSIONS: &[&str] = &[
    // C family
    "c", "h", "c++", "h++", "cpp", "hpp", "objc", "m", "mm",
    // single-letter and short compiled languages
    "d", "e", "f", "p", "r", "s",
    // *s languages (C#, ECMAScript, JavaScript, LiveScript, Rust, TypeScript)
    "cs", "es", "js", "ls", "rs", "ts",
    // Python / Perl / Pascal / PHP / PowerShell
    "py", "py3", "pl", "pm", "pp", "pas", "php", "ps1",
    // shells, SQL, Scala
    "sh", "sql", "sc", "scala", "scpt", "scptd",
    // Go, ASP, Ada
    "go", "asp", "adb", "ads",
    // COBOL, CQL, Lisp family, Cypher
    "cbl", "cl", "cql", "clj", "cljs", "cljc", "cob", "cobra", "cpy", "cyp",
    "lisp", "lsp",
    // Tcl, Java
    "tcl", "tbc", "java", "jj",
    // ML and Erlang family, Haskell
    "ml", "erl", "hrl", "hs", "lhs",
    // Ruby, Visual Basic, VHDL, Elixir
    "rb", "vb", "vhd", "vhdl", "ex", "exs",
    // Dart, AppleScript, Fortran, Boo
    "dart", "applescript", "for", "f90", "boo",
    // JSX/TSX, Vala, Gambas, CoffeeScript
    "jsx", "tsx", "vala", "vapi", "gambas", "coffee", "litcoffee",
    // F#, Julia, Lua
    "fsi", "fsx", "fsscript", "jl", "lua",
    // markup, assembly, Haxe
    "md", "asm", "wasm", "hx", "hxml",
    // Groovy, Wolfram, WebAssembly text, batch
    "gy", "gvy", "groovy", "wl", "wat", "bat", "btm", "cmd",
];

/// Classify a full entry path into a language tag.
///
/// Returns the lowercased extension when the path's suffix belongs to the
/// closed grammar, `None` otherwise.
pub fn match_tag(path: &str) -> Option<&'static str> {
    let dot = path.rfind('.')?;
    let suffix = &path[dot + 1..];
    if suffix.is_empty() || suffix.contains('/') {
        return None;
    }
    let lowered = suffix.to_lowercase();
    EXTENSIONS
        .iter()
        .find(|ext| **ext == lowered.as_str())
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_common_source_suffixes() {
        assert_eq!(match_tag("main.py"), Some("py"));
        assert_eq!(match_tag("Readme.MD"), Some("md"));
        assert_eq!(match_tag("script.rb"), Some("rb"));
    }

    #[test]
    fn rejects_unrecognized_suffixes() {
        assert_eq!(match_tag("notes.txt"), None);
        assert_eq!(match_tag("archive.tar.gz"), None);
        assert_eq!(match_tag("Makefile"), None);
        assert_eq!(match_tag(""), None);
    }

    #[test]
    fn matches_against_full_entry_path() {
        assert_eq!(match_tag("repo-master/src/lib.rs"), Some("rs"));
        assert_eq!(match_tag("repo-master/docs/README.md"), Some("md"));
    }

    #[test]
    fn dot_in_directory_does_not_match() {
        // The suffix must follow the final dot; a dot inside a directory
        // component followed by a slash is not an extension.
        assert_eq!(match_tag("v1.2/binary"), None);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(match_tag("module.PY"), Some("py"));
        assert_eq!(match_tag("Types.Hs"), Some("hs"));
    }
}
