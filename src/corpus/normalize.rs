// src/corpus/normalize.rs

//! Text normalization: raw bytes to canonical, casefolded corpus text.
//!
//! This is a total function. Encoding detection is best-effort and falls back
//! to a lossy decode; nothing here ever returns an error.

use caseless::default_case_fold_str;
use chardetng::EncodingDetector;
use unicode_general_category::{GeneralCategory, get_general_category};
use unicode_normalization::UnicodeNormalization;

/// Normalize raw file bytes into canonical corpus text.
///
/// Pipeline:
/// 1. Detect the encoding and decode, dropping undecodable sequences.
/// 2. Replace non-visible characters (control, format, private-use,
///    surrogate, line/paragraph/space separators) with a single space;
///    `\n` is preserved verbatim.
/// 3. Casefold (full Unicode case folding, not plain lowercasing).
/// 4. Apply canonical composition (NFC).
/// 5. Collapse runs of spaces into one space.
/// 6. Terminate the record with exactly two newline characters.
///
/// The function is idempotent: normalizing already-normalized text yields
/// the same text.
pub fn normalize(raw: &[u8]) -> String {
    let text = decode(raw);

    let mut cleaned = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch == '\u{FFFD}' {
            // Decoder substitution for an undecodable sequence; dropped
            // rather than spaced so broken bytes leave no trace.
            continue;
        }
        if ch != '\n' && is_non_visible(ch) {
            cleaned.push(' ');
        } else {
            cleaned.push(ch);
        }
    }

    let folded = default_case_fold_str(&cleaned);
    let composed: String = folded.nfc().collect();
    let collapsed = collapse_spaces(&composed);

    let mut out = collapsed
        .trim_end_matches(['\n', ' '])
        .to_string();
    out.push_str("\n\n");
    out
}

/// Decode bytes using a confidence-based encoding guess.
///
/// `chardetng` always produces a guess (falling back to a default encoding),
/// so detection failure cannot propagate; undecodable sequences become
/// U+FFFD, which `normalize` discards.
fn decode(raw: &[u8]) -> String {
    let mut detector = EncodingDetector::new();
    detector.feed(raw, true);
    let encoding = detector.guess(None, true);
    let (text, _, _) = encoding.decode(raw);
    text.into_owned()
}

/// Whether a character belongs to the replaced Unicode categories:
/// Cc, Cf, Co, Cs, Zl, Zp, Zs.
fn is_non_visible(ch: char) -> bool {
    matches!(
        get_general_category(ch),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::PrivateUse
            | GeneralCategory::Surrogate
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
            | GeneralCategory::SpaceSeparator
    )
}

/// Collapse runs of consecutive spaces into a single space.
fn collapse_spaces(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch == ' ' {
            if !prev_space {
                out.push(' ');
            }
            prev_space = true;
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn casefolds_and_terminates() {
        assert_eq!(normalize(b"Hello World"), "hello world\n\n");
    }

    #[test]
    fn replaces_control_characters_with_single_space() {
        // Tab and carriage return are Cc; runs collapse to one space.
        assert_eq!(normalize(b"a\tb"), "a b\n\n");
        assert_eq!(normalize(b"a\t\r\tb"), "a b\n\n");
    }

    #[test]
    fn preserves_newlines() {
        assert_eq!(normalize(b"line one\nline two"), "line one\nline two\n\n");
    }

    #[test]
    fn collapses_space_runs() {
        assert_eq!(normalize(b"a     b"), "a b\n\n");
    }

    #[test]
    fn ends_with_exactly_two_newlines() {
        let out = normalize(b"x\n\n\n\n");
        assert!(out.ends_with("\n\n"));
        assert!(!out.ends_with("\n\n\n"));
        assert_eq!(out, "x\n\n");
    }

    #[test]
    fn is_idempotent() {
        let samples: [&[u8]; 5] = [
            b"Hello\tWorld",
            b"def main():\n    return 0\n",
            b"",
            b"MiXeD CaSe   with\tcontrol\x07chars",
            "caf\u{00e9} STRASSE \u{00df}".as_bytes(),
        ];
        for raw in samples {
            let once = normalize(raw);
            let twice = normalize(once.as_bytes());
            assert_eq!(once, twice, "normalize not idempotent for {raw:?}");
        }
    }

    #[test]
    fn casefold_is_stronger_than_lowercase() {
        // U+00DF LATIN SMALL LETTER SHARP S casefolds to "ss".
        assert_eq!(normalize("stra\u{00df}e".as_bytes()), "strasse\n\n");
    }

    #[test]
    fn unicode_separators_become_spaces() {
        // U+2028 LINE SEPARATOR (Zl) and U+00A0 NO-BREAK SPACE (Zs).
        assert_eq!(normalize("a\u{2028}b".as_bytes()), "a b\n\n");
        assert_eq!(normalize("a\u{00a0}b".as_bytes()), "a b\n\n");
    }

    #[test]
    fn empty_input_yields_bare_terminator() {
        assert_eq!(normalize(b""), "\n\n");
    }

    #[test]
    fn decodes_non_utf8_input() {
        // ISO-8859-1 "café"; detection may pick any superset encoding, but
        // the ASCII letters must survive folded.
        let latin1: &[u8] = &[b'C', b'A', b'F', 0xE9];
        let out = normalize(latin1);
        assert!(out.starts_with("caf"));
        assert!(out.ends_with("\n\n"));
    }
}
