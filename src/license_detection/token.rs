//! The tokeniser: a pure, deterministic function from raw text to a
//! canonical token stream carrying source byte spans.
//!
//! Shared by both reference-text ingestion ([`crate::license_detection::reference`])
//! and unknown-text analysis ([`crate::license_detection::detector`]).

use std::ops::Range;

/// One canonical lexical unit, with the byte range it occupies in the text
/// it was tokenised from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Normalised token text: lowercased, punctuation-stripped.
    pub value: String,
    /// 0-based position of this token within its stream.
    pub index: usize,
    /// Byte offset range `[start, end)` into the original input.
    pub span: Range<usize>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum CharKind {
    Word,
    Apostrophe,
    Other,
}

fn classify(c: char) -> CharKind {
    match c {
        '\'' | '\u{2018}' | '\u{2019}' => CharKind::Apostrophe,
        _ if c.is_alphanumeric() => CharKind::Word,
        _ => CharKind::Other,
    }
}

/// Lowercase a single character, mapping curly quotes to the ASCII
/// apostrophe so that `"don't"` and `"don’t"` tokenise identically.
fn normalize_char(c: char, into: &mut String) {
    match c {
        '\u{2018}' | '\u{2019}' => into.push('\''),
        _ => {
            for lower in c.to_lowercase() {
                into.push(lower);
            }
        }
    }
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Tokenise raw text into an ordered token stream.
///
/// Runs of word characters (Unicode alphanumerics) and apostrophes are
/// joined into single tokens; apostrophes at the edges of a run are trimmed
/// so they never start or end a token (this is what keeps quoted license
/// names like `'MIT'` from picking up stray punctuation). Everything else
/// acts as a separator and is discarded, which folds whitespace runs,
/// bullet markers and straight/curly quote punctuation into the same
/// boundary. Tokens made up entirely of digits (copyright years, version
/// numbers) are dropped rather than retained, since they are noise for
/// license fingerprinting and line-level pre-stripping does not catch every
/// occurrence.
///
/// Deterministic, pure, O(n) in the length of `text`. The empty string
/// yields an empty stream.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut run_start: Option<usize> = None;

    let mut char_indices = text.char_indices().peekable();
    while let Some(&(byte_pos, c)) = char_indices.peek() {
        match classify(c) {
            CharKind::Word | CharKind::Apostrophe => {
                if run_start.is_none() {
                    run_start = Some(byte_pos);
                }
                char_indices.next();
            }
            CharKind::Other => {
                if let Some(start) = run_start.take() {
                    push_token(text, start, byte_pos, &mut tokens);
                }
                char_indices.next();
            }
        }
    }
    if let Some(start) = run_start.take() {
        push_token(text, start, text.len(), &mut tokens);
    }

    tokens
}

/// Trim leading/trailing apostrophes from `text[start..end]`, normalise the
/// remainder, and emit a token unless it is empty or purely numeric.
fn push_token(text: &str, mut start: usize, mut end: usize, tokens: &mut Vec<Token>) {
    // Trim from the front.
    while start < end {
        let c = text[start..end].chars().next().unwrap();
        if classify(c) == CharKind::Apostrophe {
            start += c.len_utf8();
        } else {
            break;
        }
    }
    // Trim from the back.
    while end > start {
        let c = text[start..end].chars().next_back().unwrap();
        if classify(c) == CharKind::Apostrophe {
            end -= c.len_utf8();
        } else {
            break;
        }
    }
    if start >= end {
        return;
    }

    let raw = &text[start..end];
    if is_all_digits(raw) {
        return;
    }

    let mut value = String::with_capacity(raw.len());
    for c in raw.chars() {
        normalize_char(c, &mut value);
    }
    if value.is_empty() {
        return;
    }

    let index = tokens.len();
    tokens.push(Token {
        value,
        index,
        span: start..end,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.value.as_str()).collect()
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn lowercases_and_splits_on_whitespace() {
        let tokens = tokenize("Hello   World");
        assert_eq!(values(&tokens), vec!["hello", "world"]);
    }

    #[test]
    fn strips_punctuation() {
        let tokens = tokenize("Permission is hereby granted, free of charge,");
        assert_eq!(
            values(&tokens),
            vec!["permission", "is", "hereby", "granted", "free", "of", "charge"]
        );
    }

    #[test]
    fn keeps_apostrophes_inside_contractions() {
        let tokens = tokenize("the licensor's rights, don\u{2019}t sublicense");
        assert_eq!(
            values(&tokens),
            vec!["the", "licensor's", "rights", "don't", "sublicense"]
        );
    }

    #[test]
    fn drops_purely_numeric_tokens() {
        let tokens = tokenize("Copyright 2021 Example Corp version 3.0");
        assert_eq!(
            values(&tokens),
            vec!["copyright", "example", "corp", "version"]
        );
    }

    #[test]
    fn keeps_mixed_alnum_tokens() {
        let tokens = tokenize("gpl2+ is not gpl3");
        assert_eq!(values(&tokens), vec!["gpl2", "is", "not", "gpl3"]);
    }

    #[test]
    fn bullet_markers_and_curly_quotes_act_as_separators() {
        let tokens = tokenize("\u{2022} \u{201C}free software\u{201D} \u{2022} again");
        assert_eq!(values(&tokens), vec!["free", "software", "again"]);
    }

    #[test]
    fn tokens_are_strictly_indexed_and_monotonic() {
        let tokens = tokenize("a b c d");
        for (i, t) in tokens.iter().enumerate() {
            assert_eq!(t.index, i);
        }
    }

    #[test]
    fn span_is_faithful_to_original_text() {
        let text = "Hello,   World! don't";
        let tokens = tokenize(text);
        for t in &tokens {
            let slice = &text[t.span.clone()];
            let retokenized = tokenize(slice);
            assert_eq!(retokenized.len(), 1, "span {:?} -> {:?}", t.span, slice);
            assert_eq!(retokenized[0].value, t.value);
        }
    }

    #[test]
    fn deterministic() {
        let text = "Some license text, with-punctuation and 'quotes'.";
        assert_eq!(tokenize(text), tokenize(text));
    }
}
