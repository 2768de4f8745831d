//! Reference License construction (`License::parse`).
//!
//! A `License` is a tokenised, copyright-stripped reference text with a
//! per-token-value frequency table, built once at corpus load time and
//! immutable afterwards.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::license_detection::token::{Token, tokenize};

/// Pattern an SPDX identifier (and a reference filename stem) must match.
pub static IDENTIFIER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._+-]+$").expect("valid regex"));

static COPYRIGHT_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^copyright\s+(\(c\)|\u{00a9})\s+\d{4}.{0,100}$").expect("valid regex"));

/// A known SPDX license, post copyright-stripping and tokenisation.
#[derive(Debug, Clone, PartialEq)]
pub struct License {
    /// SPDX identifier, validated against [`IDENTIFIER_PATTERN`].
    pub identifier: String,
    /// Stripped reference text (copyright lines and a matching leading
    /// `"<id> license:"` line removed).
    pub content: String,
    /// Canonical token stream of `content`.
    pub tokens: Vec<Token>,
    /// Count of occurrences per distinct token value. Totals always equal
    /// `tokens.len()`.
    pub token_frequency: HashMap<String, usize>,
}

/// Drop a leading `"<identifier> license:"` line (case-insensitive, matched
/// against the license's own identifier rather than any word) and any line
/// that looks like a copyright notice.
///
/// Applied by `License::parse` rather than by the tokeniser itself, since
/// the tokeniser has no notion of lines.
pub fn strip_header_lines(identifier: &str, raw: &str) -> String {
    let mut lines: Vec<&str> = raw.lines().collect();

    if let Some(first) = lines.first() {
        let trimmed = first.trim();
        let expected = format!("{identifier} license:");
        if trimmed.eq_ignore_ascii_case(&expected) {
            lines.remove(0);
        }
    }

    lines
        .into_iter()
        .filter(|line| !COPYRIGHT_LINE.is_match(line))
        .collect::<Vec<_>>()
        .join("\n")
}

impl License {
    /// Build a `License` from an SPDX `identifier` and the raw reference
    /// text. Applies line-level pre-stripping, tokenises the result, and
    /// builds the per-token frequency table in one pass.
    pub fn parse(identifier: impl Into<String>, raw_content: &str) -> License {
        let identifier = identifier.into();
        let content = strip_header_lines(&identifier, raw_content);
        let tokens = tokenize(&content);

        let mut token_frequency: HashMap<String, usize> = HashMap::new();
        for token in &tokens {
            *token_frequency.entry(token.value.clone()).or_insert(0) += 1;
        }

        License {
            identifier,
            content,
            tokens,
            token_frequency,
        }
    }
}
