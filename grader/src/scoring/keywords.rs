//! Category keyword detection.
//!
//! Each [`BugCategory`] owns a set of word keywords (matched as whole words, ignoring case)
//! and a set of operator fragments (matched as plain substrings, e.g. `+=` or `len(`).
//! The mapping is an exhaustive `match`, so adding a category without keywords does not
//! compile.

use crate::types::BugCategory;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Keywords and operator fragments associated with `category`.
pub fn keywords_for(category: BugCategory) -> (&'static [&'static str], &'static [&'static str]) {
    match category {
        BugCategory::Syntax => (
            &[
                "syntax",
                "parse error",
                "colon",
                "semicolon",
                "bracket",
                "brackets",
                "parenthesis",
                "parentheses",
                "indentation",
                "indent",
                "typo",
                "unmatched",
                "unterminated",
            ],
            &[],
        ),
        BugCategory::Logic => (
            &[
                "logic",
                "logical",
                "operator",
                "incorrect",
                "instead of",
                "assignment",
                "condition",
                "comparison",
                "calculation",
                "inverted",
                "negated",
                "wrong result",
                "formula",
            ],
            &["+=", "-=", "==", "!="],
        ),
        BugCategory::Runtime => (
            &[
                "runtime",
                "exception",
                "crash",
                "crashes",
                "raises",
                "throws",
                "division by zero",
                "divide by zero",
                "zero division",
                "zerodivisionerror",
                "keyerror",
                "indexerror",
                "panic",
                "panics",
            ],
            &[],
        ),
        BugCategory::Type => (
            &[
                "type error",
                "typeerror",
                "type mismatch",
                "wrong type",
                "cast",
                "casting",
                "concatenation",
                "concatenate",
                "conversion",
                "convert",
                "converted",
                "coercion",
            ],
            &["int(", "str("],
        ),
        BugCategory::NullReference => (
            &[
                "null",
                "none",
                "nil",
                "undefined",
                "null pointer",
                "nullpointerexception",
                "dereference",
                "dereferences",
                "uninitialized",
                "not initialized",
            ],
            &[],
        ),
        BugCategory::OffByOne => (
            &[
                "off by one",
                "off-by-one",
                "off by 1",
                "fencepost",
                "boundary",
                "bounds",
                "out of range",
                "out of bounds",
                "range",
                "last element",
                "first element",
                "index",
            ],
            &["<=", ">=", "len(", "- 1", "-1"],
        ),
        BugCategory::InfiniteLoop => (
            &[
                "infinite",
                "infinitely",
                "never terminates",
                "never ends",
                "endless",
                "hangs",
                "never exits",
                "forever",
                "never increments",
                "never incremented",
                "never updated",
            ],
            &[],
        ),
        BugCategory::ResourceLeak => (
            &[
                "leak",
                "leaks",
                "leaked",
                "not closed",
                "never closed",
                "close",
                "closed",
                "file handle",
                "connection",
                "release",
                "released",
                "dispose",
                "memory",
            ],
            &[],
        ),
        BugCategory::Concurrency => (
            &[
                "race",
                "race condition",
                "deadlock",
                "lock",
                "locks",
                "mutex",
                "thread",
                "threads",
                "concurrent",
                "concurrently",
                "synchronized",
                "synchronization",
                "atomic",
            ],
            &[],
        ),
        BugCategory::Security => (
            &[
                "injection",
                "sql",
                "xss",
                "sanitize",
                "sanitized",
                "unsanitized",
                "escape",
                "escaped",
                "password",
                "secret",
                "vulnerable",
                "vulnerability",
                "security",
                "eval",
                "hardcoded",
            ],
            &[],
        ),
    }
}

struct CategoryMatcher {
    category: BugCategory,
    words: Regex,
    fragments: &'static [&'static str],
}

static MATCHERS: Lazy<Vec<CategoryMatcher>> = Lazy::new(|| {
    BugCategory::ALL
        .iter()
        .map(|&category| {
            let (words, fragments) = keywords_for(category);
            let alternation = words
                .iter()
                .map(|w| regex::escape(w))
                .collect::<Vec<_>>()
                .join("|");
            let words = Regex::new(&format!(r"(?i)\b(?:{alternation})\b"))
                .expect("keyword alternation is built from escaped literals");
            CategoryMatcher {
                category,
                words,
                fragments,
            }
        })
        .collect()
});

/// Categories whose keywords occur in `text`, in declaration order.
pub fn detect_categories(text: &str) -> BTreeSet<BugCategory> {
    let lowered = text.to_lowercase();
    MATCHERS
        .iter()
        .filter(|m| m.words.is_match(&lowered) || m.fragments.iter().any(|f| lowered.contains(f)))
        .map(|m| m.category)
        .collect()
}
