//! Locale-style string ordering for display names.
//!
//! Names are compared in three levels, the way a root-locale collator does:
//!
//! 1. base characters, ignoring case and accents (`"apple" < "Banana"`),
//!    with whitespace, then punctuation and symbols, then digits all ordered
//!    before letters;
//! 2. accents (`"resume" < "résumé"`);
//! 3. case, lowercase first (`"a" < "A"`).
//!
//! Strings equal at all three levels compare `Equal`, so a stable sort keeps
//! their input order.

use core::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Compare two display names with locale-style collation.
pub fn collate(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| tertiary(a, b))
}

/// Lowercase form used for case-insensitive identity checks.
pub fn fold_case(s: &str) -> String {
    s.to_lowercase()
}

/// Case-insensitive name equality.
pub fn same_name(a: &str, b: &str) -> bool {
    fold_case(a) == fold_case(b)
}

/// Primary weight group of a base character.
fn class(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if c.is_numeric() {
        2
    } else if c.is_alphabetic() {
        3
    } else {
        1
    }
}

fn primary_key(s: &str) -> Vec<(u8, char)> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| (class(c), c))
        .collect()
}

fn secondary_key(s: &str) -> Vec<char> {
    s.nfd().flat_map(char::to_lowercase).collect()
}

fn tertiary(a: &str, b: &str) -> Ordering {
    for (x, y) in a.nfd().zip(b.nfd()) {
        if x == y {
            continue;
        }
        match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}
