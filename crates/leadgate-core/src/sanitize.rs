//! Access-code normalization.
//!
//! Pasted codes arrive with look-alike characters and invisible junk:
//! typographic dashes from word processors, non-breaking spaces, zero-width
//! characters, stray newlines. [`sanitize_access_code`] folds all of that
//! into the plain-ASCII form the user was given, so the digest comparison
//! in the gate sees the intended code.

use unicode_normalization::UnicodeNormalization;

/// Normalize a user-supplied access code.
///
/// Applies, in order: NFKC normalization; typographic dashes
/// (U+2010..=U+2015, U+2212) to `-`; small tilde (U+02DC) to `~`;
/// removal of zero-width characters (U+200B..=U+200D), BOM (U+FEFF) and
/// no-break space (U+00A0); removal of all remaining whitespace. The result
/// has nothing left to trim.
///
/// Pure and total: never fails, for any input. NFKC decomposes U+02DC into
/// a space plus combining tilde before the tilde arm can see it, so that
/// arm only matters for inputs that skip normalization.
#[must_use]
pub fn sanitize_access_code(raw: &str) -> String {
    raw.nfkc()
        .filter_map(|c| match c {
            '\u{2010}'..='\u{2015}' | '\u{2212}' => Some('-'),
            '\u{02DC}' => Some('~'),
            '\u{200B}'..='\u{200D}' | '\u{FEFF}' | '\u{00A0}' => None,
            c if c.is_whitespace() => None,
            c => Some(c),
        })
        .collect()
}
