//! Canonical diagnosis codes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A normalized diagnosis code such as `A06.3` or `S52.5.1`.
///
/// Every value is uppercase and free of whitespace. Codes built through
/// [`CanonicalCode::from_parts`] always carry a zero-padded two digit main
/// number and at least one sub-part. Codes built through
/// [`CanonicalCode::literal`] are best-effort fallbacks for expressions that
/// could not be parsed; use [`CanonicalCode::is_canonical`] to tell them apart.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalCode(String);

impl CanonicalCode {
    /// Renders `LETTER + %02d main + (.sub)*`, appending `.0` when `subs` is empty.
    pub fn from_parts(letter: Option<char>, main: u32, subs: &[u32]) -> Self {
        let mut value = String::with_capacity(8);
        if let Some(letter) = letter {
            value.push(letter.to_ascii_uppercase());
        }
        value.push_str(&format!("{main:02}"));
        if subs.is_empty() {
            value.push_str(".0");
        }
        for sub in subs {
            value.push('.');
            value.push_str(&sub.to_string());
        }
        Self(value)
    }

    /// Uppercases `raw` and strips all whitespace, without further parsing.
    pub fn literal(raw: &str) -> Self {
        Self(
            raw.chars()
                .filter(|c| !c.is_whitespace())
                .flat_map(char::to_uppercase)
                .collect(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Leading chapter letter, if any.
    pub fn letter(&self) -> Option<char> {
        self.0.chars().next().filter(char::is_ascii_alphabetic)
    }

    /// Main code number: the digits right after the optional letter.
    pub fn main(&self) -> Option<u32> {
        let rest = match self.letter() {
            Some(letter) => &self.0[letter.len_utf8()..],
            None => self.0.as_str(),
        };
        let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return None;
        }
        digits.parse().ok()
    }

    /// True when the value has the `[A-Z]?NN(.N+)+` shape.
    pub fn is_canonical(&self) -> bool {
        let rest = match self.letter() {
            Some(_) => &self.0[1..],
            None => self.0.as_str(),
        };
        let mut parts = rest.split('.');
        let Some(main) = parts.next() else {
            return false;
        };
        if main.len() != 2 || !main.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        let mut subs = 0;
        for part in parts {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return false;
            }
            subs += 1;
        }
        subs > 0
    }
}

impl fmt::Display for CanonicalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Join key for diagnosis codes: trimmed and uppercased.
///
/// Both the expanded report codes and the raw record codes go through this
/// before comparison, so matching is exact but case-insensitive.
pub fn code_key(raw: &str) -> String {
    raw.trim().to_uppercase()
}
