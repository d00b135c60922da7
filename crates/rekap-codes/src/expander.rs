//! Expression-level expansion.

use std::ops::RangeInclusive;
use std::sync::LazyLock;

use regex::Regex;
use rekap_model::CanonicalCode;
use tracing::debug;

use crate::segment::{RangeNotation, SegmentKind, classify_segment};

/// Largest number of codes a single segment may produce before it is
/// treated as malformed and kept as a literal.
pub const MAX_SEGMENT_CODES: usize = 1000;

/// A single letter followed by whitespace at the very start of the expression.
static LEADING_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^([A-Z])\s+(.*)$").expect("Invalid leading prefix regex"));

/// Expands `expression` with no default prefix.
pub fn expand(expression: &str) -> Vec<CanonicalCode> {
    Expander::new().expand(expression)
}

/// Expands `expression`, using `prefix` when the expression has no leading letter.
pub fn expand_with_prefix(expression: &str, prefix: Option<char>) -> Vec<CanonicalCode> {
    Expander::new().with_default_prefix(prefix).expand(expression)
}

/// Code range expander.
///
/// Holds no state between calls; the only context a segment sees is the
/// list of codes already emitted for the same expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expander {
    default_prefix: Option<char>,
    max_segment_codes: usize,
}

impl Default for Expander {
    fn default() -> Self {
        Self::new()
    }
}

impl Expander {
    pub fn new() -> Self {
        Self {
            default_prefix: None,
            max_segment_codes: MAX_SEGMENT_CODES,
        }
    }

    /// Letter applied when the expression itself carries no leading prefix.
    #[must_use]
    pub fn with_default_prefix(mut self, prefix: Option<char>) -> Self {
        self.default_prefix = prefix.map(|c| c.to_ascii_uppercase());
        self
    }

    #[must_use]
    pub fn with_max_segment_codes(mut self, limit: usize) -> Self {
        self.max_segment_codes = limit;
        self
    }

    /// Expands a free-text code expression into canonical codes, in order.
    pub fn expand(&self, expression: &str) -> Vec<CanonicalCode> {
        let upper = expression.trim().to_uppercase();
        let (prefix, rest) = match LEADING_PREFIX.captures(&upper) {
            Some(caps) => (
                caps[1].chars().next(),
                caps.get(2).map_or("", |m| m.as_str()),
            ),
            None => (self.default_prefix, upper.as_str()),
        };

        let mut codes = Vec::new();
        for raw in rest.split(',') {
            let segment: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
            if segment.is_empty() {
                continue;
            }
            self.expand_segment(&segment, prefix, &mut codes);
        }
        codes
    }

    fn expand_segment(&self, segment: &str, prefix: Option<char>, out: &mut Vec<CanonicalCode>) {
        let (explicit, body) = split_letter(segment);
        let letter = explicit.or(prefix);

        match classify_segment(body) {
            SegmentKind::Range(RangeNotation::SubOnly { start, end }) => {
                let Some((main, borrowed)) = previous_main(out) else {
                    debug!(segment, "sub-code range without a preceding code, kept literal");
                    out.push(CanonicalCode::literal(segment));
                    return;
                };
                let letter = explicit.or(borrowed).or(prefix);
                match self.span(start, end, 1) {
                    Some(subs) => {
                        out.extend(subs.map(|sub| CanonicalCode::from_parts(letter, main, &[sub])));
                    }
                    None => out.push(fallback(letter, body)),
                }
            }
            SegmentKind::Range(RangeNotation::SameMain { main, start, end }) => {
                match self.span(start, end, 1) {
                    Some(subs) => {
                        out.extend(subs.map(|sub| CanonicalCode::from_parts(letter, main, &[sub])));
                    }
                    None => out.push(fallback(letter, body)),
                }
            }
            SegmentKind::Range(RangeNotation::CrossMain {
                first_main,
                first_sub,
                last_main,
                last_sub,
            }) => match self.cross_main(first_main, first_sub, last_main, last_sub) {
                Some(pairs) => out.extend(
                    pairs
                        .into_iter()
                        .map(|(main, sub)| CanonicalCode::from_parts(letter, main, &[sub])),
                ),
                None => out.push(fallback(letter, body)),
            },
            SegmentKind::Range(RangeNotation::ThreeLevel {
                main,
                sub,
                start,
                end,
            }) => match self.span(start, end, 1) {
                Some(levels) => out.extend(
                    levels.map(|level| CanonicalCode::from_parts(letter, main, &[sub, level])),
                ),
                None => out.push(fallback(letter, body)),
            },
            SegmentKind::Range(RangeNotation::MainOnly { start, end }) => {
                match self.span(start, end, 10) {
                    Some(mains) => {
                        for main in mains {
                            out.extend(
                                (0..=9).map(|sub| CanonicalCode::from_parts(letter, main, &[sub])),
                            );
                        }
                    }
                    None => out.push(fallback(letter, body)),
                }
            }
            SegmentKind::Main { main } => out.push(CanonicalCode::from_parts(letter, main, &[])),
            SegmentKind::Dotted { main, tail } => {
                out.push(CanonicalCode::literal(&format!(
                    "{}{main:02}{tail}",
                    letter.map(String::from).unwrap_or_default()
                )));
            }
            SegmentKind::Sub { sub } => match previous_main(out) {
                Some((main, borrowed)) => {
                    let letter = explicit.or(borrowed).or(prefix);
                    out.push(CanonicalCode::from_parts(letter, main, &[sub]));
                }
                None => out.push(CanonicalCode::literal(segment)),
            },
            SegmentKind::Unparsed => {
                debug!(segment, "unrecognized code notation, kept literal");
                out.push(fallback(letter, body));
            }
        }
    }

    /// Inclusive bounds, rejected when reversed or when `start..=end` times
    /// `per_step` codes would exceed the segment limit.
    fn span(&self, start: u32, end: u32, per_step: usize) -> Option<RangeInclusive<u32>> {
        if start > end {
            debug!(start, end, "reversed code range");
            return None;
        }
        let steps = usize::try_from(end - start).ok()?.checked_add(1)?;
        if steps.checked_mul(per_step)? > self.max_segment_codes {
            debug!(start, end, "code range exceeds segment limit");
            return None;
        }
        Some(start..=end)
    }

    /// `(main, sub)` pairs: first main from its start sub to `.9`, interior
    /// mains `.0`-`.9`, last main `.0` to its end sub.
    fn cross_main(
        &self,
        first_main: u32,
        first_sub: u32,
        last_main: u32,
        last_sub: u32,
    ) -> Option<Vec<(u32, u32)>> {
        if first_main == last_main {
            let subs = self.span(first_sub, last_sub, 1)?;
            return Some(subs.map(|sub| (first_main, sub)).collect());
        }
        if first_sub > 9 {
            debug!(first_main, first_sub, "cross-main range starts past .9");
            return None;
        }
        let mains = self.span(first_main, last_main, 10)?;
        if usize::try_from(last_sub).ok()? >= self.max_segment_codes {
            return None;
        }
        let mut pairs = Vec::new();
        for main in mains {
            let subs = if main == first_main {
                first_sub..=9
            } else if main == last_main {
                0..=last_sub
            } else {
                0..=9
            };
            pairs.extend(subs.map(|sub| (main, sub)));
        }
        if pairs.len() > self.max_segment_codes {
            return None;
        }
        Some(pairs)
    }
}

/// Splits an explicit leading letter off a whitespace-free segment.
fn split_letter(segment: &str) -> (Option<char>, &str) {
    match segment.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => (Some(c), &segment[c.len_utf8()..]),
        _ => (None, segment),
    }
}

/// Main code and letter of the last emitted code, if it has a main code.
fn previous_main(out: &[CanonicalCode]) -> Option<(u32, Option<char>)> {
    let last = out.last()?;
    Some((last.main()?, last.letter()))
}

fn fallback(letter: Option<char>, body: &str) -> CanonicalCode {
    let mut raw = String::with_capacity(body.len() + 1);
    if let Some(letter) = letter {
        raw.push(letter);
    }
    raw.push_str(body);
    CanonicalCode::literal(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(codes: &[CanonicalCode]) -> Vec<&str> {
        codes.iter().map(CanonicalCode::as_str).collect()
    }

    #[test]
    fn single_main_code_gets_default_sub() {
        assert_eq!(strs(&expand("A 00")), ["A00.0"]);
        assert_eq!(strs(&expand("a00")), ["A00.0"]);
        assert_eq!(strs(&expand("A 1")), ["A01.0"]);
    }

    #[test]
    fn dotted_single_is_padded_and_kept() {
        assert_eq!(strs(&expand("B 6.01")), ["B06.01"]);
        assert_eq!(strs(&expand("S52.5.1")), ["S52.5.1"]);
    }

    #[test]
    fn sub_range_then_borrowed_main() {
        assert_eq!(
            strs(&expand("A 06.0-.3,.5-.9")),
            [
                "A06.0", "A06.1", "A06.2", "A06.3", "A06.5", "A06.6", "A06.7", "A06.8", "A06.9"
            ]
        );
    }

    #[test]
    fn borrowed_main_uses_previous_letter() {
        assert_eq!(
            strs(&expand("B20.1, .4-.5")),
            ["B20.1", "B20.4", "B20.5"]
        );
    }

    #[test]
    fn sub_range_without_previous_code_is_literal() {
        assert_eq!(strs(&expand(".3-.5")), [".3-.5"]);
        assert_eq!(strs(&expand("A .3-.5")), [".3-.5"]);
    }

    #[test]
    fn three_level_range() {
        assert_eq!(
            strs(&expand("S 52.5.1-.3")),
            ["S52.5.1", "S52.5.2", "S52.5.3"]
        );
    }

    #[test]
    fn main_only_range_with_default_prefix() {
        let codes = expand_with_prefix("04-05", Some('a'));
        assert_eq!(codes.len(), 20);
        assert_eq!(codes[0].as_str(), "A04.0");
        assert_eq!(codes[9].as_str(), "A04.9");
        assert_eq!(codes[10].as_str(), "A05.0");
        assert_eq!(codes[19].as_str(), "A05.9");
    }

    #[test]
    fn leading_prefix_overrides_default() {
        let codes = expand_with_prefix("B 04", Some('A'));
        assert_eq!(strs(&codes), ["B04.0"]);
    }

    #[test]
    fn letter_on_both_ends_of_range() {
        let codes = expand("A00-A01");
        assert_eq!(codes.len(), 20);
        assert_eq!(codes[19].as_str(), "A01.9");
    }

    #[test]
    fn reversed_range_is_literal() {
        assert_eq!(strs(&expand("A 06.5-.3")), ["A06.5-.3"]);
        assert_eq!(strs(&expand("A 09-04")), ["A09-04"]);
    }

    #[test]
    fn oversized_segment_is_literal() {
        let expander = Expander::new().with_max_segment_codes(5);
        assert_eq!(strs(&expander.expand("A 01-02")), ["A01-02"]);
        assert_eq!(expander.expand("A 01.0-.4").len(), 5);
    }

    #[test]
    fn garbage_survives_as_cleaned_literal() {
        assert_eq!(strs(&expand("  dtd 12 x ")), ["DTD12X"]);
        assert!(expand("   ").is_empty());
        assert!(expand(",,").is_empty());
    }
}
