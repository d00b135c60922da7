//! Recognition of the individual comma-separated segments of an expression.

use std::sync::LazyLock;

use regex::Regex;

/// `.N-.M`, main code borrowed from the previous emitted code.
static SUB_ONLY_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\.(\d+)-\.(\d+)$").expect("Invalid sub-only range regex"));

/// `NN.N-.M`
static SAME_MAIN_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})\.(\d+)-\.(\d+)$").expect("Invalid same-main range regex")
});

/// `NN.N-MM.M`
static CROSS_MAIN_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})\.(\d+)-(\d{1,2})\.(\d+)$").expect("Invalid cross-main range regex")
});

/// `NN.N.K-.J`
static THREE_LEVEL_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})\.(\d+)\.(\d+)-\.(\d+)$").expect("Invalid three-level range regex")
});

/// `NN-MM`
static MAIN_ONLY_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})-(\d{1,2})$").expect("Invalid main-only range regex"));

static SINGLE_MAIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})$").expect("Invalid single main regex"));

static SINGLE_DOTTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})((?:\.\d+)+)$").expect("Invalid single dotted regex")
});

static SINGLE_SUB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\.(\d+)$").expect("Invalid single sub regex"));

/// The five range notations, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeNotation {
    /// `.N-.M`
    SubOnly { start: u32, end: u32 },
    /// `NN.N-.M`
    SameMain { main: u32, start: u32, end: u32 },
    /// `NN.N-MM.M`
    CrossMain {
        first_main: u32,
        first_sub: u32,
        last_main: u32,
        last_sub: u32,
    },
    /// `NN.N.K-.J`
    ThreeLevel {
        main: u32,
        sub: u32,
        start: u32,
        end: u32,
    },
    /// `NN-MM`
    MainOnly { start: u32, end: u32 },
}

/// What a cleaned segment body looks like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentKind {
    Range(RangeNotation),
    /// `NN`, rendered as `NN.0`.
    Main { main: u32 },
    /// `NN.x[.y...]`; the dotted tail is kept verbatim.
    Dotted { main: u32, tail: String },
    /// `.N`, main code borrowed from the previous emitted code.
    Sub { sub: u32 },
    Unparsed,
}

/// Classifies a segment body: uppercase, whitespace-free, letter prefix removed.
///
/// A letter directly after the dash (`00-A09`) is ignored so that both ends
/// may repeat the chapter letter.
pub fn classify_segment(body: &str) -> SegmentKind {
    if body.contains('-') {
        let body = strip_letter_after_dash(body);
        return classify_range(&body).map_or(SegmentKind::Unparsed, SegmentKind::Range);
    }
    classify_single(body)
}

fn classify_range(body: &str) -> Option<RangeNotation> {
    if let Some(caps) = SUB_ONLY_RANGE.captures(body) {
        return Some(RangeNotation::SubOnly {
            start: number(&caps, 1)?,
            end: number(&caps, 2)?,
        });
    }
    if let Some(caps) = SAME_MAIN_RANGE.captures(body) {
        return Some(RangeNotation::SameMain {
            main: number(&caps, 1)?,
            start: number(&caps, 2)?,
            end: number(&caps, 3)?,
        });
    }
    if let Some(caps) = CROSS_MAIN_RANGE.captures(body) {
        return Some(RangeNotation::CrossMain {
            first_main: number(&caps, 1)?,
            first_sub: number(&caps, 2)?,
            last_main: number(&caps, 3)?,
            last_sub: number(&caps, 4)?,
        });
    }
    if let Some(caps) = THREE_LEVEL_RANGE.captures(body) {
        return Some(RangeNotation::ThreeLevel {
            main: number(&caps, 1)?,
            sub: number(&caps, 2)?,
            start: number(&caps, 3)?,
            end: number(&caps, 4)?,
        });
    }
    if let Some(caps) = MAIN_ONLY_RANGE.captures(body) {
        return Some(RangeNotation::MainOnly {
            start: number(&caps, 1)?,
            end: number(&caps, 2)?,
        });
    }
    None
}

fn classify_single(body: &str) -> SegmentKind {
    if let Some(main) = SINGLE_MAIN.captures(body).and_then(|caps| number(&caps, 1)) {
        return SegmentKind::Main { main };
    }
    if let Some(caps) = SINGLE_DOTTED.captures(body) {
        if let Some(main) = number(&caps, 1) {
            return SegmentKind::Dotted {
                main,
                tail: caps[2].to_string(),
            };
        }
    }
    if let Some(sub) = SINGLE_SUB.captures(body).and_then(|caps| number(&caps, 1)) {
        return SegmentKind::Sub { sub };
    }
    SegmentKind::Unparsed
}

fn number(caps: &regex::Captures<'_>, index: usize) -> Option<u32> {
    caps.get(index)?.as_str().parse().ok()
}

fn strip_letter_after_dash(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut after_dash = false;
    for c in body.chars() {
        if after_dash && c.is_ascii_alphabetic() {
            after_dash = false;
            continue;
        }
        after_dash = c == '-';
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_priority() {
        assert_eq!(
            classify_segment(".3-.5"),
            SegmentKind::Range(RangeNotation::SubOnly { start: 3, end: 5 })
        );
        assert_eq!(
            classify_segment("06.0-.3"),
            SegmentKind::Range(RangeNotation::SameMain {
                main: 6,
                start: 0,
                end: 3
            })
        );
        assert_eq!(
            classify_segment("15.1-16.2"),
            SegmentKind::Range(RangeNotation::CrossMain {
                first_main: 15,
                first_sub: 1,
                last_main: 16,
                last_sub: 2
            })
        );
        assert_eq!(
            classify_segment("52.5.1-.3"),
            SegmentKind::Range(RangeNotation::ThreeLevel {
                main: 52,
                sub: 5,
                start: 1,
                end: 3
            })
        );
        assert_eq!(
            classify_segment("04-05"),
            SegmentKind::Range(RangeNotation::MainOnly { start: 4, end: 5 })
        );
    }

    #[test]
    fn letter_after_dash_is_ignored() {
        assert_eq!(
            classify_segment("00-A09"),
            SegmentKind::Range(RangeNotation::MainOnly { start: 0, end: 9 })
        );
    }

    #[test]
    fn singles() {
        assert_eq!(classify_segment("0"), SegmentKind::Main { main: 0 });
        assert_eq!(
            classify_segment("6.01"),
            SegmentKind::Dotted {
                main: 6,
                tail: ".01".to_string()
            }
        );
        assert_eq!(classify_segment(".4"), SegmentKind::Sub { sub: 4 });
    }

    #[test]
    fn unparsed() {
        assert_eq!(classify_segment("100"), SegmentKind::Unparsed);
        assert_eq!(classify_segment("06.0-"), SegmentKind::Unparsed);
        assert_eq!(classify_segment("X"), SegmentKind::Unparsed);
        assert_eq!(classify_segment("99999999999-1"), SegmentKind::Unparsed);
    }
}
