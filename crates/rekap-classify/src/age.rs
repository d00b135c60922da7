//! Age band classification for both report taxonomies.
//!
//! The threshold order below is part of the contract: years are tested from
//! the oldest band down, and months and days are only consulted when the
//! years part is zero.

use rekap_model::Age;
use rekap_model::taxonomy::{EIGHT_AGE_BANDS, GRID_AGE_BANDS};

/// Ages above this many years are treated as data-entry errors.
pub const MAX_PLAUSIBLE_YEARS: u32 = 150;

/// Grid report age bands, youngest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridAgeBand {
    Day0,
    Days1To7,
    Days8To28,
    Days29To3Months,
    Months3To5,
    Months6To11,
    Years1To4,
    Years5To14,
    Years15To24,
    Years25To44,
    Years45To59,
    Years60To64,
    Years65To69,
    Years70To79,
    Years80To84,
    Years85Plus,
}

impl GridAgeBand {
    pub const ALL: [GridAgeBand; 16] = [
        Self::Day0,
        Self::Days1To7,
        Self::Days8To28,
        Self::Days29To3Months,
        Self::Months3To5,
        Self::Months6To11,
        Self::Years1To4,
        Self::Years5To14,
        Self::Years15To24,
        Self::Years25To44,
        Self::Years45To59,
        Self::Years60To64,
        Self::Years65To69,
        Self::Years70To79,
        Self::Years80To84,
        Self::Years85Plus,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Header text of the band, without gender suffix.
    pub fn label(self) -> &'static str {
        GRID_AGE_BANDS[self.index()]
    }
}

/// Classifies an age into the grid taxonomy.
pub fn grid_age_band(age: &Age) -> Option<GridAgeBand> {
    let years = age.years;
    if years > MAX_PLAUSIBLE_YEARS {
        return None;
    }
    let band = if years >= 85 {
        GridAgeBand::Years85Plus
    } else if years >= 80 {
        GridAgeBand::Years80To84
    } else if years >= 70 {
        GridAgeBand::Years70To79
    } else if years >= 65 {
        GridAgeBand::Years65To69
    } else if years >= 60 {
        GridAgeBand::Years60To64
    } else if years >= 45 {
        GridAgeBand::Years45To59
    } else if years >= 25 {
        GridAgeBand::Years25To44
    } else if years >= 15 {
        GridAgeBand::Years15To24
    } else if years >= 5 {
        GridAgeBand::Years5To14
    } else if years >= 1 {
        GridAgeBand::Years1To4
    } else {
        months_or_days_band(age)
    };
    Some(band)
}

fn months_or_days_band(age: &Age) -> GridAgeBand {
    let months = age.months;
    if months >= 12 {
        GridAgeBand::Years1To4
    } else if months >= 6 {
        GridAgeBand::Months6To11
    } else if months >= 3 {
        GridAgeBand::Months3To5
    } else if months >= 1 {
        GridAgeBand::Days29To3Months
    } else {
        match age.days {
            0 => GridAgeBand::Day0,
            1..=7 => GridAgeBand::Days1To7,
            8..=28 => GridAgeBand::Days8To28,
            _ => GridAgeBand::Days29To3Months,
        }
    }
}

/// Eight-band report age bands, youngest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EightBand {
    UpTo28Days,
    Days28To1Year,
    Years1To4,
    Years5To14,
    Years15To25,
    Years26To44,
    Years45To64,
    Over64,
}

impl EightBand {
    pub const ALL: [EightBand; 8] = [
        Self::UpTo28Days,
        Self::Days28To1Year,
        Self::Years1To4,
        Self::Years5To14,
        Self::Years15To25,
        Self::Years26To44,
        Self::Years45To64,
        Self::Over64,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        EIGHT_AGE_BANDS[self.index()]
    }
}

/// Classifies an age into the eight-band taxonomy.
///
/// The first two bands use elapsed days; the rest use whole years. Note the
/// `25-44 TH` band covers years in `(25, 44]`: a 25 year old belongs to
/// `15-25 TH`.
pub fn eight_band(age: &Age) -> Option<EightBand> {
    let years = age.years;
    if years > MAX_PLAUSIBLE_YEARS {
        return None;
    }
    let days = age.total_days();
    let band = if days <= 28 {
        EightBand::UpTo28Days
    } else if days < 365 {
        EightBand::Days28To1Year
    } else if years <= 4 {
        EightBand::Years1To4
    } else if years <= 14 {
        EightBand::Years5To14
    } else if years <= 25 {
        EightBand::Years15To25
    } else if years <= 44 {
        EightBand::Years26To44
    } else if years <= 64 {
        EightBand::Years45To64
    } else {
        EightBand::Over64
    };
    Some(band)
}
