//! Affiliation and payer categories.
//!
//! Categories are tested in a fixed order: home-branch checks, then other
//! branches, then payer keywords, then the general-public catch-all. The
//! first match wins.

use rekap_model::taxonomy::CATEGORY_COLUMNS;

const HOME_BRANCH: &[&str] = &["AD"];
const OTHER_BRANCHES: &[&str] = &["AL", "AU", "POLRI"];
const CIVIL_SERVANT_MARKERS: &[&str] = &["PNS", "ASN"];
const FAMILY_MARKERS: &[&str] = &["KEL", "ISTRI", "SUAMI", "ANAK"];
const VETERAN_MARKERS: &[&str] = &["PURN", "VETERAN", "PEPABRI", "WARAKAWURI"];
const INSURANCE_MARKERS: &[&str] = &["BPJS", "JKN", "ASKES", "KIS"];
const GENERAL_MARKERS: &[&str] = &["UMUM", "TUNAI", "PRIBADI", "MANDIRI"];

/// Patient affiliation category, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Active member of the home branch.
    MilitaryHome,
    CivilServantHome,
    FamilyHome,
    /// Active member of another branch or the police.
    MilitaryOther,
    CivilServantOther,
    FamilyOther,
    /// Retired members and public-insurance patients.
    VeteranOrInsured,
    General,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Self::MilitaryHome,
        Self::CivilServantHome,
        Self::FamilyHome,
        Self::MilitaryOther,
        Self::CivilServantOther,
        Self::FamilyOther,
        Self::VeteranOrInsured,
        Self::General,
    ];

    /// Report column this category is counted under.
    pub fn column(self) -> &'static str {
        CATEGORY_COLUMNS[self as usize]
    }
}

/// Classifies an affiliation code plus optional sub-affiliation tag.
///
/// Branch codes are matched as whole tokens (`TNI-AD`, `AD` but not `BADAN`);
/// the other markers are substring matches. A non-empty value that matches
/// nothing falls into [`Category::General`]; an empty one is unclassified.
pub fn classify_affiliation(affiliation: &str, sub_affiliation: &str) -> Option<Category> {
    let text = format!("{} {}", affiliation.trim(), sub_affiliation.trim()).to_uppercase();
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let tokens: Vec<&str> = text
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();
    let has_token = |set: &[&str]| tokens.iter().any(|t| set.contains(t));
    let has_marker = |set: &[&str]| set.iter().any(|m| text.contains(m));

    let civil_servant = has_marker(CIVIL_SERVANT_MARKERS);
    let family = has_marker(FAMILY_MARKERS);

    if has_token(HOME_BRANCH) {
        return Some(if civil_servant {
            Category::CivilServantHome
        } else if family {
            Category::FamilyHome
        } else {
            Category::MilitaryHome
        });
    }
    if has_token(OTHER_BRANCHES) {
        return Some(if civil_servant {
            Category::CivilServantOther
        } else if family {
            Category::FamilyOther
        } else {
            Category::MilitaryOther
        });
    }
    if has_marker(VETERAN_MARKERS) || has_marker(INSURANCE_MARKERS) {
        return Some(Category::VeteranOrInsured);
    }
    Some(Category::General)
}

/// Secondary lookup on the payer type alone.
///
/// Only payer keywords classify here; there is no catch-all.
pub fn classify_payer(payer_type: &str) -> Option<Category> {
    let text = payer_type.trim().to_uppercase();
    if text.is_empty() {
        return None;
    }
    if VETERAN_MARKERS
        .iter()
        .chain(INSURANCE_MARKERS)
        .any(|m| text.contains(m))
    {
        return Some(Category::VeteranOrInsured);
    }
    if GENERAL_MARKERS.iter().any(|m| text.contains(m)) {
        return Some(Category::General);
    }
    None
}
