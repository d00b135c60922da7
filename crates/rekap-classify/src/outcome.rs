/// Outcome vocabulary that marks a death, matched as substrings.
pub const DEATH_TERMS: [&str; 5] = ["MENINGGAL", "MATI", "DEATH", "MENINGGAL DUNIA", "DIED"];

/// True when a free-text discharge outcome reports a death (case-insensitive).
pub fn is_death(outcome: &str) -> bool {
    let text = outcome.trim().to_uppercase();
    !text.is_empty() && DEATH_TERMS.iter().any(|term| text.contains(term))
}
