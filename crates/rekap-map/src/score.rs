use rapidfuzz::distance::jaro_winkler;

use crate::field::normalize_column;

/// Minimum similarity for a column to be offered as a suggestion.
pub(crate) const SUGGESTION_THRESHOLD: f64 = 0.80;

/// The available column most similar to any alias, if similar enough.
pub(crate) fn closest_column(columns: &[String], aliases: &[String]) -> Option<String> {
    let aliases: Vec<String> = aliases
        .iter()
        .map(|alias| normalize_column(alias))
        .filter(|alias| !alias.is_empty())
        .collect();

    let mut best: Option<(f64, &String)> = None;
    for column in columns {
        let normalized = normalize_column(column);
        if normalized.is_empty() {
            continue;
        }
        for alias in &aliases {
            let score = jaro_winkler::similarity(normalized.chars(), alias.chars());
            if best.is_none_or(|(top, _)| score > top) {
                best = Some((score, column));
            }
        }
    }
    best.filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .map(|(_, column)| column.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn suggests_near_miss() {
        let columns = strings(&["NO", "KODE IDC", "NAMA"]);
        let aliases = strings(&["kode_icd", "diagnosa"]);
        assert_eq!(closest_column(&columns, &aliases).as_deref(), Some("KODE IDC"));
    }

    #[test]
    fn nothing_when_too_far() {
        let columns = strings(&["NO", "NAMA PASIEN"]);
        let aliases = strings(&["jenis kelamin"]);
        assert_eq!(closest_column(&columns, &aliases), None);
    }
}
