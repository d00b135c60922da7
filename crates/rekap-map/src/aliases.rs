//! Header alias lists per logical field.
//!
//! Alias files are TOML with a single `[aliases]` table:
//!
//! ```toml
//! [aliases]
//! diagnosis_code = ["ICD X", "Kode Penyakit"]
//! outcome = ["Status Pulang"]
//! ```
//!
//! Entries from a file are tried after the built-in ones.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{MappingError, Result};
use crate::field::LogicalField;

const DIAGNOSIS_CODE: &[&str] = &[
    "kode_icd",
    "KODE ICD",
    "NO DAFTAR TERINCI",
    "icd 10",
    "icd",
    "diagnosis code",
    "kode diagnosa",
    "diagnosa",
];
const GENDER: &[&str] = &["jenis kelamin", "jk", "gender", "sex", "l/p"];
const AGE_YEARS: &[&str] = &["umur", "umur tahun", "usia", "usia tahun", "age", "age years", "th"];
const AGE_MONTHS: &[&str] = &["umur bulan", "usia bulan", "age months", "bl", "bln"];
const AGE_DAYS: &[&str] = &["umur hari", "usia hari", "age days", "hr", "hari"];
const AFFILIATION: &[&str] = &["golongan", "gol", "kategori", "affiliation", "status pasien"];
const SUB_AFFILIATION: &[&str] = &["sub golongan", "keterangan golongan", "sub affiliation"];
const PAYER_TYPE: &[&str] = &["cara bayar", "jenis bayar", "penjamin", "payer", "payer type"];
const OUTCOME: &[&str] = &["keadaan keluar", "cara keluar", "status keluar", "outcome"];

#[derive(Debug, Deserialize)]
struct AliasFile {
    #[serde(default)]
    aliases: BTreeMap<String, Vec<String>>,
}

/// Ordered alias list per logical field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAliases {
    entries: BTreeMap<LogicalField, Vec<String>>,
}

impl Default for FieldAliases {
    fn default() -> Self {
        let entries = LogicalField::ALL
            .into_iter()
            .map(|field| {
                let defaults = builtin(field).iter().map(|a| (*a).to_string()).collect();
                (field, defaults)
            })
            .collect();
        Self { entries }
    }
}

impl FieldAliases {
    /// Alias lists without any built-in entries.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn get(&self, field: LogicalField) -> &[String] {
        self.entries.get(&field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Appends aliases for a field, skipping ones already listed.
    pub fn extend<I, S>(&mut self, field: LogicalField, aliases: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = self.entries.entry(field).or_default();
        for alias in aliases {
            let alias = alias.into();
            if !list.contains(&alias) {
                list.push(alias);
            }
        }
    }

    /// Merges a TOML alias document over the current lists.
    pub(crate) fn merge_toml(&mut self, content: &str) -> std::result::Result<(), MergeError> {
        let file: AliasFile = toml::from_str(content).map_err(MergeError::Parse)?;
        for (key, aliases) in file.aliases {
            let field = LogicalField::from_key(&key).ok_or(MergeError::UnknownField(key))?;
            self.extend(field, aliases);
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (LogicalField, &[String])> {
        self.entries.iter().map(|(field, list)| (*field, list.as_slice()))
    }
}

#[derive(Debug)]
pub(crate) enum MergeError {
    Parse(toml::de::Error),
    UnknownField(String),
}

/// Built-in aliases extended with the entries of a TOML file.
pub fn load_aliases(path: &Path) -> Result<FieldAliases> {
    let content = std::fs::read_to_string(path).map_err(|source| MappingError::AliasRead {
        path: path.to_path_buf(),
        source,
    })?;
    let mut aliases = FieldAliases::default();
    aliases.merge_toml(&content).map_err(|err| match err {
        MergeError::Parse(source) => MappingError::AliasParse {
            path: path.to_path_buf(),
            source,
        },
        MergeError::UnknownField(key) => MappingError::UnknownAliasField {
            key,
            expected: LogicalField::ALL.map(LogicalField::key).join(", "),
        },
    })?;
    tracing::debug!(path = %path.display(), "loaded column aliases");
    Ok(aliases)
}

fn builtin(field: LogicalField) -> &'static [&'static str] {
    match field {
        LogicalField::DiagnosisCode => DIAGNOSIS_CODE,
        LogicalField::Gender => GENDER,
        LogicalField::AgeYears => AGE_YEARS,
        LogicalField::AgeMonths => AGE_MONTHS,
        LogicalField::AgeDays => AGE_DAYS,
        LogicalField::Affiliation => AFFILIATION,
        LogicalField::SubAffiliation => SUB_AFFILIATION,
        LogicalField::PayerType => PAYER_TYPE,
        LogicalField::Outcome => OUTCOME,
    }
}
