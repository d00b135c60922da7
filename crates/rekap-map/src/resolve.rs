use std::collections::BTreeMap;

use crate::aliases::FieldAliases;
use crate::error::{MappingError, Result};
use crate::field::{LogicalField, normalize_column};
use crate::score::closest_column;

/// Resolves table headers to logical fields through alias lists.
#[derive(Debug, Clone, Default)]
pub struct FieldResolver {
    aliases: FieldAliases,
}

impl FieldResolver {
    pub fn new(aliases: FieldAliases) -> Self {
        Self { aliases }
    }

    pub fn aliases(&self) -> &FieldAliases {
        &self.aliases
    }

    /// Maps every logical field to a column index.
    ///
    /// For each field the aliases are tried in order and the first column in
    /// source order whose normalized header equals the alias wins. A column
    /// claimed by one field is not offered to later fields. Missing optional
    /// fields are left unmapped; the first missing required field is an
    /// error carrying the available headers.
    pub fn resolve(&self, columns: &[String]) -> Result<FieldMapping> {
        let normalized: Vec<String> = columns.iter().map(|c| normalize_column(c)).collect();
        let mut claimed = vec![false; columns.len()];
        let mut mapping = FieldMapping::default();

        for field in LogicalField::ALL {
            let aliases = self.aliases.get(field);
            let found = aliases.iter().find_map(|alias| {
                let alias = normalize_column(alias);
                if alias.is_empty() {
                    return None;
                }
                (0..normalized.len()).find(|&idx| !claimed[idx] && normalized[idx] == alias)
            });

            match found {
                Some(index) => {
                    claimed[index] = true;
                    tracing::debug!(field = field.key(), column = %columns[index], "resolved field");
                    mapping.insert(field, index, columns[index].clone());
                }
                None if field.is_required() => {
                    let suggestion = closest_column(columns, aliases);
                    return Err(MappingError::UnresolvedField {
                        field,
                        available: columns.to_vec(),
                        suggestion,
                    });
                }
                None => {
                    tracing::debug!(field = field.key(), "optional field not present");
                }
            }
        }
        Ok(mapping)
    }
}

/// A header chosen for a logical field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumn {
    pub index: usize,
    pub name: String,
}

/// Result of [`FieldResolver::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMapping {
    columns: BTreeMap<LogicalField, ResolvedColumn>,
}

impl FieldMapping {
    pub fn insert(&mut self, field: LogicalField, index: usize, name: impl Into<String>) {
        self.columns.insert(
            field,
            ResolvedColumn {
                index,
                name: name.into(),
            },
        );
    }

    pub fn index(&self, field: LogicalField) -> Option<usize> {
        self.columns.get(&field).map(|c| c.index)
    }

    pub fn column(&self, field: LogicalField) -> Option<&str> {
        self.columns.get(&field).map(|c| c.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (LogicalField, &ResolvedColumn)> {
        self.columns.iter().map(|(field, column)| (*field, column))
    }
}
