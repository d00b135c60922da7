use std::collections::HashMap;

use rekap_model::{PatientRecord, code_key};

/// Records grouped by normalized diagnosis code.
///
/// Built once per run so each row costs one lookup per code instead of a
/// scan over every record.
#[derive(Debug, Default)]
pub struct RecordIndex<'a> {
    by_code: HashMap<String, Vec<&'a PatientRecord>>,
}

impl<'a> RecordIndex<'a> {
    /// Records with an empty code are left out; they can never match.
    pub fn build(records: &'a [PatientRecord]) -> Self {
        let mut by_code: HashMap<String, Vec<&'a PatientRecord>> = HashMap::new();
        for record in records {
            let key = code_key(&record.diagnosis_code);
            if key.is_empty() {
                continue;
            }
            by_code.entry(key).or_default().push(record);
        }
        Self { by_code }
    }

    /// Records whose code equals `code` after trimming and uppercasing.
    pub fn lookup(&self, code: &str) -> &[&'a PatientRecord] {
        self.by_code
            .get(&code_key(code))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of distinct codes.
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}
