use super::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct DedupPolicy {
    pub keep_blank_identifiers: bool,
}

/// Concatenated source records with one record per identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct MergedTable {
    pub records: Vec<VoterRecord>,
    pub concatenated: usize,
    pub duplicates_removed: usize,
    pub blank_identifier_records: usize,
    pub blank_identifiers_collapsed: usize,
}

impl MergedTable {
    pub(super) fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Concatenates tables in the given order, then keeps the first record seen for each identifier.
pub(super) fn merge_tables<'a, I>(tables: I, policy: DedupPolicy) -> MergedTable
where
    I: IntoIterator<Item = &'a [VoterRecord]>,
{
    let concatenated = tables
        .into_iter()
        .flat_map(|table| table.iter().cloned())
        .collect::<Vec<VoterRecord>>();
    deduplicate(concatenated, policy)
}

pub(super) fn deduplicate(records: Vec<VoterRecord>, policy: DedupPolicy) -> MergedTable {
    let mut merged = MergedTable {
        concatenated: records.len(),
        ..MergedTable::default()
    };
    let mut seen: HashSet<String> = HashSet::with_capacity(records.len());

    for record in records {
        let blank = record.identifier.is_empty();
        if blank {
            merged.blank_identifier_records += 1;
            if policy.keep_blank_identifiers {
                merged.records.push(record);
                continue;
            }
        }

        if seen.insert(record.identifier.clone()) {
            merged.records.push(record);
        } else {
            merged.duplicates_removed += 1;
            if blank {
                merged.blank_identifiers_collapsed += 1;
            }
        }
    }

    merged
}
