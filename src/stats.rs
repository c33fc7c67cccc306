use std::collections::{BTreeMap, HashSet};
use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use crate::model::{AgeBucket, Gender, RelationType, VoterRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatisticsReport {
    pub total: usize,
    pub gender: Vec<CountEntry>,
    pub age_groups: Vec<CountEntry>,
    pub unbucketed_ages: usize,
    pub relation_types: Vec<CountEntry>,
    pub unique_households: usize,
}

impl StatisticsReport {
    pub fn compute(records: &[VoterRecord]) -> Self {
        let mut gender: BTreeMap<Gender, usize> = BTreeMap::new();
        let mut relations: BTreeMap<RelationType, usize> = BTreeMap::new();
        let mut buckets: BTreeMap<AgeBucket, usize> =
            AgeBucket::ALL.into_iter().map(|bucket| (bucket, 0)).collect();
        let mut unbucketed_ages = 0usize;
        let mut households: HashSet<&str> = HashSet::new();

        for record in records {
            *gender.entry(record.gender).or_default() += 1;
            *relations.entry(record.relation_type).or_default() += 1;

            match record.age {
                Some(age) => *buckets.entry(AgeBucket::for_age(age)).or_default() += 1,
                None => unbucketed_ages += 1,
            }

            households.insert(record.house_no.as_str());
        }

        Self {
            total: records.len(),
            gender: ranked(gender, |value| value.as_str()),
            age_groups: buckets
                .into_iter()
                .map(|(bucket, count)| CountEntry {
                    value: bucket.as_str().to_string(),
                    count,
                })
                .collect(),
            unbucketed_ages,
            relation_types: ranked(relations, |value| value.display_name()),
            unique_households: households.len(),
        }
    }

    pub fn count_for(entries: &[CountEntry], value: &str) -> usize {
        entries
            .iter()
            .find(|entry| entry.value == value)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }

    pub fn write_text<W: Write>(&self, output: &mut W) -> Result<()> {
        writeln!(output, "--- Stats Summary ---")?;
        writeln!(output, "Total Voters: {}", self.total)?;

        writeln!(output)?;
        writeln!(output, "Gender Distribution:")?;
        write_entries(output, &self.gender)?;

        writeln!(output)?;
        writeln!(output, "Age Group Distribution:")?;
        write_entries(output, &self.age_groups)?;

        writeln!(output)?;
        writeln!(output, "Relation Type Distribution:")?;
        write_entries(output, &self.relation_types)?;

        writeln!(output)?;
        writeln!(output, "Unique Households: {}", self.unique_households)?;
        Ok(())
    }
}

/// Descending by count; the key order breaks ties.
fn ranked<K: Ord + Copy>(
    counts: BTreeMap<K, usize>,
    name: impl Fn(K) -> &'static str,
) -> Vec<CountEntry> {
    let mut entries = counts.into_iter().collect::<Vec<(K, usize)>>();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    entries
        .into_iter()
        .map(|(key, count)| CountEntry {
            value: name(key).to_string(),
            count,
        })
        .collect()
}

fn write_entries<W: Write>(output: &mut W, entries: &[CountEntry]) -> Result<()> {
    let width = entries
        .iter()
        .map(|entry| entry.value.chars().count())
        .max()
        .unwrap_or(0);
    for entry in entries {
        writeln!(output, "{:<width$}    {}", entry.value, entry.count)?;
    }
    Ok(())
}
