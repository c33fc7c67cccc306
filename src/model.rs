use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One row of a raw OCR table. Empty cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub line3: Option<String>,
    pub line4: Option<String>,
    pub top_right_text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RelationType {
    FathersName,
    HusbandsName,
    MothersName,
    Others,
    WifeName,
    Unknown,
}

impl RelationType {
    /// Relation labels in match priority order.
    pub const VOCABULARY: [RelationType; 5] = [
        RelationType::FathersName,
        RelationType::HusbandsName,
        RelationType::MothersName,
        RelationType::Others,
        RelationType::WifeName,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::FathersName => "Fathers Name",
            Self::HusbandsName => "Husbands Name",
            Self::MothersName => "Mothers Name",
            Self::Others => "Others",
            Self::WifeName => "Wife Name",
            Self::Unknown => "",
        }
    }

    pub fn from_label(value: &str) -> Self {
        Self::VOCABULARY
            .into_iter()
            .find(|relation| relation.label().eq_ignore_ascii_case(value.trim()))
            .unwrap_or(Self::Unknown)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            other => other.label(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Gender {
    M,
    F,
    Unknown,
}

impl Gender {
    /// Maps a raw OCR token on its first character.
    pub fn from_token(token: &str) -> Self {
        match token.chars().next().map(|ch| ch.to_ascii_lowercase()) {
            Some('f') => Self::F,
            Some('m') => Self::M,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::M => "M",
            Self::F => "F",
            Self::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgeBucket {
    UpTo18,
    From19To25,
    From26To35,
    From36To45,
    From46To60,
    From61To100,
    Over100,
}

impl AgeBucket {
    pub const ALL: [AgeBucket; 7] = [
        AgeBucket::UpTo18,
        AgeBucket::From19To25,
        AgeBucket::From26To35,
        AgeBucket::From36To45,
        AgeBucket::From46To60,
        AgeBucket::From61To100,
        AgeBucket::Over100,
    ];

    // Upper bounds are inclusive.
    pub fn for_age(age: u32) -> Self {
        match age {
            0..=18 => Self::UpTo18,
            19..=25 => Self::From19To25,
            26..=35 => Self::From26To35,
            36..=45 => Self::From36To45,
            46..=60 => Self::From46To60,
            61..=100 => Self::From61To100,
            _ => Self::Over100,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::UpTo18 => "0-18",
            Self::From19To25 => "19-25",
            Self::From26To35 => "26-35",
            Self::From36To45 => "36-45",
            Self::From46To60 => "46-60",
            Self::From61To100 => "61-100",
            Self::Over100 => "100+",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoterRecord {
    pub full_name: String,
    pub relative_name: String,
    pub relation_type: RelationType,
    pub age: Option<u32>,
    pub gender: Gender,
    pub house_no: String,
    pub identifier: String,
}

/// Persisted shape of a [`VoterRecord`] in the merged CSV.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoterRow {
    #[serde(rename = "Voter Full Name", default)]
    pub full_name: String,
    #[serde(rename = "Relative's Name", default)]
    pub relative_name: String,
    #[serde(rename = "Relation Type", default)]
    pub relation_type: String,
    #[serde(rename = "Age", default)]
    pub age: Option<u32>,
    #[serde(rename = "Gender", default)]
    pub gender: String,
    #[serde(rename = "House No", default)]
    pub house_no: String,
    #[serde(rename = "EPIC No", default)]
    pub identifier: String,
}

impl From<&VoterRecord> for VoterRow {
    fn from(record: &VoterRecord) -> Self {
        Self {
            full_name: record.full_name.clone(),
            relative_name: record.relative_name.clone(),
            relation_type: record.relation_type.label().to_string(),
            age: record.age,
            gender: record.gender.as_str().to_string(),
            house_no: record.house_no.clone(),
            identifier: record.identifier.clone(),
        }
    }
}

impl From<VoterRow> for VoterRecord {
    fn from(row: VoterRow) -> Self {
        Self {
            full_name: row.full_name,
            relative_name: row.relative_name,
            relation_type: RelationType::from_label(&row.relation_type),
            age: row.age,
            gender: Gender::from_token(row.gender.trim()),
            house_no: row.house_no,
            identifier: row.identifier,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SourceDescriptor {
    pub path: PathBuf,
    #[serde(default)]
    pub label: Option<String>,
}

impl SourceDescriptor {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            label: None,
        }
    }

    pub fn display_name(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourcesManifest {
    pub sources: Vec<SourceDescriptor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceStatus {
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceSummary {
    pub path: String,
    pub label: Option<String>,
    pub status: SourceStatus,
    pub sha256: Option<String>,
    pub rows_read: usize,
    pub rows_retained: usize,
    pub records: usize,
    pub failure_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MergeCounts {
    pub source_count: usize,
    pub failed_source_count: usize,
    pub concatenated_records: usize,
    pub merged_records: usize,
    pub duplicates_removed: usize,
    pub blank_identifier_records: usize,
    pub blank_identifiers_collapsed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MergeRunReport {
    pub report_version: u32,
    pub generated_at: String,
    pub output_path: Option<String>,
    pub keep_blank_identifiers: bool,
    pub sources: Vec<SourceSummary>,
    pub counts: MergeCounts,
    pub statistics: Option<crate::stats::StatisticsReport>,
    pub warnings: Vec<String>,
}
