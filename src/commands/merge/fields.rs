use super::*;

/// Separator punctuation OCR leaves between a label and its value.
const LABEL_SEPARATORS: &str = r"[:+?!\-=]*";

/// A compiled "strip this label from the front" rule.
#[derive(Debug, Clone)]
pub(super) struct LabelPattern {
    label: String,
    prefix: Regex,
}

impl LabelPattern {
    pub(super) fn new(label: &str) -> Result<Self> {
        let prefix = Regex::new(&format!(
            r"^(?i:{})\s*{LABEL_SEPARATORS}\s*",
            regex::escape(label)
        ))
        .with_context(|| format!("failed to compile label regex for '{label}'"))?;

        Ok(Self {
            label: label.to_string(),
            prefix,
        })
    }

    pub(super) fn label(&self) -> &str {
        &self.label
    }

    /// Removes the label at the start of `text`; text without it comes back trimmed.
    pub(super) fn strip(&self, text: Option<&str>) -> String {
        let Some(text) = text else {
            return String::new();
        };
        match self.prefix.find(text) {
            Some(found) => text[found.end()..].trim().to_string(),
            None => text.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RelationField {
    pub name: String,
    pub relation: RelationType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct AgeGender {
    pub age: Option<u32>,
    pub gender: Gender,
}

/// Compiled extractors for the packed free-text columns.
#[derive(Debug, Clone)]
pub(super) struct FieldParser {
    name_label: LabelPattern,
    house_label: LabelPattern,
    relation_labels: Vec<(RelationType, String, LabelPattern)>,
    age: Regex,
    gender: Regex,
}

impl FieldParser {
    pub(super) fn new() -> Result<Self> {
        let relation_labels = RelationType::VOCABULARY
            .into_iter()
            .map(|relation| -> Result<(RelationType, String, LabelPattern)> {
                let label = relation.label();
                Ok((relation, label.to_lowercase(), LabelPattern::new(label)?))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name_label: LabelPattern::new("Name")?,
            house_label: LabelPattern::new("House Number")?,
            relation_labels,
            age: Regex::new(&format!(r"(?i)Age\s*{LABEL_SEPARATORS}\s*([0-9]+)"))
                .context("failed to compile age regex")?,
            gender: Regex::new(&format!(r"(?i)Gender\s*{LABEL_SEPARATORS}\s*(\S+)"))
                .context("failed to compile gender regex")?,
        })
    }

    pub(super) fn full_name(&self, line1: Option<&str>) -> String {
        self.name_label.strip(line1)
    }

    pub(super) fn house_number(&self, line3: Option<&str>) -> String {
        self.house_label.strip(line3)
    }

    /// First vocabulary term found anywhere in the text decides the relation,
    /// even when a later term appears earlier in the text.
    pub(super) fn relation(&self, line2: Option<&str>) -> RelationField {
        let Some(text) = line2 else {
            return RelationField {
                name: String::new(),
                relation: RelationType::Unknown,
            };
        };

        let lowered = text.to_lowercase();
        for (relation, needle, pattern) in &self.relation_labels {
            if lowered.contains(needle.as_str()) {
                debug!(label = pattern.label(), "relation label matched");
                return RelationField {
                    name: pattern.strip(Some(text)),
                    relation: *relation,
                };
            }
        }

        RelationField {
            name: text.to_string(),
            relation: RelationType::Unknown,
        }
    }

    /// Age and gender are searched independently.
    pub(super) fn age_gender(&self, line4: Option<&str>) -> AgeGender {
        let Some(text) = line4 else {
            return AgeGender {
                age: None,
                gender: Gender::Unknown,
            };
        };

        let age = self
            .age
            .captures(text)
            .and_then(|captures| captures.get(1))
            .and_then(|digits| digits.as_str().parse::<u32>().ok());

        let gender = self
            .gender
            .captures(text)
            .and_then(|captures| captures.get(1))
            .map(|token| Gender::from_token(token.as_str()))
            .unwrap_or(Gender::Unknown);

        AgeGender { age, gender }
    }
}

/// Last whitespace token of the cell with commas removed.
pub(super) fn parse_identifier(top_right_text: Option<&str>) -> String {
    top_right_text
        .and_then(|text| text.split_whitespace().last())
        .map(|token| token.replace(',', ""))
        .unwrap_or_default()
}
