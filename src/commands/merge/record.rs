use super::*;

/// Structures one raw row. Every row yields a record, however sparse.
pub(super) fn build_record(parser: &FieldParser, row: &RawRow) -> VoterRecord {
    let relation = parser.relation(row.line2.as_deref());
    let age_gender = parser.age_gender(row.line4.as_deref());

    VoterRecord {
        full_name: parser.full_name(row.line1.as_deref()),
        relative_name: relation.name,
        relation_type: relation.relation,
        age: age_gender.age,
        gender: age_gender.gender,
        house_no: parser.house_number(row.line3.as_deref()),
        identifier: parse_identifier(row.top_right_text.as_deref()),
    }
}

/// Voter entries carry a "Name" label in their first line.
pub(super) fn looks_like_voter_row(row: &RawRow) -> bool {
    row.line1
        .as_deref()
        .map(|line1| line1.to_lowercase().contains("name"))
        .unwrap_or(false)
}
