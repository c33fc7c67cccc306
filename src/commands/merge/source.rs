use super::*;

const REQUIRED_COLUMNS: [&str; 5] = ["line1", "line2", "line3", "line4", "top_right_text"];

/// Cell values read as missing, matched exactly.
const MISSING_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub(super) fn is_missing_marker(value: &str) -> bool {
    MISSING_MARKERS.contains(&value)
}

/// Structured output of one source file, or an empty table when it failed to load.
#[derive(Debug, Clone)]
pub(super) struct SourceTable {
    pub descriptor: SourceDescriptor,
    pub status: SourceStatus,
    pub sha256: Option<String>,
    pub rows_read: usize,
    pub rows_retained: usize,
    pub records: Vec<VoterRecord>,
    pub failure_reason: Option<String>,
}

impl SourceTable {
    pub(super) fn summary(&self) -> SourceSummary {
        SourceSummary {
            path: self.descriptor.path.display().to_string(),
            label: self.descriptor.label.clone(),
            status: self.status,
            sha256: self.sha256.clone(),
            rows_read: self.rows_read,
            rows_retained: self.rows_retained,
            records: self.records.len(),
            failure_reason: self.failure_reason.clone(),
        }
    }
}

#[derive(Debug, Default)]
pub(super) struct LoadedRows {
    pub rows_read: usize,
    pub records: Vec<VoterRecord>,
}

/// Column positions of the raw OCR fields in one file's header.
#[derive(Debug, Clone, Copy)]
struct RawColumns {
    line1: usize,
    line2: usize,
    line3: usize,
    line4: usize,
    top_right_text: usize,
}

impl RawColumns {
    fn locate(headers: &csv::StringRecord) -> Result<Self> {
        let positions =
            REQUIRED_COLUMNS.map(|name| headers.iter().position(|header| header.trim() == name));

        match positions {
            [
                Some(line1),
                Some(line2),
                Some(line3),
                Some(line4),
                Some(top_right_text),
            ] => Ok(Self {
                line1,
                line2,
                line3,
                line4,
                top_right_text,
            }),
            _ => {
                let missing = REQUIRED_COLUMNS
                    .iter()
                    .zip(positions)
                    .filter(|(_, position)| position.is_none())
                    .map(|(name, _)| *name)
                    .collect::<Vec<&str>>();
                bail!("missing required columns: {}", missing.join(", "))
            }
        }
    }

    fn extract(&self, record: &csv::StringRecord) -> RawRow {
        let cell = |index: usize| {
            record
                .get(index)
                .filter(|value| !is_missing_marker(value))
                .map(ToOwned::to_owned)
        };

        RawRow {
            line1: cell(self.line1),
            line2: cell(self.line2),
            line3: cell(self.line3),
            line4: cell(self.line4),
            top_right_text: cell(self.top_right_text),
        }
    }
}

/// Loads and structures one source. Load failures are logged and yield an empty table.
pub(super) fn process_source(parser: &FieldParser, descriptor: &SourceDescriptor) -> SourceTable {
    let path = &descriptor.path;

    match load_source(parser, path) {
        Ok(loaded) => {
            let rows_retained = loaded.records.len();
            info!(
                source = %descriptor.display_name(),
                rows_read = loaded.rows_read,
                rows_retained,
                "structured source"
            );

            SourceTable {
                descriptor: descriptor.clone(),
                status: SourceStatus::Loaded,
                sha256: sha256_file(path).ok(),
                rows_read: loaded.rows_read,
                rows_retained,
                records: loaded.records,
                failure_reason: None,
            }
        }
        Err(err) => {
            let reason = format!("{err:#}");
            warn!(
                source = %descriptor.display_name(),
                path = %path.display(),
                error = %reason,
                "failed to load source; continuing without it"
            );

            SourceTable {
                descriptor: descriptor.clone(),
                status: SourceStatus::Failed,
                sha256: None,
                rows_read: 0,
                rows_retained: 0,
                records: Vec::new(),
                failure_reason: Some(reason),
            }
        }
    }
}

fn load_source(parser: &FieldParser, path: &Path) -> Result<LoadedRows> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    read_source(parser, file).with_context(|| format!("failed to parse {}", path.display()))
}

/// Reads a raw table and keeps the rows whose first line carries a name label.
pub(super) fn read_source<R: Read>(parser: &FieldParser, reader: R) -> Result<LoadedRows> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .context("failed to read header row")?
        .clone();
    let columns = RawColumns::locate(&headers)?;

    let mut loaded = LoadedRows::default();
    for (index, result) in csv_reader.records().enumerate() {
        let record = result.with_context(|| format!("failed to read data row {}", index + 1))?;
        if record.len() > headers.len() {
            bail!(
                "data row {} has {} fields but the header declares {}",
                index + 1,
                record.len(),
                headers.len()
            );
        }

        loaded.rows_read += 1;
        let row = columns.extract(&record);
        if looks_like_voter_row(&row) {
            loaded.records.push(build_record(parser, &row));
        }
    }

    Ok(loaded)
}
