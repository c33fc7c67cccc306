use super::*;

pub(super) fn write_merged_csv(path: &Path, records: &[VoterRecord]) -> Result<()> {
    write_atomically(path, |file| write_merged_rows(file, records))
        .with_context(|| format!("failed to write merged table {}", path.display()))?;
    info!(path = %path.display(), records = records.len(), "wrote merged table");
    Ok(())
}

pub(super) fn write_merged_rows<W: Write>(writer: W, records: &[VoterRecord]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer
            .serialize(VoterRow::from(record))
            .context("failed to serialize merged row")?;
    }
    csv_writer.flush().context("failed to flush merged rows")?;
    Ok(())
}

/// Loads a table previously written by [`write_merged_csv`].
pub fn read_merged_csv(path: &Path) -> Result<Vec<VoterRecord>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    read_merged_rows(file).with_context(|| format!("failed to parse {}", path.display()))
}

pub(super) fn read_merged_rows<R: Read>(reader: R) -> Result<Vec<VoterRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for (index, row) in csv_reader.deserialize::<VoterRow>().enumerate() {
        let row = row.with_context(|| format!("failed to read merged row {}", index + 1))?;
        records.push(VoterRecord::from(row));
    }
    Ok(records)
}

pub fn print_statistics(statistics: Option<&StatisticsReport>, json: bool) -> Result<()> {
    let output = io::BufWriter::new(io::stdout().lock());
    write_statistics(output, statistics, json)
}

pub(super) fn write_statistics<W: Write>(
    mut output: W,
    statistics: Option<&StatisticsReport>,
    json: bool,
) -> Result<()> {
    match (statistics, json) {
        (Some(report), true) => {
            serde_json::to_writer_pretty(&mut output, report)
                .context("failed to serialize statistics json output")?;
            writeln!(output)?;
        }
        (Some(report), false) => report.write_text(&mut output)?,
        (None, _) => writeln!(output, "No data extracted.")?,
    }

    output.flush()?;
    Ok(())
}
