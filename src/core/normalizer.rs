use crate::domain::model::{DepartmentDraft, RowMap};

/// Column names that may hold the department display name, tried in order
/// before falling back to the row's first field.
const NAME_COLUMNS: [&str; 2] = ["Department", "department"];

/// Normalize raw CSV bytes into department drafts for one institute.
///
/// Infallible by contract: malformed input degrades to best-effort rows
/// rather than failing the batch. Empty input yields an empty batch.
///
/// The first non-blank line is treated as a header when it contains the
/// substring "department" (case-insensitive). With a header, each row is
/// keyed by the header's column names and the full row is kept as metadata.
/// Without one, every line is data and each draft is named by its first
/// field, with no metadata.
pub fn normalize(raw: &[u8], institute_id: &str) -> Vec<DepartmentDraft> {
    let text = String::from_utf8_lossy(raw);
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let Some((&first, rest)) = lines.split_first() else {
        return Vec::new();
    };

    if first.to_lowercase().contains("department") {
        let columns = parse_fields(first);
        tracing::debug!(columns = columns.len(), "detected CSV header row");
        rest.iter()
            .map(|line| keyed_draft(line, &columns, institute_id))
            .collect()
    } else {
        lines
            .iter()
            .map(|line| bare_draft(line, institute_id))
            .collect()
    }
}

/// Parse one line into fields, honoring CSV quoting. A line the reader
/// rejects degrades to a single field holding the whole line.
fn parse_fields(line: &str) -> Vec<String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(line.as_bytes());

    match reader.records().next() {
        Some(Ok(record)) => record.iter().map(str::to_string).collect(),
        _ => vec![line.to_string()],
    }
}

fn keyed_draft(line: &str, columns: &[String], institute_id: &str) -> DepartmentDraft {
    let fields = parse_fields(line);

    let mut metadata = RowMap::new();
    for (position, value) in fields.iter().enumerate() {
        // Fields past the header's width keep their position as the key.
        let column = columns
            .get(position)
            .cloned()
            .unwrap_or_else(|| position.to_string());
        metadata.insert(column, value.clone());
    }

    let name = NAME_COLUMNS
        .iter()
        .find_map(|column| metadata.get(column))
        .map(str::to_string)
        .or_else(|| fields.first().cloned())
        .unwrap_or_default();

    DepartmentDraft {
        institute_id: institute_id.to_string(),
        name,
        metadata,
    }
}

fn bare_draft(line: &str, institute_id: &str) -> DepartmentDraft {
    let fields = parse_fields(line);
    let name = fields.into_iter().next().unwrap_or_default();

    DepartmentDraft {
        institute_id: institute_id.to_string(),
        name,
        metadata: RowMap::new(),
    }
}
