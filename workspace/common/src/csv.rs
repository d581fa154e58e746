//! Client-side CSV handling for uploaded data files.
//!
//! This is deliberately not a full CSV parser: lines are split on `'\n'` and
//! fields on `','`, each token trimmed. Quoted fields are not supported, which
//! matches what the backend expects from the dashboard upload.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// One uploaded data row: header name to raw string value, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvRow(Vec<(String, String)>);

impl CsvRow {
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self(pairs.into_iter().collect())
    }

    pub fn get(&self, header: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| name == header)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for CsvRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (header, value) in &self.0 {
            map.serialize_entry(header, value)?;
        }
        map.end()
    }
}

fn split_fields(line: &str) -> Vec<String> {
    line.split(',').map(|field| field.trim().to_string()).collect()
}

/// Header names from the first line of `text`.
///
/// An empty file yields a single empty header, which populates the column
/// selects with one blank option.
pub fn read_headers(text: &str) -> Vec<String> {
    split_fields(text.split('\n').next().unwrap_or_default())
}

/// Every data row of `text` whose field count equals the header count.
pub fn parse_rows(text: &str) -> Vec<CsvRow> {
    let mut lines = text.split('\n');
    let headers = split_fields(lines.next().unwrap_or_default());

    let rows: Vec<CsvRow> = lines
        .filter_map(|line| {
            let values = split_fields(line);
            (values.len() == headers.len())
                .then(|| CsvRow::from_pairs(headers.iter().cloned().zip(values)))
        })
        .collect();

    tracing::debug!(
        headers = headers.len(),
        rows = rows.len(),
        "Parsed uploaded CSV"
    );
    rows
}
