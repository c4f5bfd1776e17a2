//! Directory data model and positional row normalization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DirectoryError;
use crate::fallback::fallback_employees;

/// One personnel entry.
///
/// `id` is assigned by row position when sourced from the remote table and is
/// carried unchanged afterwards. Every other field is a display string that
/// may be absent when the source row was short.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Display string, may contain currency symbols and separators
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
}

impl EmployeeRecord {
    /// Build a record from a raw row at the given 0-based position.
    pub fn from_row(index: usize, row: &RawTableRow) -> Self {
        Self {
            id: (index + 1).to_string(),
            name: row.field(RawTableRow::NAME),
            designation: row.field(RawTableRow::DESIGNATION),
            city: row.field(RawTableRow::CITY),
            ext: row.field(RawTableRow::EXT),
            date: row.field(RawTableRow::DATE),
            salary: row.field(RawTableRow::SALARY),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn designation(&self) -> &str {
        self.designation.as_deref().unwrap_or_default()
    }

    pub fn city(&self) -> &str {
        self.city.as_deref().unwrap_or_default()
    }

    pub fn salary(&self) -> &str {
        self.salary.as_deref().unwrap_or_default()
    }
}

/// One source row: `[name, designation, city, ext, date, salary]`.
///
/// Position defines meaning. Cells past the end of a short row read as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTableRow(pub Vec<Option<String>>);

impl RawTableRow {
    pub const NAME: usize = 0;
    pub const DESIGNATION: usize = 1;
    pub const CITY: usize = 2;
    pub const EXT: usize = 3;
    pub const DATE: usize = 4;
    pub const SALARY: usize = 5;

    /// Build a row from string cells.
    pub fn from_strs(cells: &[&str]) -> Self {
        Self(cells.iter().map(|c| Some(c.to_string())).collect())
    }

    /// Parse one JSON row. Scalars are rendered as text, `null` is absent.
    pub fn from_json(value: &Value) -> Result<Self, DirectoryError> {
        let cells = value.as_array().ok_or_else(|| {
            DirectoryError::MalformedEnvelope(format!("row is not an array: {}", value))
        })?;

        Ok(Self(
            cells
                .iter()
                .map(|cell| match cell {
                    Value::Null => None,
                    Value::String(s) => Some(s.clone()),
                    other => Some(other.to_string()),
                })
                .collect(),
        ))
    }

    /// Cell at `index`, `None` when the row is too short.
    pub fn field(&self, index: usize) -> Option<String> {
        self.0.get(index).cloned().flatten()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Extract rows from the `{ TABLE_DATA: { data: [...] } }` envelope.
pub fn parse_envelope(body: &Value) -> Result<Vec<RawTableRow>, DirectoryError> {
    let data = body
        .get("TABLE_DATA")
        .and_then(|table| table.get("data"))
        .ok_or_else(|| DirectoryError::MalformedEnvelope("missing TABLE_DATA.data".into()))?;

    let rows = data.as_array().ok_or_else(|| {
        DirectoryError::MalformedEnvelope("TABLE_DATA.data is not an array".into())
    })?;

    rows.iter().map(RawTableRow::from_json).collect()
}

/// Map rows to records, assigning ids `"1"..="N"` in row order.
pub fn normalize_rows(rows: &[RawTableRow]) -> Vec<EmployeeRecord> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| EmployeeRecord::from_row(index, row))
        .collect()
}

/// Where a roster's records came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Records decoded from the remote endpoint
    Live,
    /// Fixed in-memory dataset substituted after a failure
    Fallback,
}

/// Records returned by a fetch, tagged with their origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRoster {
    pub records: Vec<EmployeeRecord>,
    pub source: DataSource,
}

impl EmployeeRoster {
    pub fn live(records: Vec<EmployeeRecord>) -> Self {
        Self {
            records,
            source: DataSource::Live,
        }
    }

    /// The fixed fallback dataset, never mixed with live rows.
    pub fn fallback() -> Self {
        Self {
            records: fallback_employees(),
            source: DataSource::Fallback,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.source == DataSource::Fallback
    }

    /// Look up a record by id.
    pub fn find(&self, id: &str) -> Option<&EmployeeRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_row_maps_positionally() {
        let rows = vec![RawTableRow::from_strs(&["Amy", "Eng", "NYC", "", "", "$90,000"])];
        let records = normalize_rows(&rows);

        assert_eq!(records.len(), 1);
        let amy = &records[0];
        assert_eq!(amy.id, "1");
        assert_eq!(amy.name.as_deref(), Some("Amy"));
        assert_eq!(amy.designation.as_deref(), Some("Eng"));
        assert_eq!(amy.city.as_deref(), Some("NYC"));
        assert_eq!(amy.ext.as_deref(), Some(""));
        assert_eq!(amy.date.as_deref(), Some(""));
        assert_eq!(amy.salary.as_deref(), Some("$90,000"));
    }

    #[test]
    fn test_ids_follow_row_order() {
        let rows: Vec<_> = (0..5)
            .map(|i| RawTableRow::from_strs(&[&format!("Person {}", i)]))
            .collect();
        let records = normalize_rows(&rows);

        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
        assert_eq!(records[3].name(), "Person 3");
    }

    #[test]
    fn test_short_row_leaves_missing_fields_absent() {
        let rows = vec![RawTableRow::from_strs(&["Ben", "Ops"])];
        let record = &normalize_rows(&rows)[0];

        assert_eq!(record.name(), "Ben");
        assert_eq!(record.city, None);
        assert_eq!(record.ext, None);
        assert_eq!(record.date, None);
        assert_eq!(record.salary, None);
        assert_eq!(record.salary(), "");
    }

    #[test]
    fn test_empty_row_does_not_panic() {
        let record = EmployeeRecord::from_row(0, &RawTableRow::default());
        assert_eq!(record.id, "1");
        assert_eq!(record.name, None);
    }

    #[test]
    fn test_parse_envelope_renders_scalars() {
        let body = json!({
            "TABLE_DATA": { "data": [["Cy", "QA", "Austin", 5421, null, "$1"]] }
        });
        let rows = parse_envelope(&body).unwrap();

        assert_eq!(rows[0].field(RawTableRow::EXT).as_deref(), Some("5421"));
        assert_eq!(rows[0].field(RawTableRow::DATE), None);
    }

    #[test]
    fn test_parse_envelope_rejects_missing_data() {
        assert!(parse_envelope(&json!({})).is_err());
        assert!(parse_envelope(&json!({ "TABLE_DATA": {} })).is_err());
        assert!(parse_envelope(&json!({ "TABLE_DATA": { "data": "nope" } })).is_err());
        assert!(parse_envelope(&json!({ "TABLE_DATA": { "data": [42] } })).is_err());
    }

    #[test]
    fn test_parse_envelope_accepts_empty_table() {
        let rows = parse_envelope(&json!({ "TABLE_DATA": { "data": [] } })).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_record_serializes_camel_case_without_absent_fields() {
        let record = EmployeeRecord::from_row(0, &RawTableRow::from_strs(&["Amy"]));
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({ "id": "1", "name": "Amy" }));
    }

    #[test]
    fn test_roster_find() {
        let roster = EmployeeRoster::fallback();
        assert!(roster.is_degraded());
        assert_eq!(roster.find("8").map(|r| r.name()), Some("Linda Blair"));
        assert!(roster.find("99").is_none());
    }
}
