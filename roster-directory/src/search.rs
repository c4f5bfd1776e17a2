//! Directory search.

use crate::types::EmployeeRecord;

/// Records whose name, designation or city contains `query`, ignoring case.
///
/// A blank query matches everything; otherwise the query is matched as
/// typed, surrounding spaces included. Input order is preserved.
pub fn filter_employees<'a>(records: &'a [EmployeeRecord], query: &str) -> Vec<&'a EmployeeRecord> {
    if query.trim().is_empty() {
        return records.iter().collect();
    }
    let needle = query.to_lowercase();

    records
        .iter()
        .filter(|record| {
            [record.name(), record.designation(), record.city()]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}
