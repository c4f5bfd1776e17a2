//! Salary bar chart data.

use serde::Serialize;

use crate::types::EmployeeRecord;

/// Maximum number of bars rendered.
pub const MAX_BARS: usize = 10;

/// One bar in the salary chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryBar {
    /// First word of the employee name
    pub label: String,
    pub full_name: String,
    /// Salary reduced to its digits
    pub amount: u64,
    /// Salary as shown in the directory
    pub display: String,
}

/// Bars for the first [`MAX_BARS`] records.
pub fn salary_chart(records: &[EmployeeRecord]) -> Vec<SalaryBar> {
    records
        .iter()
        .take(MAX_BARS)
        .map(|record| {
            let full_name = record
                .name
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "Unknown".to_string());
            let display = record
                .salary
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "0".to_string());
            SalaryBar {
                label: full_name.split(' ').next().unwrap_or_default().to_string(),
                amount: parse_amount(&display),
                full_name,
                display,
            }
        })
        .collect()
}

/// Digits of a display salary as a number; 0 when there are none.
///
/// Amounts too large for `u64` saturate.
pub fn parse_amount(display: &str) -> u64 {
    let digits: String = display.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback_employees;
    use crate::types::{normalize_rows, RawTableRow};

    #[test]
    fn test_chart_takes_first_ten() {
        let bars = salary_chart(&fallback_employees());
        assert_eq!(bars.len(), MAX_BARS);
        assert_eq!(bars[0].label, "John");
        assert_eq!(bars[0].full_name, "John Doe");
        assert_eq!(bars[0].amount, 120_000);
        assert_eq!(bars[0].display, "$120,000");
        assert_eq!(bars[9].full_name, "Nancy Drew");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$90,000"), 90_000);
        assert_eq!(parse_amount("€1.234"), 1234);
        assert_eq!(parse_amount("n/a"), 0);
        assert_eq!(parse_amount(""), 0);
        assert_eq!(parse_amount("$1,000,000,000,000,000,000"), u64::MAX);
    }

    #[test]
    fn test_missing_name_and_salary() {
        let record = EmployeeRecord {
            id: "1".into(),
            name: None,
            designation: None,
            city: None,
            ext: None,
            date: None,
            salary: None,
        };
        let bars = salary_chart(&[record]);
        assert_eq!(bars[0].label, "Unknown");
        assert_eq!(bars[0].amount, 0);
        assert_eq!(bars[0].display, "0");
    }

    #[test]
    fn test_empty_name_and_salary_use_defaults() {
        let rows = [RawTableRow::from_strs(&["", "Eng", "NYC", "", "", ""])];
        let bars = salary_chart(&normalize_rows(&rows));
        assert_eq!(bars[0].full_name, "Unknown");
        assert_eq!(bars[0].label, "Unknown");
        assert_eq!(bars[0].display, "0");
        assert_eq!(bars[0].amount, 0);
    }
}
