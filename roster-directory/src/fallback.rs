//! Fixed in-memory roster used when the directory endpoint is unusable.

use crate::types::EmployeeRecord;

const FALLBACK_ROWS: [(&str, &str, &str, &str); 12] = [
    ("John Doe", "Lead Engineer", "$120,000", "New York"),
    ("Jane Smith", "UI Designer", "$110,000", "Los Angeles"),
    ("Robert Brown", "Backend Developer", "$105,000", "Chicago"),
    ("Emily White", "Project Manager", "$115,000", "Houston"),
    ("Michael Gray", "QA Analyst", "$95,000", "Phoenix"),
    ("Sarah Connor", "Security Specialist", "$130,000", "Philadelphia"),
    ("David Miller", "DevOps Engineer", "$125,000", "San Antonio"),
    ("Linda Blair", "Data Scientist", "$140,000", "San Diego"),
    ("Kevin Hart", "Mobile Developer", "$100,000", "Dallas"),
    ("Nancy Drew", "Solution Architect", "$150,000", "San Jose"),
    ("Alice Wonderland", "UX Researcher", "$98,000", "San Francisco"),
    ("Bob Builder", "Cloud Engineer", "$122,000", "Seattle"),
];

/// The fallback dataset. Always the same 12 records, ids `"1"..="12"`.
pub fn fallback_employees() -> Vec<EmployeeRecord> {
    FALLBACK_ROWS
        .iter()
        .enumerate()
        .map(|(index, (name, designation, salary, city))| EmployeeRecord {
            id: (index + 1).to_string(),
            name: Some(name.to_string()),
            designation: Some(designation.to_string()),
            city: Some(city.to_string()),
            ext: None,
            date: None,
            salary: Some(salary.to_string()),
        })
        .collect()
}
