//! Plain-text renderings of the dashboard views.

use std::fmt::Write;

use roster_directory::{
    filter_employees, CityDistribution, DataSource, EmployeeRecord, EmployeeRoster, SalaryBar,
};

const BAR_WIDTH: u64 = 40;

fn source_banner(source: DataSource) -> &'static str {
    match source {
        DataSource::Live => "live directory",
        DataSource::Fallback => "offline fallback roster",
    }
}

/// Directory table filtered by `query`.
pub fn render_directory(roster: &EmployeeRoster, query: &str) -> String {
    let matches = filter_employees(&roster.records, query);
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Employees: {} of {} ({})",
        matches.len(),
        roster.len(),
        source_banner(roster.source)
    );
    if matches.is_empty() {
        let _ = writeln!(out, "No employees match \"{}\"", query);
        return out;
    }

    let _ = writeln!(out, "{:<4} {:<20} {:<22} {:<16} {:>10}", "ID", "NAME", "DESIGNATION", "CITY", "SALARY");
    for record in matches {
        let _ = writeln!(
            out,
            "{:<4} {:<20} {:<22} {:<16} {:>10}",
            record.id,
            record.name(),
            record.designation(),
            record.city(),
            record.salary()
        );
    }
    out
}

/// Detail card for one employee.
pub fn render_detail(record: &EmployeeRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Employee #{}", record.id);
    for (label, value) in [
        ("Name", record.name.as_deref()),
        ("Designation", record.designation.as_deref()),
        ("City", record.city.as_deref()),
        ("Extension", record.ext.as_deref()),
        ("Start date", record.date.as_deref()),
        ("Salary", record.salary.as_deref()),
    ] {
        let _ = writeln!(out, "  {:<12} {}", label, value.unwrap_or("-"));
    }
    out
}

/// Horizontal salary bars scaled to the largest amount.
pub fn render_chart(bars: &[SalaryBar]) -> String {
    let max = bars.iter().map(|b| b.amount).max().unwrap_or(0).max(1);
    let mut out = String::new();

    for bar in bars {
        let width = (u128::from(bar.amount) * u128::from(BAR_WIDTH) / u128::from(max)) as usize;
        let _ = writeln!(out, "{:<12} {:<40} {}", bar.label, "#".repeat(width), bar.display);
    }
    out
}

/// City markers with head counts.
pub fn render_map(distribution: &CityDistribution) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} cities, {} employees",
        distribution.stats.cities, distribution.stats.employees
    );

    for location in &distribution.locations {
        let _ = writeln!(
            out,
            "{:<16} ({:>8.4}, {:>9.4}){} {} employee(s)",
            location.city,
            location.coords.lat,
            location.coords.lon,
            if location.approximate { " ~" } else { "  " },
            location.employees.len()
        );
    }
    out
}
