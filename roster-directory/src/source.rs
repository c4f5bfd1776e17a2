//! Employee source abstraction.
//!
//! Views depend on [`EmployeeSource`] rather than on the HTTP client so they
//! can be driven from an in-memory roster in tests and offline runs.

use async_trait::async_trait;

use crate::types::{DataSource, EmployeeRecord, EmployeeRoster};

/// Anything that can produce a roster. Implementations must not fail.
#[async_trait]
pub trait EmployeeSource: Send + Sync {
    async fn fetch_employees(&self) -> EmployeeRoster;
}

/// In-memory source returning a fixed roster.
#[derive(Debug, Clone)]
pub struct StaticDirectory {
    roster: EmployeeRoster,
}

impl StaticDirectory {
    /// Serve the given records as live data.
    pub fn new(records: Vec<EmployeeRecord>) -> Self {
        Self {
            roster: EmployeeRoster::live(records),
        }
    }

    /// Serve the fallback dataset, tagged as such.
    pub fn offline() -> Self {
        Self {
            roster: EmployeeRoster::fallback(),
        }
    }

    pub fn source(&self) -> DataSource {
        self.roster.source
    }
}

#[async_trait]
impl EmployeeSource for StaticDirectory {
    async fn fetch_employees(&self) -> EmployeeRoster {
        self.roster.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offline_source_serves_fallback() {
        let source = StaticDirectory::offline();
        let roster = tokio_test::block_on(source.fetch_employees());

        assert_eq!(source.source(), DataSource::Fallback);
        assert_eq!(roster.len(), 12);
    }
}
