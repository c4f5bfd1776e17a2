//! Roster Directory - employee data acquisition
//!
//! Fetches the tabular employee dataset from the remote directory endpoint,
//! normalizes positional rows into [`EmployeeRecord`]s and substitutes a fixed
//! fallback dataset whenever the endpoint cannot be used.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │       EmployeeSource          │
//! │  (DirectoryClient / Static)   │
//! └──────────────┬───────────────┘
//!                │ EmployeeRoster { records, source }
//!      ┌─────────┼──────────┐
//!      ▼         ▼          ▼
//!   search     chart       geo
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use roster_directory::{DirectoryClient, DirectoryConfig, DataSource};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = DirectoryClient::new(DirectoryConfig::default())?;
//! let roster = client.fetch_employees().await;
//!
//! if roster.source == DataSource::Fallback {
//!     println!("directory offline, showing cached roster");
//! }
//! # Ok(())
//! # }
//! ```

pub mod chart;
pub mod client;
pub mod error;
pub mod fallback;
pub mod geo;
pub mod search;
pub mod source;
pub mod types;

pub use chart::{salary_chart, SalaryBar};
pub use client::{DirectoryClient, DirectoryConfig};
pub use error::DirectoryError;
pub use fallback::fallback_employees;
pub use geo::{city_distribution, CityDistribution, CityLocation, Coordinates, DistributionStats};
pub use search::filter_employees;
pub use source::{EmployeeSource, StaticDirectory};
pub use types::{normalize_rows, parse_envelope, DataSource, EmployeeRecord, EmployeeRoster, RawTableRow};
