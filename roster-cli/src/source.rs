//! Choosing the employee source for a run.

use tracing::{info, warn};

use roster_directory::{DirectoryError, EmployeeSource, StaticDirectory};

/// Source for this run: the built-in roster when `offline`, otherwise the
/// one produced by `connect`. A source that cannot be built degrades to the
/// built-in roster so fetching never fails.
pub fn select_source<S, F>(offline: bool, connect: F) -> Box<dyn EmployeeSource>
where
    S: EmployeeSource + 'static,
    F: FnOnce() -> Result<S, DirectoryError>,
{
    if offline {
        info!("Offline mode, using built-in roster");
        return Box::new(StaticDirectory::offline());
    }

    match connect() {
        Ok(source) => Box::new(source),
        Err(e) => {
            warn!(error = %e, "Directory client unavailable, using built-in roster");
            Box::new(StaticDirectory::offline())
        }
    }
}
