//! Progress calculation: deterministic status-to-percentage mapping.
//!
//! Pure and side-effect-free; identical input always yields identical
//! output, so dashboards can poll cheaply. A rejection reports the
//! percentage of the stage it stalled in, not zero; cancellation alone
//! discards progress.

use crate::workflow::registry::StatusRegistry;
use crate::workflow::types::ExportStatus;

/// Stateless progress calculator.
pub struct ProgressCalculator;

impl ProgressCalculator {
    /// Completion percentage for a status, in `[0, 100]`.
    #[must_use]
    pub fn progress_of(status: ExportStatus) -> u8 {
        let def = StatusRegistry::definition(status);
        let total = StatusRegistry::max_progress_weight();

        // Integer rounding; weights are small so this cannot overflow.
        let scaled = (100 * def.progress_weight + total / 2) / total;
        u8::try_from(scaled).unwrap_or(100)
    }
}
