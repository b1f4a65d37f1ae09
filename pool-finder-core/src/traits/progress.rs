//! Progress reporting hook

/// Receives progress events while the inventory is collected.
///
/// Implementations only display; they cannot influence the run. All methods
/// default to doing nothing.
pub trait ProgressObserver: Send + Sync {
    /// Sub-account listing finished.
    fn accounts_discovered(&self, _total: usize) {}

    /// Starting sub-account `index` (1-based) of `total`.
    fn account_started(&self, _index: usize, _total: usize, _account: &str) {}

    /// The sub-account was left out of the report.
    fn account_skipped(&self, _account: &str, _reason: &str) {}

    /// Zones of the current sub-account are known.
    fn zones_discovered(&self, _account: &str, _total: usize) {}

    /// Zone `index` (1-based) of `total` is done and contributed `pools` rows.
    fn zone_finished(&self, _index: usize, _total: usize, _zone: &str, _pools: usize) {}

    /// All sub-accounts processed.
    fn finished(&self, _rows: usize) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressObserver for NoopProgress {}
