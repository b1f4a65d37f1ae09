//! Progress display on stderr through tracing.

use pool_finder_core::ProgressObserver;

pub struct TracingProgress;

impl ProgressObserver for TracingProgress {
    fn accounts_discovered(&self, total: usize) {
        tracing::info!("Processing {total} sub-account(s)");
    }

    fn account_started(&self, index: usize, total: usize, account: &str) {
        tracing::info!("Processing sub-account {index}/{total}: {account}");
    }

    fn account_skipped(&self, account: &str, reason: &str) {
        tracing::warn!("Skipping suspended sub-account: {account}");
        tracing::debug!("Suspension detail for {account}: {reason}");
    }

    fn zones_discovered(&self, account: &str, total: usize) {
        tracing::info!("Processing {total} zone(s) for {account}");
    }

    fn zone_finished(&self, index: usize, total: usize, zone: &str, pools: usize) {
        tracing::debug!("Zone {index}/{total} {zone}: {pools} pool(s)");
    }

    fn finished(&self, rows: usize) {
        tracing::info!("Collected {rows} pool record(s)");
    }
}
