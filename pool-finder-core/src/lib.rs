//! Pool Finder Core Library
//!
//! Walks every sub-account of a reseller, collects its zones' pool records
//! into flat [`ReportRow`]s, and renders them as JSON or CSV.
//!
//! - [`PoolInventoryService`]: accounts → zones → pools aggregation
//! - [`report`](services::report): output formats and destinations
//! - [`ProgressObserver`]: hook for progress display, no effect on control flow

pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

pub use error::{CoreError, CoreResult};
pub use services::PoolInventoryService;
pub use services::report::{render, write_report};
pub use traits::{NoopProgress, ProgressObserver};
pub use types::{Destination, ReportFormat, ReportOptions, ReportRow};
