//! Report types.

mod report;

pub use report::{Destination, ReportFormat, ReportOptions, ReportRow};
