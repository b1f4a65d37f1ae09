use std::fmt;
use std::path::PathBuf;

use pool_finder_provider::{Account, Pool, Zone};
use serde::{Deserialize, Serialize};

/// One Sub-Account × Zone × Pool line of the report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(rename = "Sub Account Name")]
    pub sub_account_name: String,
    #[serde(rename = "Zone Name")]
    pub zone_name: String,
    #[serde(rename = "Pool Name")]
    pub pool_name: String,
    #[serde(rename = "Pool Type")]
    pub pool_type: String,
}

impl ReportRow {
    /// Column names, in output order.
    pub const HEADERS: [&'static str; 4] = ["Sub Account Name", "Zone Name", "Pool Name", "Pool Type"];

    #[must_use]
    pub fn new(account: &Account, zone: &Zone, pool: &Pool) -> Self {
        Self {
            sub_account_name: account.account_name.clone(),
            zone_name: zone.name().to_string(),
            pool_name: pool.owner_name.clone(),
            pool_type: pool.profile_type().to_string(),
        }
    }
}

/// Output encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Json,
    Csv,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Csv => "csv",
        })
    }
}

/// Where the report goes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Destination {
    #[default]
    Stdout,
    /// A file path; `~` is expanded to the home directory.
    File(PathBuf),
}

impl From<Option<PathBuf>> for Destination {
    fn from(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportOptions {
    pub format: ReportFormat,
    pub destination: Destination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_display_headers() {
        let row = ReportRow {
            sub_account_name: "Acme".into(),
            zone_name: "acme.com.".into(),
            pool_name: "pool1.acme.com.".into(),
            pool_type: "A".into(),
        };
        let json = serde_json::to_value(&row).unwrap_or_default();
        for header in ReportRow::HEADERS {
            assert!(json.get(header).is_some(), "missing {header}");
        }
        assert_eq!(json["Pool Type"], "A");
    }

    #[test]
    fn destination_from_optional_path() {
        assert_eq!(Destination::from(None), Destination::Stdout);
        assert_eq!(
            Destination::from(Some(PathBuf::from("out.csv"))),
            Destination::File(PathBuf::from("out.csv"))
        );
    }
}
