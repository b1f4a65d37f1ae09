//! Turns parsed arguments into the run configuration.

use anyhow::bail;
use pool_finder_core::{Destination, ReportOptions};
use pool_finder_provider::{ClientConfig, Credential};

use crate::cli::Args;

#[derive(Debug)]
pub struct RunConfig {
    pub credential: Credential,
    pub client: ClientConfig,
    pub report: ReportOptions,
}

impl RunConfig {
    /// A token takes precedence over username/password when both are given.
    pub fn from_args(args: Args) -> anyhow::Result<Self> {
        let credential = match (args.token, args.username, args.password) {
            (Some(token), _, _) => Credential::Bearer(token),
            (None, Some(username), Some(password)) => Credential::Password { username, password },
            _ => bail!("When token is not provided, both username and password are required"),
        };

        Ok(Self {
            credential,
            client: ClientConfig::with_base_url(args.base_url).page_size(args.page_size),
            report: ReportOptions {
                format: args.format.into(),
                destination: Destination::from(args.output_file),
            },
        })
    }
}
