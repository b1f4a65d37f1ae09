//! # pool-finder-provider
//!
//! Bindings for the parts of the UltraDNS REST API needed to enumerate pool
//! records across a reseller's sub-accounts.
//!
//! | Call | Endpoint | Pagination |
//! |------|----------|------------|
//! | [`Authenticator::authenticate`] | `POST /authorization/token` | - |
//! | [`UltraDnsClient::list_subaccounts`] | `GET /subaccounts` | offset |
//! | [`UltraDnsClient::impersonate`] | `POST /subaccounts/{name}/token` | - |
//! | [`UltraDnsClient::list_zones`] | `GET /v2/zones` | cursor |
//! | [`UltraDnsClient::list_pools`] | `GET /v2/zones/{zone}/rrsets?q=kind:POOLS` | offset |
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)* - Use the platform's native TLS implementation.
//! - **`rustls`** - Use rustls.
//! - **`test-utils`** - Export [`test_utils::FakeTransport`], a scripted transport.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pool_finder_provider::{ClientConfig, Credential, Impersonation, UltraDnsClient};
//!
//! # async fn run() -> pool_finder_provider::Result<()> {
//! let client = UltraDnsClient::new(ClientConfig::default())?;
//! let reseller = client
//!     .login(&Credential::Password {
//!         username: "reseller".to_string(),
//!         password: "secret".to_string(),
//!     })
//!     .await?;
//!
//! for account in client.list_subaccounts(&reseller).await? {
//!     let Impersonation::Granted(sub) = client.impersonate(&reseller, &account.account_name).await?
//!     else {
//!         continue;
//!     };
//!     for zone in client.list_zones(&sub).await? {
//!         let pools = client.list_pools(&sub, zone.name()).await?;
//!         println!("{} {} {}", account.account_name, zone.name(), pools.len());
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError). Status
//! codes with a defined meaning are handled where they occur:
//!
//! - 401 on any authenticated call: refresh once (if the session has a
//!   refresh token) and retry once, else [`ProviderError::Unauthorized`]
//! - 403 "do not have permissions" on sub-account listing:
//!   [`ProviderError::ResellerPermissionDenied`]
//! - failed impersonation of a suspended account: [`Impersonation::Suspended`]
//! - 404 on pool listing: no pools
//!
//! Nothing is retried beyond that single token refresh.

mod auth;
mod client;
mod error;
mod pagination;
mod transport;
mod types;
mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use auth::{Authenticator, Session};
pub use client::{Impersonation, UltraDnsClient};
pub use error::{ProviderError, Result};
pub use pagination::{CursorPage, OffsetPage, fetch_all_cursor, fetch_all_offset};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Method, ReqwestTransport};
pub use types::{
    Account, ClientConfig, Credential, DEFAULT_BASE_URL, MAX_PAGE_SIZE, Pool, PoolProfile,
    TokenPair, Zone, ZoneProperties,
};
