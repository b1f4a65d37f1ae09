//! Public data types and UltraDNS wire formats.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.ultradns.com";
/// Largest page the list endpoints accept.
pub const MAX_PAGE_SIZE: u32 = 1000;
/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// ============ Configuration ============

/// Client configuration shared by the transport and the endpoint calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base URL without a trailing slash.
    pub base_url: String,
    /// `limit` sent to every paginated endpoint.
    pub page_size: u32,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Config pointing at `base_url`, with trailing slashes removed.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: MAX_PAGE_SIZE,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

// ============ Credentials ============

/// How the reseller authenticates for the run.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// A bearer token passed in directly. It cannot be refreshed.
    Bearer(String),
    /// Username/password exchanged through the password grant.
    Password { username: String, password: String },
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearer(_) => f.write_str("Credential::Bearer(***)"),
            Self::Password { username, .. } => f
                .debug_struct("Credential::Password")
                .field("username", username)
                .field("password", &"***")
                .finish(),
        }
    }
}

/// Access token plus the refresh token that can renew it, if any.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl TokenPair {
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: Option<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token,
        }
    }

    /// A token that can only be used until it expires.
    #[must_use]
    pub fn access_only(access_token: impl Into<String>) -> Self {
        Self::new(access_token, None)
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"***")
            .field("refreshable", &self.refresh_token.is_some())
            .finish()
    }
}

// ============ Resources ============

/// A sub-account under the reseller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_name: String,
}

/// A DNS zone owned by a sub-account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Zone {
    pub properties: ZoneProperties,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ZoneProperties {
    pub name: String,
}

impl Zone {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.properties.name
    }
}

/// A pool (load-balancing) RRSet within a zone.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub owner_name: String,
    pub profile: PoolProfile,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PoolProfile {
    /// Profile schema, e.g. `http://schemas.ultradns.com/RDPool.jsonschema`.
    #[serde(rename = "@context")]
    pub context: String,
}

impl Pool {
    /// The pool type as reported by the profile's `@context`.
    #[must_use]
    pub fn profile_type(&self) -> &str {
        &self.profile.context
    }
}

// ============ Wire responses ============

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResultInfo {
    pub returned_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubaccountsResponse {
    #[serde(default)]
    pub accounts: Vec<Account>,
    pub result_info: Option<ResultInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubaccountTokenResponse {
    pub access_token: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CursorInfo {
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ZonesResponse {
    #[serde(default)]
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub cursor_info: CursorInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RrSetsResponse {
    #[serde(default)]
    pub rr_sets: Vec<Pool>,
    pub result_info: Option<ResultInfo>,
}
