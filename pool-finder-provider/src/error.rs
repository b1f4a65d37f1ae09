use serde::{Deserialize, Serialize};

/// Unified error type for all UltraDNS API operations.
///
/// Variants carry the endpoint (or operation) that failed plus the raw
/// response body where one exists. All variants are serializable for
/// structured error reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, TLS, etc.).
    NetworkError {
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The token endpoint rejected a password or refresh grant.
    AuthenticationFailed {
        /// Grant type that was attempted (`password` or `refresh_token`).
        grant_type: String,
        /// HTTP status returned by the token endpoint.
        status: u16,
        /// Original error body from the API, if available.
        raw_message: Option<String>,
    },

    /// An authenticated call returned 401 and the token could not be renewed.
    Unauthorized {
        /// Endpoint that rejected the token.
        endpoint: String,
        /// Original error body from the API, if available.
        raw_message: Option<String>,
    },

    /// The credential is valid but is not a reseller account, so sub-accounts
    /// cannot be listed.
    ResellerPermissionDenied {
        /// Original error body from the API, if available.
        raw_message: Option<String>,
    },

    /// Any other non-success HTTP status.
    HttpStatus {
        /// Endpoint that failed.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Original response body.
        raw_message: String,
    },

    /// Failed to parse the API response.
    ParseError {
        /// Endpoint whose response could not be parsed.
        endpoint: String,
        /// Details about the parse failure.
        detail: String,
    },
}

impl ProviderError {
    /// 是否为预期行为（凭证/权限配置问题），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationFailed { .. }
                | Self::Unauthorized { .. }
                | Self::ResellerPermissionDenied { .. }
        )
    }

    pub(crate) fn http_status(endpoint: &str, status: u16, body: String) -> Self {
        Self::HttpStatus {
            endpoint: endpoint.to_string(),
            status,
            raw_message: body,
        }
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { detail } => write!(f, "Network error: {detail}"),
            Self::Timeout { detail } => write!(f, "Request timeout: {detail}"),
            Self::AuthenticationFailed {
                grant_type,
                status,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(
                        f,
                        "Authentication failed ({grant_type} grant, HTTP {status}): {msg}"
                    )
                } else {
                    write!(f, "Authentication failed ({grant_type} grant, HTTP {status})")
                }
            }
            Self::Unauthorized {
                endpoint,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "Unauthorized at {endpoint}: {msg}")
                } else {
                    write!(f, "Unauthorized at {endpoint}")
                }
            }
            Self::ResellerPermissionDenied { .. } => write!(
                f,
                "You do not have permissions to access sub-accounts. \
                 Ensure you're using a reseller account."
            ),
            Self::HttpStatus {
                endpoint,
                status,
                raw_message,
            } => {
                write!(f, "HTTP {status} from {endpoint}: {raw_message}")
            }
            Self::ParseError { endpoint, detail } => {
                write!(f, "Parse error for {endpoint}: {detail}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
