//! Reseller authentication and token lifetime.
//!
//! [`Authenticator`] turns a [`Credential`] into a [`TokenPair`] and renews it
//! through the refresh grant. [`Session`] holds the current pair for the
//! duration of a run; the client renews it at most once per rejected call.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::{ProviderError, Result};
use crate::transport::{HttpRequest, HttpTransport, Method};
use crate::types::{Credential, TokenPair};
use crate::utils::log_sanitizer::truncate_for_log;

const TOKEN_PATH: &str = "/authorization/token";

/// Exchanges credentials for tokens at `POST /authorization/token`.
pub struct Authenticator {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
}

impl Authenticator {
    pub fn new(transport: Arc<dyn HttpTransport>, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    /// Obtain the reseller token pair.
    ///
    /// A bearer token is returned as-is with no refresh token.
    pub async fn authenticate(&self, credential: &Credential) -> Result<TokenPair> {
        match credential {
            Credential::Bearer(token) => {
                log::warn!("A directly supplied token cannot be refreshed upon expiry.");
                Ok(TokenPair::access_only(token.clone()))
            }
            Credential::Password { username, password } => {
                log::debug!("Requesting token for user {username}");
                self.grant(
                    "password",
                    &[
                        ("grant_type", "password"),
                        ("username", username.as_str()),
                        ("password", password.as_str()),
                    ],
                )
                .await
            }
        }
    }

    /// Mint a new access token from a refresh token.
    ///
    /// When the server does not rotate the refresh token, the old one is kept.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair> {
        let mut tokens = self
            .grant(
                "refresh_token",
                &[
                    ("grant_type", "refresh_token"),
                    ("refresh_token", refresh_token),
                ],
            )
            .await?;
        if tokens.refresh_token.is_none() {
            tokens.refresh_token = Some(refresh_token.to_string());
        }
        Ok(tokens)
    }

    async fn grant(&self, grant_type: &str, fields: &[(&str, &str)]) -> Result<TokenPair> {
        let request =
            HttpRequest::new(Method::Post, format!("{}{TOKEN_PATH}", self.base_url)).form(fields);
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            log::error!(
                "Token request ({grant_type} grant) failed with HTTP {}",
                response.status
            );
            return Err(ProviderError::AuthenticationFailed {
                grant_type: grant_type.to_string(),
                status: response.status,
                raw_message: (!response.body.is_empty()).then(|| truncate_for_log(&response.body)),
            });
        }

        serde_json::from_str(&response.body).map_err(|e| ProviderError::ParseError {
            endpoint: TOKEN_PATH.to_string(),
            detail: e.to_string(),
        })
    }
}

/// The token pair in use for one principal (the reseller, or one sub-account).
#[derive(Debug)]
pub struct Session {
    tokens: RwLock<TokenPair>,
}

impl Session {
    #[must_use]
    pub fn new(tokens: TokenPair) -> Self {
        Self {
            tokens: RwLock::new(tokens),
        }
    }

    pub async fn access_token(&self) -> String {
        self.tokens.read().await.access_token.clone()
    }

    pub async fn refresh_token(&self) -> Option<String> {
        self.tokens.read().await.refresh_token.clone()
    }

    pub async fn is_refreshable(&self) -> bool {
        self.tokens.read().await.refresh_token.is_some()
    }

    pub(crate) async fn replace(&self, tokens: TokenPair) {
        *self.tokens.write().await = tokens;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeTransport;
    use crate::transport::HttpResponse;

    const BASE: &str = "https://api.test";

    fn authenticator(fake: &Arc<FakeTransport>) -> Authenticator {
        Authenticator::new(fake.clone(), BASE)
    }

    #[tokio::test]
    async fn bearer_token_returned_unchanged_without_network() {
        let fake = Arc::new(FakeTransport::new(BASE));
        let tokens = authenticator(&fake)
            .authenticate(&Credential::Bearer("direct".into()))
            .await;
        assert_eq!(tokens.ok(), Some(TokenPair::access_only("direct")));
        assert_eq!(fake.request_count(), 0);
    }

    #[tokio::test]
    async fn password_grant_posts_form() {
        let fake = Arc::new(FakeTransport::new(BASE));
        fake.respond(
            Method::Post,
            TOKEN_PATH,
            HttpResponse::new(200, r#"{"accessToken":"acc","refreshToken":"ref","expiresIn":"3600"}"#),
        );
        let tokens = authenticator(&fake)
            .authenticate(&Credential::Password {
                username: "reseller".into(),
                password: "pw".into(),
            })
            .await;
        assert_eq!(
            tokens.ok(),
            Some(TokenPair::new("acc", Some("ref".to_string())))
        );

        let requests = fake.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].body.as_deref(),
            Some("grant_type=password&username=reseller&password=pw")
        );
        assert!(requests[0].header_value("authorization").is_none());
    }

    #[tokio::test]
    async fn password_grant_failure_is_auth_error() {
        let fake = Arc::new(FakeTransport::new(BASE));
        fake.respond(
            Method::Post,
            TOKEN_PATH,
            HttpResponse::new(401, r#"{"errorCode":60001,"errorMessage":"invalid_grant"}"#),
        );
        let result = authenticator(&fake)
            .authenticate(&Credential::Password {
                username: "reseller".into(),
                password: "wrong".into(),
            })
            .await;
        assert!(matches!(
            result,
            Err(ProviderError::AuthenticationFailed { status: 401, ref grant_type, .. }) if grant_type == "password"
        ));
    }

    #[tokio::test]
    async fn refresh_keeps_old_refresh_token_when_not_rotated() {
        let fake = Arc::new(FakeTransport::new(BASE));
        fake.respond(
            Method::Post,
            TOKEN_PATH,
            HttpResponse::new(200, r#"{"accessToken":"acc2"}"#),
        );
        let tokens = authenticator(&fake).refresh("ref1").await;
        assert_eq!(
            tokens.ok(),
            Some(TokenPair::new("acc2", Some("ref1".to_string())))
        );
        assert_eq!(
            fake.requests()[0].body.as_deref(),
            Some("grant_type=refresh_token&refresh_token=ref1")
        );
    }

    #[tokio::test]
    async fn session_replace_swaps_tokens() {
        let session = Session::new(TokenPair::new("a", Some("r".into())));
        assert!(session.is_refreshable().await);
        session.replace(TokenPair::access_only("b")).await;
        assert_eq!(session.access_token().await, "b");
        assert!(!session.is_refreshable().await);
    }
}
