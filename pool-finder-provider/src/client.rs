//! UltraDNS endpoint calls.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::auth::{Authenticator, Session};
use crate::error::{ProviderError, Result};
use crate::pagination::{CursorPage, OffsetPage, fetch_all_cursor, fetch_all_offset};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, Method, ReqwestTransport};
use crate::types::{
    Account, ClientConfig, Credential, Pool, RrSetsResponse, SubaccountTokenResponse,
    SubaccountsResponse, TokenPair, Zone, ZonesResponse,
};
use crate::utils::log_sanitizer::truncate_for_log;

/// Body marker of a 403 on `/subaccounts` for a non-reseller credential.
const NO_PERMISSION_MARKER: &str = "do not have permissions";
/// Body marker of a failed impersonation for a suspended sub-account.
const SUSPENDED_MARKER: &str = "is suspended";

/// Outcome of requesting a sub-account scoped token.
#[derive(Debug)]
pub enum Impersonation {
    /// Token granted; use this session for the sub-account's calls.
    Granted(Session),
    /// The sub-account is suspended and should be left out of the run.
    Suspended {
        /// Server's explanation.
        reason: String,
    },
}

/// UltraDNS API client
pub struct UltraDnsClient {
    transport: Arc<dyn HttpTransport>,
    authenticator: Authenticator,
    config: ClientConfig,
}

impl UltraDnsClient {
    /// Client talking to the real API over reqwest.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = Arc::new(ReqwestTransport::new(&config)?);
        Ok(Self::with_transport(transport, config))
    }

    /// Client over any transport (used by tests with a scripted transport).
    pub fn with_transport(transport: Arc<dyn HttpTransport>, config: ClientConfig) -> Self {
        let authenticator = Authenticator::new(Arc::clone(&transport), config.base_url.clone());
        Self {
            transport,
            authenticator,
            config,
        }
    }

    /// Authenticate the reseller and open its session.
    pub async fn login(&self, credential: &Credential) -> Result<Session> {
        let tokens = self.authenticator.authenticate(credential).await?;
        Ok(Session::new(tokens))
    }

    /// List every sub-account of the reseller, in API order.
    ///
    /// A 403 saying the caller lacks permission becomes
    /// [`ProviderError::ResellerPermissionDenied`] and ends the listing.
    pub async fn list_subaccounts(&self, session: &Session) -> Result<Vec<Account>> {
        let page_size = self.config.page_size;
        fetch_all_offset(page_size, move |offset| {
            self.subaccounts_page(session, page_size, offset)
        })
        .await
    }

    async fn subaccounts_page(
        &self,
        session: &Session,
        limit: u32,
        offset: u32,
    ) -> Result<Option<OffsetPage<Account>>> {
        let path = format!("/subaccounts?limit={limit}&offset={offset}");
        let response = self.send_authorized(session, Method::Get, &path).await?;

        if response.status == 403 && response.body.contains(NO_PERMISSION_MARKER) {
            log::error!("Sub-account listing denied: credential is not a reseller account");
            return Err(ProviderError::ResellerPermissionDenied {
                raw_message: Some(truncate_for_log(&response.body)),
            });
        }
        let data: SubaccountsResponse = Self::expect_json("/subaccounts", response)?;

        Ok(Some(match data.result_info {
            Some(info) => OffsetPage {
                items: data.accounts,
                returned_count: info.returned_count,
            },
            None => OffsetPage::from_items(data.accounts),
        }))
    }

    /// Exchange the reseller session for a sub-account scoped one.
    ///
    /// A suspended sub-account is reported as [`Impersonation::Suspended`]
    /// rather than an error.
    pub async fn impersonate(&self, session: &Session, account_name: &str) -> Result<Impersonation> {
        let endpoint = "/subaccounts/{name}/token";
        let path = format!(
            "/subaccounts/{}/token",
            urlencoding::encode(account_name)
        );
        let request = self
            .request(Method::Post, &path)
            .header("Content-Type", "application/json");
        let response = self.send_with_renewal(session, request, &path).await?;

        if !response.is_success() {
            if response.body.contains(SUSPENDED_MARKER) {
                log::debug!("Impersonation refused, sub-account {account_name} is suspended");
                return Ok(Impersonation::Suspended {
                    reason: truncate_for_log(&response.body),
                });
            }
            return Err(ProviderError::http_status(
                endpoint,
                response.status,
                response.body,
            ));
        }

        let token: SubaccountTokenResponse = Self::parse_json(endpoint, &response.body)?;
        Ok(Impersonation::Granted(Session::new(TokenPair::access_only(
            token.access_token,
        ))))
    }

    /// List every zone visible to the session, following the cursor.
    pub async fn list_zones(&self, session: &Session) -> Result<Vec<Zone>> {
        let page_size = self.config.page_size;
        fetch_all_cursor(move |cursor| self.zones_page(session, page_size, cursor)).await
    }

    async fn zones_page(
        &self,
        session: &Session,
        limit: u32,
        cursor: Option<String>,
    ) -> Result<CursorPage<Zone>> {
        let mut path = format!("/v2/zones?limit={limit}");
        if let Some(cursor) = cursor {
            path.push_str("&cursor=");
            path.push_str(&urlencoding::encode(&cursor));
        }
        let response = self.send_authorized(session, Method::Get, &path).await?;
        let data: ZonesResponse = Self::expect_json("/v2/zones", response)?;

        Ok(CursorPage {
            items: data.zones,
            next: data.cursor_info.next,
        })
    }

    /// List the pool RRSets of a zone. A zone without pools yields an empty list.
    pub async fn list_pools(&self, session: &Session, zone_name: &str) -> Result<Vec<Pool>> {
        let page_size = self.config.page_size;
        let zone = urlencoding::encode(zone_name).into_owned();
        let zone = zone.as_str();
        fetch_all_offset(page_size, move |offset| {
            self.pools_page(session, zone, page_size, offset)
        })
        .await
    }

    async fn pools_page(
        &self,
        session: &Session,
        encoded_zone: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Option<OffsetPage<Pool>>> {
        let path =
            format!("/v2/zones/{encoded_zone}/rrsets?q=kind:POOLS&limit={limit}&offset={offset}");
        let response = self.send_authorized(session, Method::Get, &path).await?;

        if response.status == 404 {
            log::debug!("No pool records in zone {encoded_zone}");
            return Ok(None);
        }
        let data: RrSetsResponse = Self::expect_json("/v2/zones/{zone}/rrsets", response)?;

        Ok(Some(match data.result_info {
            Some(info) => OffsetPage {
                items: data.rr_sets,
                returned_count: info.returned_count,
            },
            None => OffsetPage::from_items(data.rr_sets),
        }))
    }

    // ============ plumbing ============

    fn request(&self, method: Method, path: &str) -> HttpRequest {
        HttpRequest::new(method, format!("{}{path}", self.config.base_url))
    }

    async fn send_authorized(
        &self,
        session: &Session,
        method: Method,
        path: &str,
    ) -> Result<HttpResponse> {
        let request = self.request(method, path);
        self.send_with_renewal(session, request, path).await
    }

    /// Send with the session's bearer token; on 401, refresh once and retry once.
    async fn send_with_renewal(
        &self,
        session: &Session,
        request: HttpRequest,
        path: &str,
    ) -> Result<HttpResponse> {
        let token = session.access_token().await;
        let response = self.transport.send(request.clone().bearer(&token)).await?;
        if response.status != 401 {
            return Ok(response);
        }

        let Some(refresh_token) = session.refresh_token().await else {
            log::warn!("Token rejected at {path} and cannot be refreshed");
            return Err(Self::unauthorized(path, response));
        };

        log::warn!("Token rejected at {path}, refreshing and retrying once");
        let renewed = self.authenticator.refresh(&refresh_token).await?;
        let token = renewed.access_token.clone();
        session.replace(renewed).await;

        let retried = self.transport.send(request.bearer(&token)).await?;
        if retried.status == 401 {
            return Err(Self::unauthorized(path, retried));
        }
        Ok(retried)
    }

    fn unauthorized(path: &str, response: HttpResponse) -> ProviderError {
        ProviderError::Unauthorized {
            endpoint: path.split('?').next().unwrap_or(path).to_string(),
            raw_message: (!response.body.is_empty()).then(|| truncate_for_log(&response.body)),
        }
    }

    /// Require a 2xx and parse its JSON body.
    fn expect_json<T: DeserializeOwned>(endpoint: &str, response: HttpResponse) -> Result<T> {
        if !response.is_success() {
            return Err(ProviderError::http_status(
                endpoint,
                response.status,
                response.body,
            ));
        }
        Self::parse_json(endpoint, &response.body)
    }

    fn parse_json<T: DeserializeOwned>(endpoint: &str, body: &str) -> Result<T> {
        serde_json::from_str(body).map_err(|e| {
            log::error!("JSON parse failed for {endpoint}: {e}");
            log::error!("Raw response: {}", truncate_for_log(body));
            ProviderError::ParseError {
                endpoint: endpoint.to_string(),
                detail: e.to_string(),
            }
        })
    }
}
