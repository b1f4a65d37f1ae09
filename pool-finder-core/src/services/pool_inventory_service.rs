//! 池记录清点服务

use std::sync::Arc;

use pool_finder_provider::{Account, Impersonation, Session, UltraDnsClient};

use crate::error::CoreResult;
use crate::traits::ProgressObserver;
use crate::types::ReportRow;

/// Flattens sub-accounts → zones → pools into report rows.
pub struct PoolInventoryService {
    client: Arc<UltraDnsClient>,
}

impl PoolInventoryService {
    #[must_use]
    pub fn new(client: Arc<UltraDnsClient>) -> Self {
        Self { client }
    }

    /// List the reseller's sub-accounts and aggregate all of them.
    pub async fn collect(
        &self,
        reseller: &Session,
        observer: &dyn ProgressObserver,
    ) -> CoreResult<Vec<ReportRow>> {
        let accounts = self.client.list_subaccounts(reseller).await?;
        log::debug!("Found {} sub-account(s)", accounts.len());
        observer.accounts_discovered(accounts.len());
        self.aggregate(&accounts, reseller, observer).await
    }

    /// Rows for `accounts`, account-major, then zone, then pool, in API order.
    ///
    /// Suspended sub-accounts contribute no rows; any other failure aborts.
    pub async fn aggregate(
        &self,
        accounts: &[Account],
        reseller: &Session,
        observer: &dyn ProgressObserver,
    ) -> CoreResult<Vec<ReportRow>> {
        let mut rows = Vec::new();
        let total = accounts.len();

        for (i, account) in accounts.iter().enumerate() {
            let name = account.account_name.as_str();
            observer.account_started(i + 1, total, name);

            let session = match self.client.impersonate(reseller, name).await? {
                Impersonation::Granted(session) => session,
                Impersonation::Suspended { reason } => {
                    observer.account_skipped(name, &reason);
                    continue;
                }
            };

            let before = rows.len();
            self.collect_account(account, &session, observer, &mut rows)
                .await?;
            log::debug!("Sub-account {name}: {} pool(s)", rows.len() - before);
        }

        observer.finished(rows.len());
        Ok(rows)
    }

    async fn collect_account(
        &self,
        account: &Account,
        session: &Session,
        observer: &dyn ProgressObserver,
        rows: &mut Vec<ReportRow>,
    ) -> CoreResult<()> {
        let zones = self.client.list_zones(session).await?;
        observer.zones_discovered(&account.account_name, zones.len());

        for (i, zone) in zones.iter().enumerate() {
            let pools = self.client.list_pools(session, zone.name()).await?;
            rows.extend(pools.iter().map(|pool| ReportRow::new(account, zone, pool)));
            observer.zone_finished(i + 1, zones.len(), zone.name(), pools.len());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use pool_finder_provider::test_utils::FakeTransport;
    use pool_finder_provider::{ClientConfig, HttpResponse, Method, ProviderError, TokenPair};
    use serde_json::json;

    use super::*;
    use crate::error::CoreError;
    use crate::traits::NoopProgress;

    const BASE: &str = "https://api.test";

    fn service() -> (Arc<FakeTransport>, PoolInventoryService) {
        let fake = Arc::new(FakeTransport::new(BASE));
        let client = UltraDnsClient::with_transport(fake.clone(), ClientConfig::with_base_url(BASE));
        (fake, PoolInventoryService::new(Arc::new(client)))
    }

    fn reseller() -> Session {
        Session::new(TokenPair::access_only("reseller"))
    }

    fn account(name: &str) -> Account {
        Account {
            account_name: name.to_string(),
        }
    }

    fn grant(fake: &FakeTransport, account: &str, token: &str) {
        fake.respond_json(
            Method::Post,
            &format!("/subaccounts/{account}/token"),
            &json!({"accessToken": token}),
        );
    }

    fn zones(fake: &FakeTransport, names: &[&str]) {
        let zones: Vec<_> = names
            .iter()
            .map(|n| json!({"properties": {"name": n}}))
            .collect();
        fake.respond_json(
            Method::Get,
            "/v2/zones?limit=1000",
            &json!({"zones": zones, "cursorInfo": {}}),
        );
    }

    fn pools(fake: &FakeTransport, zone: &str, pools: &[(&str, &str)]) {
        let rr_sets: Vec<_> = pools
            .iter()
            .map(|(owner, ctx)| json!({"ownerName": owner, "profile": {"@context": ctx}}))
            .collect();
        fake.respond_json(
            Method::Get,
            &format!("/v2/zones/{zone}/rrsets?q=kind:POOLS&limit=1000&offset=0"),
            &json!({"rrSets": rr_sets, "resultInfo": {"returnedCount": pools.len()}}),
        );
    }

    fn no_pools(fake: &FakeTransport, zone: &str) {
        fake.respond(
            Method::Get,
            &format!("/v2/zones/{zone}/rrsets?q=kind:POOLS&limit=1000&offset=0"),
            HttpResponse::new(404, r#"[{"errorCode":70002,"errorMessage":"Data not found."}]"#),
        );
    }

    fn row(account: &str, zone: &str, pool: &str, kind: &str) -> ReportRow {
        ReportRow {
            sub_account_name: account.into(),
            zone_name: zone.into(),
            pool_name: pool.into(),
            pool_type: kind.into(),
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl RecordingProgress {
        fn push(&self, event: String) {
            if let Ok(mut events) = self.events.lock() {
                events.push(event);
            }
        }

        fn events(&self) -> Vec<String> {
            self.events.lock().map(|e| e.clone()).unwrap_or_default()
        }
    }

    impl ProgressObserver for RecordingProgress {
        fn account_started(&self, index: usize, total: usize, account: &str) {
            self.push(format!("start {index}/{total} {account}"));
        }
        fn account_skipped(&self, account: &str, _reason: &str) {
            self.push(format!("skip {account}"));
        }
        fn zone_finished(&self, index: usize, total: usize, zone: &str, pools: usize) {
            self.push(format!("zone {index}/{total} {zone} {pools}"));
        }
        fn finished(&self, rows: usize) {
            self.push(format!("done {rows}"));
        }
    }

    #[tokio::test]
    async fn rows_are_account_then_zone_then_pool_ordered() {
        let (fake, service) = service();
        grant(&fake, "Acme", "t-acme");
        zones(&fake, &["acme.com.", "acme.net."]);
        pools(&fake, "acme.com.", &[("pool1", "A"), ("pool2", "CNAME")]);
        pools(&fake, "acme.net.", &[("pool3", "A")]);

        let rows = service
            .aggregate(&[account("Acme")], &reseller(), &NoopProgress)
            .await;
        assert_eq!(
            rows.ok(),
            Some(vec![
                row("Acme", "acme.com.", "pool1", "A"),
                row("Acme", "acme.com.", "pool2", "CNAME"),
                row("Acme", "acme.net.", "pool3", "A"),
            ])
        );
    }

    #[tokio::test]
    async fn sub_account_token_is_used_for_zone_calls() {
        let (fake, service) = service();
        grant(&fake, "Acme", "t-acme");
        zones(&fake, &["acme.com."]);
        no_pools(&fake, "acme.com.");

        let rows = service
            .aggregate(&[account("Acme")], &reseller(), &NoopProgress)
            .await;
        assert_eq!(rows.ok(), Some(Vec::new()));

        let requests = fake.requests();
        assert_eq!(requests[0].header_value("Authorization"), Some("Bearer reseller"));
        assert_eq!(requests[1].header_value("Authorization"), Some("Bearer t-acme"));
        assert_eq!(requests[2].header_value("Authorization"), Some("Bearer t-acme"));
    }

    #[tokio::test]
    async fn suspended_account_is_skipped_without_aborting() {
        let (fake, service) = service();
        grant(&fake, "First", "t1");
        fake.respond(
            Method::Post,
            "/subaccounts/Frozen/token",
            HttpResponse::new(400, r#"{"errorCode":53005,"errorMessage":"Account Frozen is suspended"}"#),
        );
        grant(&fake, "Last", "t3");
        // Both granted accounts see the same scripted zone listing in turn.
        zones(&fake, &["first.com."]);
        zones(&fake, &["last.com."]);
        pools(&fake, "first.com.", &[("p1", "A")]);
        pools(&fake, "last.com.", &[("p3", "A")]);

        let progress = RecordingProgress::default();
        let rows = service
            .aggregate(
                &[account("First"), account("Frozen"), account("Last")],
                &reseller(),
                &progress,
            )
            .await;
        assert_eq!(
            rows.ok(),
            Some(vec![
                row("First", "first.com.", "p1", "A"),
                row("Last", "last.com.", "p3", "A"),
            ])
        );
        assert_eq!(
            progress.events(),
            vec![
                "start 1/3 First",
                "zone 1/1 first.com. 1",
                "start 2/3 Frozen",
                "skip Frozen",
                "start 3/3 Last",
                "zone 1/1 last.com. 1",
                "done 2",
            ]
        );
        // 3 token requests, then one zone and one pool listing per granted account
        assert_eq!(fake.request_count(), 7);
    }

    #[tokio::test]
    async fn zone_without_pools_contributes_nothing() {
        let (fake, service) = service();
        grant(&fake, "Acme", "t");
        zones(&fake, &["empty.com.", "acme.com."]);
        no_pools(&fake, "empty.com.");
        pools(&fake, "acme.com.", &[("pool1", "A")]);

        let rows = service
            .aggregate(&[account("Acme")], &reseller(), &NoopProgress)
            .await;
        assert_eq!(rows.ok(), Some(vec![row("Acme", "acme.com.", "pool1", "A")]));
    }

    #[tokio::test]
    async fn unexpected_failure_aborts_run() {
        let (fake, service) = service();
        grant(&fake, "Acme", "t");
        fake.respond(
            Method::Get,
            "/v2/zones?limit=1000",
            HttpResponse::new(500, "boom"),
        );

        let result = service
            .aggregate(&[account("Acme"), account("Other")], &reseller(), &NoopProgress)
            .await;
        assert!(matches!(
            result,
            Err(CoreError::Provider(ProviderError::HttpStatus { status: 500, .. }))
        ));
        assert!(!fake.paths().iter().any(|p| p.contains("Other")));
    }

    #[tokio::test]
    async fn collect_stops_on_missing_reseller_permission() {
        let (fake, service) = service();
        fake.respond(
            Method::Get,
            "/subaccounts?limit=1000&offset=0",
            HttpResponse::new(403, "You do not have permissions to list sub-accounts"),
        );

        let result = service.collect(&reseller(), &NoopProgress).await;
        assert!(result.as_ref().is_err_and(CoreError::is_permission_denied));
        assert_eq!(fake.request_count(), 1);
    }

    #[tokio::test]
    async fn no_accounts_no_rows() {
        let (fake, service) = service();
        fake.respond_json(
            Method::Get,
            "/subaccounts?limit=1000&offset=0",
            &json!({"accounts": [], "resultInfo": {"returnedCount": 0}}),
        );
        let rows = service.collect(&reseller(), &NoopProgress).await;
        assert_eq!(rows.ok(), Some(Vec::new()));
    }
}
