//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;

use pool_finder_provider::{ClientConfig, Credential, DEFAULT_BASE_URL, UltraDnsClient};

/// 跳过测试的宏（当既没有 token 也没有用户名/密码时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    () => {
        if !$crate::common::has_credentials() {
            eprintln!("跳过测试: 需要 ULTRADNS_TOKEN 或 ULTRADNS_USERNAME + ULTRADNS_PASSWORD");
            return;
        }
    };
}

/// Either a bearer token or a username/password pair is set.
pub fn has_credentials() -> bool {
    let set = |var: &str| env::var(var).is_ok_and(|v| !v.is_empty());
    set("ULTRADNS_TOKEN") || (set("ULTRADNS_USERNAME") && set("ULTRADNS_PASSWORD"))
}

/// Live API context built from environment variables.
pub struct TestContext {
    pub client: UltraDnsClient,
    pub credential: Credential,
}

impl TestContext {
    /// `ULTRADNS_USERNAME`/`ULTRADNS_PASSWORD`, or `ULTRADNS_TOKEN`;
    /// `ULTRADNS_BASE_URL` optionally points at a test environment.
    pub fn from_env() -> Option<Self> {
        let credential = match env::var("ULTRADNS_TOKEN").ok().filter(|t| !t.is_empty()) {
            Some(token) => Credential::Bearer(token),
            None => Credential::Password {
                username: env::var("ULTRADNS_USERNAME").ok()?,
                password: env::var("ULTRADNS_PASSWORD").ok()?,
            },
        };
        let base_url = env::var("ULTRADNS_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let client = UltraDnsClient::new(ClientConfig::with_base_url(base_url)).ok()?;
        Some(Self { client, credential })
    }
}
