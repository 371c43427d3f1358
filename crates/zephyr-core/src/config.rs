// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Checkout configuration supplied by the host, and bridge tuning settings.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, ZephyrError};

/// Checkout environment. Always use `Production` for live traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Beta,
    Production,
}

impl Environment {
    /// Base URL of the checkout surface for this environment.
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Beta => "https://app.beta.breeze.in",
            Self::Production => "https://app.breeze.in",
        }
    }
}

/// Commerce platform the shop runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShopPlatform {
    Shopify,
}

/// Basic configuration required to start a checkout session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZephyrConfiguration {
    /// Zephyr merchant ID.
    pub merchant_id: String,
    /// Shop URL, forwarded to the surface verbatim.
    pub shop_url: String,
    pub shop_platform: ShopPlatform,
    pub environment: Environment,
}

impl ZephyrConfiguration {
    /// Reject configurations the checkout surface cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.merchant_id.trim().is_empty() {
            return Err(ZephyrError::InvalidConfiguration(
                "merchantId must not be empty".into(),
            ));
        }
        if self.shop_url.trim().is_empty() {
            return Err(ZephyrError::InvalidConfiguration(
                "shopUrl must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Derive the URL the web surface loads.
    ///
    /// `platform_tag` identifies the host runtime (`iplat`), e.g. "ReactNative".
    pub fn endpoint(&self, platform_tag: &str) -> Result<Url> {
        let mut url = Url::parse(self.environment.base_url())?;
        url.query_pairs_mut()
            .append_pair("iplat", platform_tag)
            .append_pair("merchantId", &self.merchant_id);
        Ok(url)
    }
}

/// Bridge tuning knobs. Everything has a sensible default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BridgeSettings {
    /// `source` value identifying envelopes from the checkout surface.
    pub peer_source: String,
    /// Upper bound on a single `open-app` intent round-trip.
    pub intent_timeout_ms: u64,
    /// Log a warning when this many messages are waiting for readiness.
    pub pending_warn_threshold: usize,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            peer_source: "breeze".into(),
            intent_timeout_ms: 10_000,
            pending_warn_threshold: 32,
        }
    }
}
