// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Zephyr checkout bridge.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Unique identifier for one checkout session (one bridge instance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Payload for starting checkout. The cart object comes from the shop
/// platform and is forwarded to the surface untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckoutPayload {
    pub cart: Map<String, Value>,
}

/// Reported to the host when checkout completes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResult {
    pub zephyr_order_id: String,
    pub zephyr_checkout_id: String,
    pub platform_order_id: String,
}

impl CheckoutResult {
    /// Build a result from an inbound `checkout-complete` payload.
    ///
    /// Absent or non-string fields become empty strings; a missing payload
    /// yields an all-empty result.
    pub fn from_payload(payload: Option<&Value>) -> Self {
        let field = |name: &str| {
            payload
                .and_then(|p| p.get(name))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Self {
            zephyr_order_id: field("orderId"),
            zephyr_checkout_id: field("checkoutId"),
            platform_order_id: field("platformOrderId"),
        }
    }
}

/// Generic lifecycle event forwarded to the host's `on_event` callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostEvent {
    pub event_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_data: Option<Map<String, Value>>,
}

impl HostEvent {
    pub fn named(event_name: impl Into<String>) -> Self {
        Self {
            event_name: event_name.into(),
            event_data: None,
        }
    }
}

/// Error reported to the host's `on_error` callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEvent {
    /// Error code.
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorEvent {
    /// Code used for every error the checkout surface reports.
    pub const GENERIC_CODE: &'static str = "error";

    pub fn generic() -> Self {
        Self {
            error: Self::GENERIC_CODE.into(),
            message: None,
        }
    }
}

/// Layout size hint for the checkout view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewStyle {
    pub height: f64,
    pub width: f64,
}
