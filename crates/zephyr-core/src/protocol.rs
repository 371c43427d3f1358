// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Wire protocol between the host and the embedded checkout surface.
//
// Outbound: JSON objects tagged by `eventName`, posted as text.
// Inbound:  JSON envelopes of the form
//
//   { "source": "breeze", "message": "<kind>", "payload": "<JSON text>" }
//
// where `payload` is itself encoded JSON and is decoded in a second,
// independent pass. Everything inbound is untrusted: missing or mistyped
// fields degrade to defaults instead of failing the envelope.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::{ShopPlatform, ZephyrConfiguration};
use crate::error::{Result, ZephyrError};
use crate::types::{CheckoutPayload, CheckoutResult};

// ---------------------------------------------------------------------------
// Outbound
// ---------------------------------------------------------------------------

/// Messages the host sends to the checkout surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "eventName", rename_all = "kebab-case")]
pub enum OutboundMessage {
    /// Shop identity and merchant-scoped defaults.
    #[serde(rename_all = "camelCase")]
    SetPlatformStoreData {
        shop_url: String,
        platform: ShopPlatform,
        offer_code: Option<String>,
        checkout_hidden: bool,
        shop_domain: Option<String>,
    },
    /// The opaque cart object from the shop platform.
    SetCartData { cart: Map<String, Value> },
    StartCheckout,
}

impl OutboundMessage {
    /// The three messages every session starts with, in send order.
    pub fn bootstrap(
        config: &ZephyrConfiguration,
        payload: &CheckoutPayload,
    ) -> [OutboundMessage; 3] {
        [
            OutboundMessage::SetPlatformStoreData {
                shop_url: config.shop_url.clone(),
                platform: config.shop_platform,
                offer_code: None,
                checkout_hidden: false,
                shop_domain: None,
            },
            OutboundMessage::SetCartData {
                cart: payload.cart.clone(),
            },
            OutboundMessage::StartCheckout,
        ]
    }

    /// Wire name, as carried in `eventName`.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::SetPlatformStoreData { .. } => "set-platform-store-data",
            Self::SetCartData { .. } => "set-cart-data",
            Self::StartCheckout => "start-checkout",
        }
    }

    /// Serialize to the text posted over the surface channel.
    pub fn to_wire(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

// ---------------------------------------------------------------------------
// Inbound
// ---------------------------------------------------------------------------

/// One decoded inbound message.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub source: Option<String>,
    pub message: Option<String>,
    /// Decoded `payload`. `None` when absent, not a string, not valid JSON,
    /// or JSON `null`.
    pub payload: Option<Value>,
}

impl Envelope {
    /// Decode raw text from the surface.
    ///
    /// Fails only when the text is not JSON or not a JSON object; every
    /// field-level problem is absorbed into `None`.
    pub fn parse(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)?;
        let Value::Object(mut object) = value else {
            return Err(ZephyrError::MalformedEnvelope(
                "envelope is not a JSON object".into(),
            ));
        };

        let text_field = |v: Option<Value>| match v {
            Some(Value::String(s)) => Some(s),
            _ => None,
        };

        let payload = match object.remove("payload") {
            Some(Value::String(encoded)) => match serde_json::from_str::<Value>(&encoded) {
                Ok(Value::Null) => None,
                Ok(decoded) => Some(decoded),
                Err(e) => {
                    debug!(error = %e, "envelope payload is not valid JSON");
                    None
                }
            },
            _ => None,
        };

        Ok(Self {
            source: text_field(object.remove("source")),
            message: text_field(object.remove("message")),
            payload,
        })
    }

    /// Whether the envelope was sent by `expected` (the checkout surface).
    pub fn is_from(&self, expected: &str) -> bool {
        self.source.as_deref() == Some(expected)
    }
}

/// The fixed vocabulary of messages the checkout surface sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerMessage {
    AppReady,
    /// `None` means the payload could not be decoded and the current
    /// interception state must be left alone.
    ConsumingBackPress(Option<bool>),
    CheckoutComplete(CheckoutResult),
    CloseApp,
    HideLoader,
    Error,
    /// `None` when the payload carries no string `url`.
    OpenApp(Option<String>),
}

impl PeerMessage {
    /// Interpret an envelope. Returns `None` for kinds outside the vocabulary.
    pub fn from_envelope(envelope: &Envelope) -> Option<Self> {
        let payload = envelope.payload.as_ref();
        let message = match envelope.message.as_deref()? {
            "app-ready" => Self::AppReady,
            "consuming-back-press" => Self::ConsumingBackPress(
                payload.map(|p| p.get("consuming").and_then(Value::as_bool).unwrap_or(false)),
            ),
            "checkout-complete" => Self::CheckoutComplete(CheckoutResult::from_payload(payload)),
            "close-app" => Self::CloseApp,
            "hide-loader" => Self::HideLoader,
            "error" => Self::Error,
            "open-app" => Self::OpenApp(
                payload
                    .and_then(|p| p.get("url"))
                    .and_then(Value::as_str)
                    .map(str::to_string),
            ),
            _ => return None,
        };
        Some(message)
    }

    /// Wire name, as carried in `message`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AppReady => "app-ready",
            Self::ConsumingBackPress(_) => "consuming-back-press",
            Self::CheckoutComplete(_) => "checkout-complete",
            Self::CloseApp => "close-app",
            Self::HideLoader => "hide-loader",
            Self::Error => "error",
            Self::OpenApp(_) => "open-app",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;
    use serde_json::json;

    fn config() -> ZephyrConfiguration {
        ZephyrConfiguration {
            merchant_id: "m-1".into(),
            shop_url: "https://shop.example.com".into(),
            shop_platform: ShopPlatform::Shopify,
            environment: Environment::Production,
        }
    }

    fn envelope(message: &str, payload: &str) -> Envelope {
        let raw = json!({"source": "breeze", "message": message, "payload": payload}).to_string();
        Envelope::parse(&raw).expect("parse")
    }

    #[test]
    fn bootstrap_order_and_shape() {
        let mut cart = Map::new();
        cart.insert("total".into(), json!(100));
        let messages = OutboundMessage::bootstrap(&config(), &CheckoutPayload { cart });

        let names: Vec<_> = messages.iter().map(OutboundMessage::event_name).collect();
        assert_eq!(names, ["set-platform-store-data", "set-cart-data", "start-checkout"]);

        let platform: Value =
            serde_json::from_str(&messages[0].to_wire().expect("wire")).expect("json");
        assert_eq!(
            platform,
            json!({
                "eventName": "set-platform-store-data",
                "shopUrl": "https://shop.example.com",
                "platform": "shopify",
                "offerCode": null,
                "checkoutHidden": false,
                "shopDomain": null
            })
        );

        let cart: Value =
            serde_json::from_str(&messages[1].to_wire().expect("wire")).expect("json");
        assert_eq!(cart, json!({"eventName": "set-cart-data", "cart": {"total": 100}}));

        assert_eq!(
            messages[2].to_wire().expect("wire"),
            r#"{"eventName":"start-checkout"}"#
        );
    }

    #[test]
    fn parse_rejects_non_objects() {
        assert!(Envelope::parse("not json").is_err());
        assert!(matches!(
            Envelope::parse("[1,2]"),
            Err(ZephyrError::MalformedEnvelope(_))
        ));
        assert!(matches!(
            Envelope::parse("null"),
            Err(ZephyrError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn undecodable_payload_does_not_fail_envelope() {
        let env = envelope("checkout-complete", "{broken");
        assert_eq!(env.payload, None);
        assert_eq!(
            PeerMessage::from_envelope(&env),
            Some(PeerMessage::CheckoutComplete(CheckoutResult::default()))
        );
    }

    #[test]
    fn null_payload_counts_as_absent() {
        let env = envelope("consuming-back-press", "null");
        assert_eq!(env.payload, None);
        assert_eq!(
            PeerMessage::from_envelope(&env),
            Some(PeerMessage::ConsumingBackPress(None))
        );
    }

    #[test]
    fn non_string_payload_is_ignored() {
        let raw = r#"{"source":"breeze","message":"open-app","payload":{"url":"x"}}"#;
        let env = Envelope::parse(raw).expect("parse");
        assert_eq!(env.payload, None);
        assert_eq!(PeerMessage::from_envelope(&env), Some(PeerMessage::OpenApp(None)));
    }

    #[test]
    fn source_must_match_exactly() {
        let env = Envelope::parse(r#"{"source":"other-peer","message":"app-ready"}"#)
            .expect("parse");
        assert!(!env.is_from("breeze"));
        let env = Envelope::parse(r#"{"source":1,"message":"app-ready"}"#).expect("parse");
        assert!(!env.is_from("breeze"));
    }

    #[test]
    fn consuming_back_press_defaults() {
        assert_eq!(
            PeerMessage::from_envelope(&envelope("consuming-back-press", r#"{"consuming":true}"#)),
            Some(PeerMessage::ConsumingBackPress(Some(true)))
        );
        assert_eq!(
            PeerMessage::from_envelope(&envelope("consuming-back-press", r#"{"consuming":"yes"}"#)),
            Some(PeerMessage::ConsumingBackPress(Some(false)))
        );
        assert_eq!(
            PeerMessage::from_envelope(&envelope("consuming-back-press", "{}")),
            Some(PeerMessage::ConsumingBackPress(Some(false)))
        );
        assert_eq!(
            PeerMessage::from_envelope(&envelope("consuming-back-press", "nope")),
            Some(PeerMessage::ConsumingBackPress(None))
        );
    }

    #[test]
    fn open_app_requires_string_url() {
        assert_eq!(
            PeerMessage::from_envelope(&envelope("open-app", r#"{"url":"upi://pay?pa=x"}"#)),
            Some(PeerMessage::OpenApp(Some("upi://pay?pa=x".into())))
        );
        assert_eq!(
            PeerMessage::from_envelope(&envelope("open-app", r#"{"url":5}"#)),
            Some(PeerMessage::OpenApp(None))
        );
    }

    #[test]
    fn unknown_and_missing_kinds() {
        assert_eq!(PeerMessage::from_envelope(&envelope("unknown-event", "{}")), None);
        let env = Envelope::parse(r#"{"source":"breeze"}"#).expect("parse");
        assert_eq!(PeerMessage::from_envelope(&env), None);
    }

    #[test]
    fn names_round_trip_through_vocabulary() {
        for kind in [
            "app-ready",
            "consuming-back-press",
            "checkout-complete",
            "close-app",
            "hide-loader",
            "error",
            "open-app",
        ] {
            let parsed = PeerMessage::from_envelope(&envelope(kind, "{}")).expect("known kind");
            assert_eq!(parsed.name(), kind);
        }
    }
}
