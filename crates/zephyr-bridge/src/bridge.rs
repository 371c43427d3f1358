// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The checkout bridge: one instance per checkout session.
//
// Construction queues the bootstrap messages. They stay queued until the
// surface sends `app-ready`, at which point the queue is flushed once, in
// order. Inbound text from the surface goes through `on_message`, which
// never fails: anything it cannot make sense of is logged and ignored.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use zephyr_core::config::{BridgeSettings, ZephyrConfiguration};
use zephyr_core::error::Result;
use zephyr_core::protocol::{Envelope, OutboundMessage, PeerMessage};
use zephyr_core::types::{CheckoutPayload, ErrorEvent, HostEvent, SessionId, ViewStyle};

use crate::intent;
use crate::outbound::OutboundQueue;
use crate::session::SessionState;
use crate::traits::{CheckoutCallbacks, PlatformBridge, WebSurface};

/// What `on_message` did with one inbound text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Not JSON, or not a JSON object.
    Malformed,
    /// `source` was not the checkout surface.
    ForeignSource,
    /// `message` is outside the known vocabulary (or missing).
    Unrecognized,
    Handled(PeerMessage),
}

/// Message bridge between the host and the embedded checkout surface.
pub struct CheckoutBridge {
    id: SessionId,
    settings: BridgeSettings,
    endpoint: String,
    style: Option<ViewStyle>,
    platform: Arc<dyn PlatformBridge>,
    callbacks: Box<dyn CheckoutCallbacks>,
    surface: Option<Box<dyn WebSurface>>,
    session: SessionState,
    outbound: OutboundQueue,
}

impl CheckoutBridge {
    /// Start a session: validate the configuration, derive the endpoint, and
    /// queue the bootstrap messages.
    #[instrument(skip_all, fields(merchant = %config.merchant_id))]
    pub fn new(
        config: ZephyrConfiguration,
        payload: CheckoutPayload,
        callbacks: Box<dyn CheckoutCallbacks>,
        platform: Arc<dyn PlatformBridge>,
        settings: BridgeSettings,
    ) -> Result<Self> {
        config.validate()?;
        let endpoint = config.endpoint(platform.platform_tag())?.to_string();

        let mut bridge = Self {
            id: SessionId::new(),
            outbound: OutboundQueue::new(settings.pending_warn_threshold),
            settings,
            endpoint,
            style: None,
            platform,
            callbacks,
            surface: None,
            session: SessionState::new(),
        };

        for message in OutboundMessage::bootstrap(&config, &payload) {
            bridge.send(&message)?;
        }

        info!(session = %bridge.id, endpoint = %bridge.endpoint, "checkout session created");
        Ok(bridge)
    }

    /// Use an explicit layout size instead of the platform window size.
    pub fn with_style(mut self, style: ViewStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// URL the surface should load.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Messages waiting for the surface.
    pub fn pending_len(&self) -> usize {
        self.outbound.len()
    }

    /// Layout size: the host's hint, else the platform window size.
    pub fn view_style(&self) -> Result<ViewStyle> {
        match self.style {
            Some(style) => Ok(style),
            None => self.platform.window_size(),
        }
    }

    /// Attach the web surface and load the checkout endpoint into it.
    ///
    /// If the surface already reported readiness (e.g. the view was
    /// re-created), anything queued while detached is flushed now.
    #[instrument(skip_all, fields(session = %self.id))]
    pub fn attach_surface(&mut self, surface: Box<dyn WebSurface>) -> Result<()> {
        surface.load_url(&self.endpoint)?;
        self.surface = Some(surface);
        debug!("surface attached");
        if self.session.is_ready() && !self.outbound.is_empty() {
            self.flush();
        }
        Ok(())
    }

    /// Drop the surface handle. Later sends are queued.
    pub fn detach_surface(&mut self) -> Option<Box<dyn WebSurface>> {
        debug!(session = %self.id, "surface detached");
        self.surface.take()
    }

    /// Replace the host callbacks for the rest of the session.
    pub fn update_callbacks(&mut self, callbacks: Box<dyn CheckoutCallbacks>) {
        debug!(session = %self.id, "host callbacks replaced");
        self.callbacks = callbacks;
    }

    /// Send a message now if the surface is ready and attached, else queue it.
    ///
    /// Only serialization errors are returned; a failed post is logged and
    /// the message dropped.
    pub fn send(&mut self, message: &OutboundMessage) -> Result<()> {
        let text = message.to_wire()?;
        match self.surface.as_deref() {
            Some(surface) if self.session.is_ready() => {
                if let Err(e) = surface.post_message(&text) {
                    warn!(
                        session = %self.id,
                        event = message.event_name(),
                        error = %e,
                        "failed to post message, dropping"
                    );
                }
            }
            _ => {
                debug!(
                    session = %self.id,
                    event = message.event_name(),
                    "queued until surface is ready"
                );
                self.outbound.enqueue(text);
            }
        }
        Ok(())
    }

    fn flush(&mut self) {
        let report = self.outbound.flush(self.surface.as_deref());
        info!(
            session = %self.id,
            delivered = report.delivered,
            dropped = report.dropped,
            "pending messages flushed"
        );
    }

    /// Handle one text message from the surface.
    #[instrument(skip_all, fields(session = %self.id))]
    pub fn on_message(&mut self, raw: &str) -> Dispatch {
        let envelope = match Envelope::parse(raw) {
            Ok(envelope) => envelope,
            Err(e) => {
                debug!(error = %e, "ignoring malformed message from surface");
                return Dispatch::Malformed;
            }
        };

        if !envelope.is_from(&self.settings.peer_source) {
            debug!(source = ?envelope.source, "ignoring message from foreign source");
            return Dispatch::ForeignSource;
        }

        let Some(message) = PeerMessage::from_envelope(&envelope) else {
            debug!(kind = ?envelope.message, "ignoring unrecognized message");
            return Dispatch::Unrecognized;
        };

        debug!(kind = message.name(), "dispatching");
        self.apply(&message);
        Dispatch::Handled(message)
    }

    fn apply(&mut self, message: &PeerMessage) {
        match message {
            PeerMessage::AppReady => {
                if self.session.mark_ready() {
                    info!("checkout surface ready");
                    self.flush();
                }
            }
            PeerMessage::ConsumingBackPress(Some(consuming)) => {
                self.session.set_intercepting_back_press(*consuming);
            }
            PeerMessage::ConsumingBackPress(None) => {
                debug!("back-press payload undecodable, state unchanged");
            }
            PeerMessage::CheckoutComplete(result) => {
                info!(order = %result.zephyr_order_id, "checkout complete");
                self.callbacks.on_complete(result.clone());
            }
            PeerMessage::CloseApp => self.callbacks.on_close(),
            PeerMessage::HideLoader => self.callbacks.on_event(HostEvent::named("hide-loader")),
            PeerMessage::Error => self.callbacks.on_error(ErrorEvent::generic()),
            PeerMessage::OpenApp(Some(url)) => intent::spawn_launch(
                Arc::clone(&self.platform),
                url.clone(),
                Duration::from_millis(self.settings.intent_timeout_ms),
                self.id,
            ),
            PeerMessage::OpenApp(None) => debug!("open-app without a string url"),
        }
    }

    /// Host back-press hook.
    ///
    /// Returns `false` when the surface is intercepting back-presses (and
    /// navigates it back), `true` when the host should handle the press.
    pub fn handle_back_press(&self) -> bool {
        if !self.session.is_intercepting_back_press() {
            return true;
        }
        match self.surface.as_deref() {
            Some(surface) => {
                if let Err(e) = surface.go_back() {
                    warn!(session = %self.id, error = %e, "surface go_back failed");
                }
            }
            None => warn!(session = %self.id, "back-press intercepted with no surface attached"),
        }
        false
    }
}
