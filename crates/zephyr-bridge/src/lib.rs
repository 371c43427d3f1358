// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Zephyr Bridge — message bridge between a host application and the embedded
// Breeze checkout surface.
//
// `CheckoutBridge` owns the session: it queues outbound messages until the
// surface is ready, decodes and validates inbound envelopes, and routes them
// to the host's callbacks. Platform collaborators (web view, URL intents,
// window metrics) are reached only through the traits in `traits`.

pub mod bridge;
pub mod intent;
pub mod outbound;
pub mod session;
pub mod stub;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_support;

pub use bridge::{CheckoutBridge, Dispatch};
pub use outbound::{FlushReport, OutboundQueue};
pub use session::SessionState;
pub use traits::{
    CallbackSet, CheckoutCallbacks, PlatformBridge, UrlIntent, WebSurface, WindowMetrics,
};

/// Platform collaborators for the current target.
///
/// No native bindings ship in this crate, so every target gets the stub;
/// mobile hosts pass their own `PlatformBridge` to `CheckoutBridge::new`.
pub fn platform_bridge() -> std::sync::Arc<dyn PlatformBridge> {
    std::sync::Arc::new(stub::StubPlatform)
}
