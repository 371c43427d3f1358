// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Capability traits at the edges of the bridge.
//
// The bridge never talks to a web view, the OS, or the host UI directly.
// Each collaborator is a trait so native bindings, test doubles, and the
// desktop stub are interchangeable.

use zephyr_core::error::Result;
use zephyr_core::types::{CheckoutResult, ErrorEvent, HostEvent, ViewStyle};

/// The embedded web view running the checkout UI.
pub trait WebSurface: Send {
    /// Point the surface at the checkout endpoint.
    fn load_url(&self, url: &str) -> Result<()>;

    /// Deliver one serialized message (`postMessage` equivalent).
    fn post_message(&self, message: &str) -> Result<()>;

    /// Navigate the surface's own history back one step.
    fn go_back(&self) -> Result<()>;
}

/// Platform URL-intent handling (deep links to payment apps etc).
///
/// Calls may block on an OS round-trip; the bridge only ever invokes them
/// off the dispatch path.
pub trait UrlIntent: Send + Sync {
    /// Whether some installed app can handle `url`.
    fn can_open_url(&self, url: &str) -> Result<bool>;

    /// Hand `url` to the OS.
    fn open_url(&self, url: &str) -> Result<()>;
}

/// Platform window-size query.
pub trait WindowMetrics {
    fn window_size(&self) -> Result<ViewStyle>;
}

/// Everything the bridge needs from the host platform.
pub trait PlatformBridge: UrlIntent + WindowMetrics + Send + Sync {
    /// Host runtime tag sent to the surface as `iplat` (e.g. "ReactNative").
    fn platform_tag(&self) -> &str;
}

/// Host callbacks, passed to the bridge as one bundle.
pub trait CheckoutCallbacks: Send {
    /// Generic lifecycle event (currently only `hide-loader`).
    fn on_event(&mut self, event: HostEvent);

    /// Checkout finished successfully.
    fn on_complete(&mut self, result: CheckoutResult);

    /// The surface reported an error.
    fn on_error(&mut self, error: ErrorEvent);

    /// The surface asked to be closed.
    fn on_close(&mut self);
}

type Callback<T> = Box<dyn FnMut(T) + Send>;

/// Closure-backed [`CheckoutCallbacks`] for hosts that prefer not to
/// implement the trait. Unset callbacks are no-ops.
#[derive(Default)]
pub struct CallbackSet {
    on_event: Option<Callback<HostEvent>>,
    on_complete: Option<Callback<CheckoutResult>>,
    on_error: Option<Callback<ErrorEvent>>,
    on_close: Option<Callback<()>>,
}

impl CallbackSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_event(mut self, f: impl FnMut(HostEvent) + Send + 'static) -> Self {
        self.on_event = Some(Box::new(f));
        self
    }

    pub fn with_complete(mut self, f: impl FnMut(CheckoutResult) + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    pub fn with_error(mut self, f: impl FnMut(ErrorEvent) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    pub fn with_close(mut self, mut f: impl FnMut() + Send + 'static) -> Self {
        self.on_close = Some(Box::new(move |()| f()));
        self
    }
}

impl CheckoutCallbacks for CallbackSet {
    fn on_event(&mut self, event: HostEvent) {
        if let Some(f) = self.on_event.as_mut() {
            f(event);
        }
    }

    fn on_complete(&mut self, result: CheckoutResult) {
        if let Some(f) = self.on_complete.as_mut() {
            f(result);
        }
    }

    fn on_error(&mut self, error: ErrorEvent) {
        if let Some(f) = self.on_error.as_mut() {
            f(error);
        }
    }

    fn on_close(&mut self) {
        if let Some(f) = self.on_close.as_mut() {
            f(());
        }
    }
}
