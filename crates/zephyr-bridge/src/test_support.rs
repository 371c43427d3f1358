// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Recording test doubles for the capability traits.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use zephyr_core::error::{Result, ZephyrError};
use zephyr_core::types::{CheckoutResult, ErrorEvent, HostEvent, ViewStyle};

use crate::traits::*;

/// Install a fmt subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

#[derive(Default)]
struct SurfaceLog {
    loaded: Vec<String>,
    posted: Vec<String>,
    back_presses: usize,
    fail_containing: Option<String>,
}

/// Web surface that records everything. Clones share one log, so a test can
/// keep a handle after boxing a clone into the bridge.
#[derive(Clone, Default)]
pub struct RecordingSurface {
    log: Arc<Mutex<SurfaceLog>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn posted(&self) -> Vec<String> {
        self.log.lock().expect("surface log").posted.clone()
    }

    pub fn loaded(&self) -> Vec<String> {
        self.log.lock().expect("surface log").loaded.clone()
    }

    pub fn back_presses(&self) -> usize {
        self.log.lock().expect("surface log").back_presses
    }

    /// Make `post_message` fail for messages containing `needle`.
    pub fn fail_posts_containing(&self, needle: &str) {
        self.log.lock().expect("surface log").fail_containing = Some(needle.into());
    }
}

impl WebSurface for RecordingSurface {
    fn load_url(&self, url: &str) -> Result<()> {
        self.log.lock().expect("surface log").loaded.push(url.into());
        Ok(())
    }

    fn post_message(&self, message: &str) -> Result<()> {
        let mut log = self.log.lock().expect("surface log");
        if let Some(needle) = &log.fail_containing {
            if message.contains(needle.as_str()) {
                return Err(ZephyrError::Surface("post rejected".into()));
            }
        }
        log.posted.push(message.into());
        Ok(())
    }

    fn go_back(&self) -> Result<()> {
        self.log.lock().expect("surface log").back_presses += 1;
        Ok(())
    }
}

/// One host callback invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Event(HostEvent),
    Complete(CheckoutResult),
    Error(ErrorEvent),
    Close,
}

/// Callback bundle that records every invocation.
#[derive(Clone, Default)]
pub struct RecordingCallbacks {
    calls: Arc<Mutex<Vec<HostCall>>>,
}

impl RecordingCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().expect("callback log").clone()
    }

    fn push(&self, call: HostCall) {
        self.calls.lock().expect("callback log").push(call);
    }
}

impl CheckoutCallbacks for RecordingCallbacks {
    fn on_event(&mut self, event: HostEvent) {
        self.push(HostCall::Event(event));
    }

    fn on_complete(&mut self, result: CheckoutResult) {
        self.push(HostCall::Complete(result));
    }

    fn on_error(&mut self, error: ErrorEvent) {
        self.push(HostCall::Error(error));
    }

    fn on_close(&mut self) {
        self.push(HostCall::Close);
    }
}

/// Platform whose URL-intent support is a fixed allow-list.
#[derive(Default)]
pub struct MockPlatform {
    supported: Vec<String>,
    checked: Mutex<Vec<String>>,
    opened: Mutex<Vec<String>>,
}

impl MockPlatform {
    pub fn supporting(urls: &[&str]) -> Self {
        Self {
            supported: urls.iter().map(|u| u.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn checked(&self) -> Vec<String> {
        self.checked.lock().expect("intent log").clone()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().expect("intent log").clone()
    }

    /// Poll until `count` URLs have been checked or `limit` elapses.
    pub async fn wait_for_checked(&self, count: usize, limit: Duration) -> bool {
        let deadline = Instant::now() + limit;
        while Instant::now() < deadline {
            if self.checked().len() >= count {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        false
    }

    /// Poll until `count` URLs have been opened or `limit` elapses.
    pub async fn wait_for_opened(&self, count: usize, limit: Duration) -> bool {
        let deadline = Instant::now() + limit;
        while Instant::now() < deadline {
            if self.opened().len() >= count {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        false
    }

    pub fn wait_for_opened_blocking(&self, count: usize, limit: Duration) -> bool {
        let deadline = Instant::now() + limit;
        while Instant::now() < deadline {
            if self.opened().len() >= count {
                return true;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        false
    }
}

impl PlatformBridge for MockPlatform {
    fn platform_tag(&self) -> &str {
        "Test"
    }
}

impl UrlIntent for MockPlatform {
    fn can_open_url(&self, url: &str) -> Result<bool> {
        self.checked.lock().expect("intent log").push(url.into());
        Ok(self.supported.iter().any(|u| u == url))
    }

    fn open_url(&self, url: &str) -> Result<()> {
        self.opened.lock().expect("intent log").push(url.into());
        Ok(())
    }
}

impl WindowMetrics for MockPlatform {
    fn window_size(&self) -> Result<ViewStyle> {
        Ok(ViewStyle {
            height: 800.0,
            width: 400.0,
        })
    }
}
