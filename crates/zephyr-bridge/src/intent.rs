// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Detached URL-intent launches for `open-app`.
//
// The capability query and the open request are blocking platform calls, so
// they run on tokio's blocking pool (or a plain OS thread when no runtime is
// present) and never hold up message dispatch. Launches are fire-and-forget:
// dropping the bridge does not cancel one in flight, and no outcome is ever
// reported to the host.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use zephyr_core::error::{Result, ZephyrError};
use zephyr_core::types::SessionId;

use crate::traits::{PlatformBridge, UrlIntent};

/// What a launch did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentOutcome {
    Opened,
    /// No installed app handles the URL.
    Unsupported,
}

/// Query support for `url` and open it if supported.
pub fn open_if_supported<P: UrlIntent + ?Sized>(
    platform: &P,
    url: &str,
) -> Result<IntentOutcome> {
    if !platform.can_open_url(url)? {
        return Ok(IntentOutcome::Unsupported);
    }
    platform.open_url(url)?;
    Ok(IntentOutcome::Opened)
}

/// Launch `url` in the background.
///
/// On a tokio runtime the round-trip is bounded by `timeout`; the blocking
/// call itself cannot be interrupted, only abandoned.
pub fn spawn_launch(
    platform: Arc<dyn PlatformBridge>,
    url: String,
    timeout: Duration,
    session: SessionId,
) {
    match Handle::try_current() {
        Ok(handle) => {
            handle.spawn(async move {
                let task = tokio::task::spawn_blocking(move || {
                    let outcome = open_if_supported(platform.as_ref(), &url);
                    (url, outcome)
                });
                let result = match tokio::time::timeout(timeout, task).await {
                    Ok(Ok((url, outcome))) => outcome.map(|o| (url, o)),
                    Ok(Err(join)) => Err(ZephyrError::Intent(join.to_string())),
                    Err(_) => Err(ZephyrError::IntentTimedOut(timeout.as_millis() as u64)),
                };
                log_outcome(session, result);
            });
        }
        Err(_) => {
            debug!(%session, "no tokio runtime, launching intent on a thread");
            let spawned = std::thread::Builder::new()
                .name("zephyr-intent".into())
                .spawn(move || {
                    let outcome = open_if_supported(platform.as_ref(), &url);
                    log_outcome(session, outcome.map(|o| (url, o)));
                });
            if let Err(e) = spawned {
                warn!(%session, error = %e, "failed to spawn intent thread");
            }
        }
    }
}

fn log_outcome(session: SessionId, result: Result<(String, IntentOutcome)>) {
    match result {
        Ok((url, IntentOutcome::Opened)) => info!(%session, %url, "opened app intent"),
        Ok((url, IntentOutcome::Unsupported)) => {
            debug!(%session, %url, "no app can handle intent")
        }
        Err(e) => warn!(%session, error = %e, "app intent failed"),
    }
}
