// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub platform for desktop/CI builds where no native URL-intent or window
// APIs exist.
//
// URL intents report `PlatformUnavailable`; the window size is a fixed phone
// viewport so layout code still has something to work with.

use zephyr_core::error::{Result, ZephyrError};
use zephyr_core::types::ViewStyle;

use crate::traits::*;

/// Viewport reported by [`StubPlatform::window_size`].
pub const STUB_WINDOW: ViewStyle = ViewStyle {
    height: 844.0,
    width: 390.0,
};

/// No-op platform returned on hosts without native bindings.
pub struct StubPlatform;

impl PlatformBridge for StubPlatform {
    fn platform_tag(&self) -> &str {
        "Rust"
    }
}

impl UrlIntent for StubPlatform {
    fn can_open_url(&self, _url: &str) -> Result<bool> {
        tracing::warn!("UrlIntent::can_open_url called on stub platform");
        Err(ZephyrError::PlatformUnavailable)
    }

    fn open_url(&self, _url: &str) -> Result<()> {
        tracing::warn!("UrlIntent::open_url called on stub platform");
        Err(ZephyrError::PlatformUnavailable)
    }
}

impl WindowMetrics for StubPlatform {
    fn window_size(&self) -> Result<ViewStyle> {
        Ok(STUB_WINDOW)
    }
}
