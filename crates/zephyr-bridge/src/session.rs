// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Readiness and back-press interception state for one checkout session.

use chrono::{DateTime, Utc};

/// Two independent flags: readiness (one-way) and back-press interception
/// (freely toggled by the surface).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// When the surface first reported `app-ready`. Never reset.
    ready_at: Option<DateTime<Utc>>,
    intercepting_back_press: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.ready_at.is_some()
    }

    pub fn ready_at(&self) -> Option<DateTime<Utc>> {
        self.ready_at
    }

    /// Record readiness. Returns `true` only on the not-ready → ready
    /// transition; later calls change nothing.
    pub fn mark_ready(&mut self) -> bool {
        if self.ready_at.is_some() {
            return false;
        }
        self.ready_at = Some(Utc::now());
        true
    }

    pub fn is_intercepting_back_press(&self) -> bool {
        self.intercepting_back_press
    }

    pub fn set_intercepting_back_press(&mut self, consuming: bool) {
        self.intercepting_back_press = consuming;
    }
}
