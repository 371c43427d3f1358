// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Outbound message buffering.
//
// Messages sent before the surface reports `app-ready` are held here as
// serialized text and delivered in insertion order when it does. The queue
// is unbounded; crossing the warning threshold only logs.

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::traits::WebSurface;

/// Outcome of a [`OutboundQueue::flush`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushReport {
    /// Messages the surface accepted.
    pub delivered: usize,
    /// Messages dropped because posting failed or no surface was attached.
    pub dropped: usize,
}

/// FIFO of serialized messages waiting for the surface to become ready.
#[derive(Debug)]
pub struct OutboundQueue {
    pending: VecDeque<String>,
    warn_threshold: usize,
    /// Set once the threshold warning has been logged; cleared by flush.
    warned: bool,
}

impl OutboundQueue {
    pub fn new(warn_threshold: usize) -> Self {
        Self {
            pending: VecDeque::new(),
            warn_threshold,
            warned: false,
        }
    }

    /// Append a serialized message.
    pub fn enqueue(&mut self, message: String) {
        self.pending.push_back(message);
        if !self.warned && self.pending.len() > self.warn_threshold {
            self.warned = true;
            warn!(
                queued = self.pending.len(),
                threshold = self.warn_threshold,
                "checkout surface not ready, outbound queue growing"
            );
        }
    }

    /// Number of messages waiting.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Deliver every queued message in order, then empty the queue.
    ///
    /// A message the surface rejects is logged and dropped, never retried.
    /// With no surface the whole queue is dropped.
    pub fn flush(&mut self, surface: Option<&dyn WebSurface>) -> FlushReport {
        let mut report = FlushReport::default();
        let pending = std::mem::take(&mut self.pending);
        self.warned = false;

        let Some(surface) = surface else {
            report.dropped = pending.len();
            if report.dropped > 0 {
                warn!(dropped = report.dropped, "flush without a surface, messages dropped");
            }
            return report;
        };

        for message in pending {
            match surface.post_message(&message) {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    warn!(error = %e, "failed to post queued message, dropping");
                    report.dropped += 1;
                }
            }
        }

        debug!(
            delivered = report.delivered,
            dropped = report.dropped,
            "outbound queue flushed"
        );
        report
    }
}
