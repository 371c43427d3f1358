// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Zephyr — Core types, wire protocol, and error definitions shared by the
// checkout bridge crates.

pub mod config;
pub mod error;
pub mod protocol;
pub mod types;

pub use config::{BridgeSettings, Environment, ShopPlatform, ZephyrConfiguration};
pub use error::ZephyrError;
pub use protocol::{Envelope, OutboundMessage, PeerMessage};
pub use types::*;
