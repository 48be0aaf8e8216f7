//! Integration test support for tickstream-collector.
//!
//! - Scripted feed that replays messages and then raises an interrupt
//! - Mock WebSocket tick server

pub mod common;
