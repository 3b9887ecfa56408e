//! Network-facing CLI utilities.
//!
//! This module provides utilities for address validation, interface
//! discovery, and connection establishment used by field-deployment scripts.

pub mod connect;
pub mod interfaces;
pub mod ipv4;

// Re-export public API
pub use connect::{connect_with_retry, ConnectRetryError, RetryPolicy};
pub use interfaces::{interface_devices, parse_interface_listing};
pub use ipv4::is_valid_ipv4;
