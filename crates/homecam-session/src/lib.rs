//! # homecam-session
//!
//! Stream session lifecycle management for the homecam camera accessory.
//!
//! This crate provides:
//! - The stream supervisor driven by the hosting framework's
//!   start/stop hooks
//! - Per-session pipeline handle registry
//! - Graceful-then-forced pipeline shutdown
//!
//! ## Architecture
//!
//! This is the session layer - it depends on homecam-core and
//! homecam-pipeline and owns every live pipeline from launch to teardown.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod supervisor;

// Re-export commonly used types
pub use supervisor::{StreamSupervisor, SupervisorConfig};
