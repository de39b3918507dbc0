//! # homecam-pipeline
//!
//! OS process layer for the homecam camera accessory.
//!
//! This crate provides:
//! - Pipeline command rendering from negotiated stream parameters
//! - Shell-launched pipeline handles with process-group signaling
//! - The blocking still-capture invoker
//!
//! ## Architecture
//!
//! This is the process layer - it depends on homecam-core and owns every
//! interaction with spawned external tools. Session bookkeeping lives above
//! it in homecam-session.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod process;
pub mod still;
pub mod template;

// Re-export commonly used types
pub use process::{PipelineHandle, Signal};
pub use still::{StillCapture, StillCaptureConfig};
pub use template::render_pipeline;
