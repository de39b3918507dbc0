//! Blocking still-image capture.

use std::process::Command;
use std::time::Duration;

use tracing::{debug, error};

use homecam_core::{Error, ImageSize, Result, StillSettings};

/// Configuration for the still-capture invoker.
#[derive(Debug, Clone)]
pub struct StillCaptureConfig {
    /// Still-capture command
    pub command: String,
    /// Sensor warm-up delay before the image is taken
    pub warmup: Duration,
}

impl Default for StillCaptureConfig {
    fn default() -> Self {
        Self {
            command: "raspistill".to_string(),
            warmup: Duration::from_millis(2000),
        }
    }
}

impl From<&StillSettings> for StillCaptureConfig {
    fn from(settings: &StillSettings) -> Self {
        Self {
            command: settings.command.clone(),
            warmup: Duration::from_millis(settings.warmup_ms),
        }
    }
}

/// One-shot still capture through an external capture tool.
///
/// Stateless and independent of any streaming session. The capture blocks
/// the calling context for its whole duration, dominated by the sensor
/// warm-up delay.
#[derive(Debug, Clone, Default)]
pub struct StillCapture {
    config: StillCaptureConfig,
}

impl StillCapture {
    /// Create an invoker with the given configuration.
    pub fn new(config: StillCaptureConfig) -> Self {
        Self { config }
    }

    /// Argument list for a capture at the requested size.
    fn build_args(&self, size: ImageSize) -> Vec<String> {
        vec![
            "-n".to_string(), // No preview
            "-t".to_string(),
            self.config.warmup.as_millis().to_string(), // warm-up delay
            "-ex".to_string(),
            "auto".to_string(), // auto exposure
            "-mm".to_string(),
            "average".to_string(), // metering mode, average
            "-drc".to_string(),
            "med".to_string(), // dynamic range compression
            "-w".to_string(),
            size.width.to_string(),
            "-h".to_string(),
            size.height.to_string(),
            "-o".to_string(),
            "-".to_string(), // output to stdout
        ]
    }

    /// Capture a still image at the requested size.
    ///
    /// Returns the captured bytes verbatim, including zero-length results.
    /// Diagnostic output from a tool that ran is logged but never suppresses
    /// the captured bytes; only a failure to run the tool at all is an error.
    pub fn capture(&self, size: ImageSize) -> Result<Vec<u8>> {
        let args = self.build_args(size);
        debug!(
            "Executing image capture command: {} {}",
            self.config.command,
            args.join(" ")
        );

        let output = Command::new(&self.config.command)
            .args(&args)
            .output()
            .map_err(|e| {
                error!("Failed to run capture command '{}': {}", self.config.command, e);
                Error::Capture(e.to_string())
            })?;

        if !output.status.success() {
            error!("Capture command exited with {}", output.status);
        }

        let diagnostics = String::from_utf8_lossy(&output.stderr);
        let diagnostics = diagnostics.trim();
        if !diagnostics.is_empty() {
            error!("Error in still output: {}", diagnostics);
        }

        Ok(output.stdout)
    }
}
