//! homecam accessory library
//!
//! Composes the stream supervisor and still-capture invoker into the camera
//! delegate the accessory-hosting framework drives. The framework owns
//! advertisement, pairing, and stream negotiation; it calls the hooks on
//! [`Camera`] with the session identity and parameters it negotiated.

#![warn(missing_docs)]
#![warn(clippy::all)]

use tracing::info;

use homecam_core::{AccessoryConfig, ImageSize, Result, SessionId, StreamConfig};
use homecam_pipeline::{StillCapture, StillCaptureConfig};
use homecam_session::{StreamSupervisor, SupervisorConfig};

/// The camera accessory delegate.
///
/// One instance serves every negotiated session; sessions are tracked inside
/// the supervisor, keyed by the framework-assigned session id.
pub struct Camera {
    supervisor: StreamSupervisor,
    still: StillCapture,
    config: AccessoryConfig,
}

impl Camera {
    /// Build the accessory from a validated configuration.
    pub fn new(config: AccessoryConfig) -> Self {
        let supervisor = StreamSupervisor::with_config(SupervisorConfig::from(&config.stream));
        let still = StillCapture::new(StillCaptureConfig::from(&config.still));
        Self {
            supervisor,
            still,
            config,
        }
    }

    /// Accessory configuration, including the advertised capability set.
    pub fn config(&self) -> &AccessoryConfig {
        &self.config
    }

    /// Hook: start the stream pipeline for a negotiated session.
    ///
    /// The returned boolean is the framework's signal for replying to the
    /// requesting client; on `false` no session state exists and
    /// [`stop_stream`] must not be called for this session.
    ///
    /// [`stop_stream`]: Camera::stop_stream
    pub async fn start_stream(&self, session_id: SessionId, stream_config: &StreamConfig) -> bool {
        self.supervisor.start_stream(session_id, stream_config).await
    }

    /// Hook: stop the stream pipeline for a session.
    pub async fn stop_stream(&self, session_id: SessionId) {
        self.supervisor.stop_stream(session_id).await;
    }

    /// Hook: capture a still image at the requested size.
    ///
    /// Blocks the calling context for the whole capture, dominated by the
    /// configured sensor warm-up.
    pub fn snapshot(&self, size: ImageSize) -> Result<Vec<u8>> {
        self.still.capture(size)
    }

    /// Number of live streaming sessions.
    pub fn session_count(&self) -> usize {
        self.supervisor.session_count()
    }

    /// Stop every live session.
    ///
    /// Called at accessory shutdown so no pipeline outlives the process.
    pub async fn shutdown(&self) {
        let live = self.supervisor.session_count();
        if live > 0 {
            info!("Stopping {} live session(s)", live);
        }
        self.supervisor.stop_all().await;
    }
}
