//! Stream session supervisor.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use homecam_core::{SessionId, StreamConfig, StreamSettings, DEFAULT_PIPELINE};
use homecam_pipeline::{render_pipeline, PipelineHandle, Signal};

/// Configuration for the stream supervisor.
#[derive(Debug, Clone)]
pub struct SupervisorConfig {
    /// Shell the pipeline is launched through
    pub shell: String,
    /// Pipeline command template rendered per session
    pub template: String,
    /// Graceful-shutdown wait before the pipeline group is force-killed
    pub stop_timeout: Duration,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            shell: "/bin/sh".to_string(),
            template: DEFAULT_PIPELINE.to_string(),
            stop_timeout: Duration::from_secs(2),
        }
    }
}

impl From<&StreamSettings> for SupervisorConfig {
    fn from(settings: &StreamSettings) -> Self {
        Self {
            shell: settings.shell.clone(),
            template: settings.template.clone(),
            stop_timeout: Duration::from_millis(settings.stop_timeout_ms),
        }
    }
}

/// Supervisor for live streaming sessions.
///
/// The hosting framework calls [`start_stream`] once per negotiated session
/// and [`stop_stream`] with the same id on explicit stop, error, or
/// accessory shutdown. Each session's pipeline handle is exclusively owned
/// by its registry entry; sessions start and stop independently of one
/// another.
///
/// [`start_stream`]: StreamSupervisor::start_stream
/// [`stop_stream`]: StreamSupervisor::stop_stream
pub struct StreamSupervisor {
    sessions: Arc<RwLock<HashMap<SessionId, PipelineHandle>>>,
    config: SupervisorConfig,
}

impl StreamSupervisor {
    /// Create a supervisor with default configuration.
    pub fn new() -> Self {
        Self::with_config(SupervisorConfig::default())
    }

    /// Create a supervisor with custom configuration.
    pub fn with_config(config: SupervisorConfig) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    /// Start the stream pipeline for a negotiated session.
    ///
    /// Returns `true` when the pipeline is running and its handle recorded;
    /// `false` when it could not be launched, in which case no handle is
    /// recorded and the framework must not call [`stop_stream`] for this
    /// session.
    ///
    /// [`stop_stream`]: StreamSupervisor::stop_stream
    pub async fn start_stream(&self, session_id: SessionId, stream_config: &StreamConfig) -> bool {
        debug!(
            "[{}] Starting stream with the following parameters: {:?}",
            session_id, stream_config
        );

        let cmd = match render_pipeline(&self.config.template, stream_config) {
            Ok(cmd) => cmd,
            Err(e) => {
                error!("[{}] Failed to render pipeline command: {}", session_id, e);
                return false;
            }
        };
        debug!("Executing start stream command: \"{}\"", cmd);

        let handle = match PipelineHandle::spawn_shell(&self.config.shell, &cmd) {
            Ok(handle) => handle,
            Err(e) => {
                error!("Failed to start streaming process because of error: {}", e);
                return false;
            }
        };

        info!(
            "[{}] Started stream process - PID {}",
            session_id,
            handle.pid()
        );

        let mut sessions = self.sessions.write().unwrap();
        if sessions.insert(session_id, handle).is_some() {
            // The framework serializes start/stop per session; a live entry
            // here means it restarted a session without stopping it first.
            warn!("[{}] Replaced the handle of a live session", session_id);
        }

        true
    }

    /// Stop the stream pipeline for a session.
    ///
    /// Sends a cooperative termination signal to the whole process group,
    /// waits up to the configured bound for exit and diagnostics, then
    /// force-kills the group and waits unconditionally. Calling this for a
    /// session with no recorded handle is a no-op.
    pub async fn stop_stream(&self, session_id: SessionId) {
        let handle = self.sessions.write().unwrap().remove(&session_id);

        let Some(mut handle) = handle else {
            warn!("No process for session ID {}", session_id);
            return;
        };

        info!("[{}] Stopping stream.", session_id);

        // Drain diagnostics concurrently so a chatty pipeline cannot wedge
        // on a full pipe while we wait for it to exit.
        let drain = handle.take_stderr().map(spawn_stderr_drain);

        signal_group(&handle, Signal::Term, session_id);

        let exited = match handle.wait_timeout(self.config.stop_timeout).await {
            Ok(Some(status)) => {
                debug!("[{}] Stream process exited with {}", session_id, status);
                true
            }
            Ok(None) => {
                error!(
                    "Timeout while waiting for the stream process to terminate. Trying with kill."
                );
                false
            }
            Err(e) => {
                error!("[{}] Failed waiting for stream process: {}", session_id, e);
                false
            }
        };

        if !exited {
            signal_group(&handle, Signal::Kill, session_id);
            match handle.wait().await {
                Ok(status) => {
                    debug!("[{}] Stream process exited with {}", session_id, status);
                }
                Err(e) => {
                    error!("[{}] Failed to reap stream process: {}", session_id, e);
                }
            }
        }

        if let Some(drain) = drain {
            if let Ok(buf) = drain.await {
                if !buf.is_empty() {
                    debug!("Stream command stderr: {}", String::from_utf8_lossy(&buf));
                }
            }
        }

        debug!("[{}] Stream process stopped.", session_id);
    }

    /// Stop every live session.
    ///
    /// Used at accessory shutdown so no pipeline outlives the process.
    pub async fn stop_all(&self) {
        let session_ids: Vec<SessionId> = {
            let sessions = self.sessions.read().unwrap();
            sessions.keys().copied().collect()
        };

        for session_id in session_ids {
            self.stop_stream(session_id).await;
        }
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.read().unwrap().len()
    }

    /// Check whether a session has a live pipeline recorded.
    pub fn is_streaming(&self, session_id: &SessionId) -> bool {
        self.sessions.read().unwrap().contains_key(session_id)
    }
}

impl Default for StreamSupervisor {
    fn default() -> Self {
        Self::new()
    }
}

/// Deliver a signal to the pipeline's group, tolerating an already-exited
/// group.
fn signal_group(handle: &PipelineHandle, signal: Signal, session_id: SessionId) {
    if let Err(e) = handle.signal(signal) {
        if e.raw_os_error() == Some(libc::ESRCH) {
            debug!("[{}] Process group already exited", session_id);
        } else {
            error!(
                "[{}] Failed to send {:?} to process group: {}",
                session_id, signal, e
            );
        }
    }
}

fn spawn_stderr_drain(mut stderr: tokio::process::ChildStderr) -> JoinHandle<Vec<u8>> {
    tokio::spawn(async move {
        let mut buf = Vec::new();
        let _ = stderr.read_to_end(&mut buf).await;
        buf
    })
}
