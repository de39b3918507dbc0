//! Shell-launched pipeline process handles with process-group signaling.

use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::{Child, ChildStderr, Command};
use tracing::{debug, error, info};

use homecam_core::{Error, Result};

/// Signal kinds delivered to a pipeline's process group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Cooperative termination request (SIGTERM)
    Term,
    /// Non-ignorable termination (SIGKILL)
    Kill,
}

impl Signal {
    fn as_raw(self) -> libc::c_int {
        match self {
            Signal::Term => libc::SIGTERM,
            Signal::Kill => libc::SIGKILL,
        }
    }
}

/// Handle to a launched stream pipeline.
///
/// The pipeline is a shell command (typically two tools joined by a pipe),
/// launched in its own process group so every stage can be signaled as a
/// unit. The group id is captured at launch time; querying it later would
/// fail once the group has exited.
#[derive(Debug)]
pub struct PipelineHandle {
    child: Child,
    pid: u32,
    pgid: libc::pid_t,
}

impl PipelineHandle {
    /// Launch a shell command in a fresh process group.
    ///
    /// Standard output is discarded, standard error is captured for
    /// diagnostics and standard input is not connected.
    pub fn spawn_shell(shell: &str, command: &str) -> Result<Self> {
        debug!("Spawning pipeline: shell='{}' command=\"{}\"", shell, command);

        let mut child = Command::new(shell)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .process_group(0)
            .spawn()
            .map_err(|e| {
                error!("Failed to spawn pipeline through '{}': {}", shell, e);
                Error::Launch(e.to_string())
            })?;

        let pid = child
            .id()
            .ok_or_else(|| Error::Launch("pipeline exited before its pid could be read".to_string()))?;

        // Launched into a fresh group, so the group id equals the shell's pid.
        let pgid = pid as libc::pid_t;

        info!("Pipeline spawned: pid={}, pgid={}", pid, pgid);

        Ok(Self { child, pid, pgid })
    }

    /// Process id of the launched shell.
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Process group id of the whole pipeline, captured at launch.
    pub fn pgid(&self) -> i32 {
        self.pgid
    }

    /// Deliver a signal to the entire process group.
    ///
    /// Fails with `ESRCH` if the group has already exited; callers decide
    /// whether that is benign.
    pub fn signal(&self, signal: Signal) -> std::io::Result<()> {
        debug!("Signaling process group {}: {:?}", self.pgid, signal);
        // SAFETY: killpg only delivers a signal to a pgid we own; no memory
        // is shared with the callee.
        let rc = unsafe { libc::killpg(self.pgid, signal.as_raw()) };
        if rc == 0 {
            Ok(())
        } else {
            Err(std::io::Error::last_os_error())
        }
    }

    /// Wait for the shell to exit, up to `duration`.
    ///
    /// Returns `None` if the bound elapses before exit.
    pub async fn wait_timeout(&mut self, duration: Duration) -> Result<Option<ExitStatus>> {
        match tokio::time::timeout(duration, self.child.wait()).await {
            Ok(status) => Ok(Some(status?)),
            Err(_) => Ok(None),
        }
    }

    /// Wait unconditionally for the shell to exit.
    pub async fn wait(&mut self) -> Result<ExitStatus> {
        Ok(self.child.wait().await?)
    }

    /// Exit status if the shell has already exited, without waiting.
    pub fn try_status(&mut self) -> Result<Option<ExitStatus>> {
        Ok(self.child.try_wait()?)
    }

    /// Check if the shell is still running.
    pub fn is_alive(&mut self) -> bool {
        self.child.try_wait().ok().flatten().is_none()
    }

    /// Take ownership of the captured diagnostic stream.
    ///
    /// Returns `None` if it was already taken.
    pub fn take_stderr(&mut self) -> Option<ChildStderr> {
        self.child.stderr.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::process::ExitStatusExt;
    use std::time::Instant;
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn test_spawn_and_wait() {
        let mut handle = PipelineHandle::spawn_shell("/bin/sh", "exit 0").unwrap();
        let status = handle.wait().await.unwrap();
        assert!(status.success());
    }

    #[tokio::test]
    async fn test_spawn_failure_is_launch_error() {
        let result = PipelineHandle::spawn_shell("/nonexistent/shell", "exit 0");
        assert!(matches!(result, Err(Error::Launch(_))));
    }

    #[tokio::test]
    async fn test_pgid_equals_pid() {
        let mut handle = PipelineHandle::spawn_shell("/bin/sh", "sleep 5").unwrap();
        assert_eq!(handle.pgid(), handle.pid() as i32);
        handle.signal(Signal::Kill).unwrap();
        handle.wait().await.unwrap();
    }

    #[tokio::test]
    async fn test_term_stops_cooperative_pipeline() {
        let mut handle = PipelineHandle::spawn_shell("/bin/sh", "sleep 5").unwrap();
        assert!(handle.is_alive());

        let started = Instant::now();
        handle.signal(Signal::Term).unwrap();
        let status = handle
            .wait_timeout(Duration::from_secs(2))
            .await
            .unwrap()
            .expect("pipeline should exit well within the bound");

        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(status.signal(), Some(libc::SIGTERM));
    }

    #[tokio::test]
    async fn test_cooperative_exit_reports_clean_status() {
        let mut handle =
            PipelineHandle::spawn_shell("/bin/sh", "trap 'exit 0' TERM; sleep 5").unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        handle.signal(Signal::Term).unwrap();
        let status = handle
            .wait_timeout(Duration::from_secs(2))
            .await
            .unwrap()
            .expect("cleanup handler should exit within the bound");

        // The shell ran its cleanup handler; nothing was force-killed
        assert!(status.success());
    }

    #[tokio::test]
    async fn test_kill_after_ignored_term() {
        let mut handle =
            PipelineHandle::spawn_shell("/bin/sh", "trap '' TERM; sleep 5").unwrap();
        // Give the shell a moment to install the trap
        tokio::time::sleep(Duration::from_millis(100)).await;

        handle.signal(Signal::Term).unwrap();
        let graceful = handle
            .wait_timeout(Duration::from_millis(300))
            .await
            .unwrap();
        assert!(graceful.is_none(), "TERM should have been ignored");

        handle.signal(Signal::Kill).unwrap();
        let status = handle.wait().await.unwrap();
        assert_eq!(status.signal(), Some(libc::SIGKILL));
    }

    #[tokio::test]
    async fn test_signal_after_exit_is_esrch() {
        let mut handle = PipelineHandle::spawn_shell("/bin/sh", "exit 0").unwrap();
        handle.wait().await.unwrap();

        let err = handle.signal(Signal::Term).unwrap_err();
        assert_eq!(err.raw_os_error(), Some(libc::ESRCH));
    }

    #[tokio::test]
    async fn test_stderr_captured() {
        let mut handle =
            PipelineHandle::spawn_shell("/bin/sh", "echo diagnostics >&2").unwrap();

        let mut stderr = handle.take_stderr().expect("stderr should be piped");
        let mut buf = Vec::new();
        stderr.read_to_end(&mut buf).await.unwrap();
        handle.wait().await.unwrap();

        assert_eq!(String::from_utf8_lossy(&buf).trim(), "diagnostics");
        assert!(handle.take_stderr().is_none());
    }

    #[tokio::test]
    async fn test_group_signal_reaches_pipe_stages() {
        // Two stages joined by a pipe; killing only the shell would leave
        // the second stage behind.
        let mut handle =
            PipelineHandle::spawn_shell("/bin/sh", "sleep 5 | sleep 5").unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        handle.signal(Signal::Kill).unwrap();
        let status = handle.wait().await.unwrap();
        assert_eq!(status.signal(), Some(libc::SIGKILL));
    }
}
