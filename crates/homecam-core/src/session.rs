//! Session identity and negotiated stream parameters.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a negotiated streaming session.
///
/// Assigned by the hosting framework when a client requests a stream and
/// opaque to this crate; it stays valid for the lifetime of that session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for SessionId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Negotiated parameters for one streaming session.
///
/// Handed over by the hosting framework once a client has negotiated a
/// stream; field names match the negotiation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Frame rate in frames per second
    pub fps: u32,
    /// Bitrate ceiling in kilobits per second, as negotiated.
    ///
    /// Normalized to bits per second once, at pipeline render time; this
    /// field always holds the value as received.
    pub v_max_bitrate: u32,
    /// Synchronization source identifier for the video RTP stream
    pub v_ssrc: u32,
    /// SRTP master key and salt, base64-encoded
    pub v_srtp_key: String,
    /// Destination address of the requesting client
    pub address: String,
    /// Destination video port on the client
    pub v_port: u16,
    /// Codec profile ordinal (0 = baseline, 1 = main, 2 = high)
    pub v_profile_id: u8,
}
