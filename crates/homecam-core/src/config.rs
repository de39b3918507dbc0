//! Accessory configuration loaded from YAML.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::geometry::Resolution;
use crate::profile::VideoProfile;
use crate::{Error, Result};

/// Default stream pipeline: capture tool piped into ffmpeg, which wraps the
/// H.264 elementary stream in SRTP and sends it to the requesting client.
///
/// Substitution points are filled in from the negotiated [`StreamConfig`]
/// (`{v_max_bitrate}` in bits per second). The transport parameters
/// (cipher suite, packet size, RTCP ports) are fixed; the downstream
/// transport-security suite depends on them byte for byte.
///
/// [`StreamConfig`]: crate::StreamConfig
pub const DEFAULT_PIPELINE: &str = concat!(
    "raspivid -n -ih -t 0 -ex auto -w {width} -h {height} -fps {fps} ",
    " -b {v_max_bitrate} -o - ",
    "| ffmpeg -i - -c:v copy ",
    "-payload_type 99 -ssrc {v_ssrc} -f rtp ",
    "-srtp_out_suite AES_CM_128_HMAC_SHA1_80 -srtp_out_params {v_srtp_key} ",
    "'srtp://{address}:{v_port}?rtcpport={v_port}&",
    "localrtcpport={v_port}&pkt_size=1378'"
);

/// Profile-aware variant of [`DEFAULT_PIPELINE`]: passes the negotiated
/// H.264 profile name to the capture tool.
pub const DEFAULT_PROFILE_PIPELINE: &str = concat!(
    "raspivid -n -ih -t 0 -ex auto -pf {profile} -w {width} -h {height} -fps {fps} ",
    " -b {v_max_bitrate} -o - ",
    "| ffmpeg -i - -c:v copy ",
    "-payload_type 99 -ssrc {v_ssrc} -f rtp ",
    "-srtp_out_suite AES_CM_128_HMAC_SHA1_80 -srtp_out_params {v_srtp_key} ",
    "'srtp://{address}:{v_port}?rtcpport={v_port}&",
    "localrtcpport={v_port}&pkt_size=1378'"
);

/// Accessory configuration loaded from YAML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AccessoryConfig {
    /// Accessory settings
    pub accessory: AccessorySettings,
    /// Advertised video capabilities
    pub video: VideoSettings,
    /// Stream pipeline settings
    pub stream: StreamSettings,
    /// Still capture settings
    pub still: StillSettings,
}

impl AccessoryConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: AccessoryConfig =
            serde_yaml::from_str(yaml).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.video.resolutions.is_empty() {
            return Err(Error::Config(
                "video.resolutions must not be empty".to_string(),
            ));
        }

        for res in &self.video.resolutions {
            if res.width == 0 || res.height == 0 || res.fps == 0 {
                return Err(Error::Config(format!(
                    "invalid resolution: {}x{}@{}",
                    res.width, res.height, res.fps
                )));
            }
        }

        if self.video.profiles.is_empty() {
            return Err(Error::Config(
                "video.profiles must not be empty".to_string(),
            ));
        }

        // Every advertised ordinal must resolve to a known profile
        for &ordinal in &self.video.profiles {
            VideoProfile::from_ordinal(ordinal)?;
        }

        if self.stream.template.trim().is_empty() {
            return Err(Error::Config("stream.template must not be empty".to_string()));
        }

        if self.stream.shell.trim().is_empty() {
            return Err(Error::Config("stream.shell must not be empty".to_string()));
        }

        if self.stream.stop_timeout_ms == 0 {
            return Err(Error::Config(
                "stream.stop_timeout_ms must be > 0".to_string(),
            ));
        }

        if self.still.command.trim().is_empty() {
            return Err(Error::Config("still.command must not be empty".to_string()));
        }

        Ok(())
    }
}

/// Accessory identity settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessorySettings {
    /// Display name advertised by the hosting framework
    pub name: String,
    /// Local address the accessory streams from
    pub address: String,
    /// Port the hosting framework listens on
    pub port: u16,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for AccessorySettings {
    fn default() -> Self {
        Self {
            name: "Camera".to_string(),
            address: "0.0.0.0".to_string(),
            port: 51826,
            log_level: "info".to_string(),
        }
    }
}

/// Advertised video capabilities.
///
/// Clients negotiate one entry from these during stream setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoSettings {
    /// Supported resolution/framerate combinations
    pub resolutions: Vec<Resolution>,
    /// Offered codec profile ordinals
    pub profiles: Vec<u8>,
    /// Whether streams are carried over SRTP
    pub srtp: bool,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            resolutions: vec![
                // Low-end entry required by watch-class clients
                Resolution::new(352, 240, 15),
                Resolution::new(1920, 1080, 30),
                Resolution::new(1280, 720, 30),
                Resolution::new(854, 480, 30),
                Resolution::new(480, 360, 30),
            ],
            profiles: vec![0, 1, 2],
            srtp: true,
        }
    }
}

/// Stream pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamSettings {
    /// Pipeline command template rendered per session
    pub template: String,
    /// Shell the pipeline is launched through
    pub shell: String,
    /// Graceful-shutdown wait before the pipeline group is force-killed
    pub stop_timeout_ms: u64,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            template: DEFAULT_PIPELINE.to_string(),
            shell: "/bin/sh".to_string(),
            stop_timeout_ms: 2000,
        }
    }
}

/// Still capture settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StillSettings {
    /// Still-capture command
    pub command: String,
    /// Sensor warm-up delay in milliseconds
    pub warmup_ms: u64,
}

impl Default for StillSettings {
    fn default() -> Self {
        Self {
            command: "raspistill".to_string(),
            warmup_ms: 2000,
        }
    }
}
