//! Pipeline command rendering.

use homecam_core::{Result, StreamConfig, VideoProfile};

/// Render a pipeline command template against a negotiated stream config.
///
/// The rendered command is a pure function of the template and the config:
/// the bitrate ceiling is converted from kilobits to bits per second on a
/// local copy at this point and nowhere else, so rendering the same config
/// twice yields the same command. The stored config is never mutated.
///
/// Recognized substitution points: `{width}`, `{height}`, `{fps}`,
/// `{v_max_bitrate}`, `{v_ssrc}`, `{v_srtp_key}`, `{address}`, `{v_port}`
/// and `{profile}`. Placeholders the template does not use are simply
/// skipped; an out-of-range profile ordinal is an error even then.
pub fn render_pipeline(template: &str, config: &StreamConfig) -> Result<String> {
    let profile = VideoProfile::from_ordinal(config.v_profile_id)?;

    // kbps to bps conversion
    let max_bitrate_bps = u64::from(config.v_max_bitrate) * 1000;

    Ok(template
        .replace("{width}", &config.width.to_string())
        .replace("{height}", &config.height.to_string())
        .replace("{fps}", &config.fps.to_string())
        .replace("{v_max_bitrate}", &max_bitrate_bps.to_string())
        .replace("{v_ssrc}", &config.v_ssrc.to_string())
        .replace("{v_srtp_key}", &config.v_srtp_key)
        .replace("{address}", &config.address)
        .replace("{v_port}", &config.v_port.to_string())
        .replace("{profile}", profile.as_str()))
}
