//! Video codec profile resolution.

use crate::{Error, Result};

/// H.264 profile negotiated for a stream.
///
/// The hosting framework supplies the profile as an enumerated ordinal; the
/// pipeline command template needs the human-readable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoProfile {
    /// Constrained baseline profile
    Baseline,
    /// Main profile
    Main,
    /// High profile
    High,
}

impl VideoProfile {
    /// Resolve a framework-supplied profile ordinal.
    ///
    /// Ordinals outside 0..=2 are a configuration error.
    pub fn from_ordinal(ordinal: u8) -> Result<Self> {
        match ordinal {
            0 => Ok(VideoProfile::Baseline),
            1 => Ok(VideoProfile::Main),
            2 => Ok(VideoProfile::High),
            other => Err(Error::UnknownProfile(other)),
        }
    }

    /// The ordinal the hosting framework uses for this profile.
    pub fn ordinal(&self) -> u8 {
        match self {
            VideoProfile::Baseline => 0,
            VideoProfile::Main => 1,
            VideoProfile::High => 2,
        }
    }

    /// The profile name understood by the pipeline command template.
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoProfile::Baseline => "baseline",
            VideoProfile::Main => "main",
            VideoProfile::High => "high",
        }
    }
}

impl std::fmt::Display for VideoProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_from_ordinal() {
        assert_eq!(
            VideoProfile::from_ordinal(0).unwrap(),
            VideoProfile::Baseline
        );
        assert_eq!(VideoProfile::from_ordinal(1).unwrap(), VideoProfile::Main);
        assert_eq!(VideoProfile::from_ordinal(2).unwrap(), VideoProfile::High);
    }

    #[test]
    fn test_profile_out_of_range() {
        let err = VideoProfile::from_ordinal(3).unwrap_err();
        assert!(matches!(err, Error::UnknownProfile(3)));

        assert!(VideoProfile::from_ordinal(255).is_err());
    }

    #[test]
    fn test_profile_names() {
        assert_eq!(VideoProfile::Baseline.as_str(), "baseline");
        assert_eq!(VideoProfile::Main.as_str(), "main");
        assert_eq!(VideoProfile::High.as_str(), "high");
    }

    #[test]
    fn test_profile_ordinal_round_trip() {
        for ordinal in 0..=2 {
            let profile = VideoProfile::from_ordinal(ordinal).unwrap();
            assert_eq!(profile.ordinal(), ordinal);
        }
    }

    #[test]
    fn test_profile_display() {
        assert_eq!(format!("{}", VideoProfile::Main), "main");
    }
}
