//! Geometry types for snapshots and advertised stream resolutions.

use serde::{Deserialize, Serialize};

/// Requested output size for a still capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageSize {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl ImageSize {
    /// Create a new image size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// One advertised resolution/framerate combination.
///
/// The hosting framework offers these to clients during stream negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Frame rate in frames per second
    pub fps: u32,
}

impl Resolution {
    /// Create a new resolution entry.
    pub fn new(width: u32, height: u32, fps: u32) -> Self {
        Self { width, height, fps }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_size_creation() {
        let size = ImageSize::new(640, 480);
        assert_eq!(size.width, 640);
        assert_eq!(size.height, 480);
    }

    #[test]
    fn test_resolution_creation() {
        let res = Resolution::new(1920, 1080, 30);
        assert_eq!(res.width, 1920);
        assert_eq!(res.height, 1080);
        assert_eq!(res.fps, 30);
    }

    #[test]
    fn test_resolution_serialization() {
        let res = Resolution::new(352, 240, 15);
        let json = serde_json::to_string(&res).unwrap();
        let deserialized: Resolution = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, res);
    }
}
