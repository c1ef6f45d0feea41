//! # Foveation Configuration
//!
//! Every tunable of the transcoder lives in [`FoveaConfig`]. The same value
//! is handed to encode and decode so both sides agree on filter and padding.
//!
//! ## Configuration Parameters
//!
//! | Parameter | Type | Range | Description |
//! |-----------|------|-------|-------------|
//! | `crop_angle` | `u32` | 1-360 | Angular width of the viewport kept around the azimuth |
//! | `h_focus_angle` | `u32` | 1..crop_angle | Angular width of the full-resolution band |
//! | `v_focus_angle` | `u32` | 1-179 | Angular height of the full-resolution patch |
//! | `shrink_factor` | `u32` | >= 1 | Linear downsampling factor for the periphery |
//! | `pole_policy` | `PolePolicy` | clamp/reject | What to do when elevation pushes the patch off the frame |
//! | `filter` | `ResampleFilter` | | Resampling filter for shrink and restore |
//! | `pad_bg` | `[u8; 4]` | | Fill for reconstructed pixels outside the viewport |
//!
//! Defaults: a 120° viewport, a 20°×20°
//! focus patch and 5× peripheral shrink.
//!
//! ## Examples
//!
//! ```rust
//! use fovea::config::FoveaConfig;
//!
//! let config = FoveaConfig::default();
//! assert!(config.validate().is_ok());
//!
//! let wide = FoveaConfig { crop_angle: 180, h_focus_angle: 40, ..FoveaConfig::default() };
//! assert!(wide.validate().is_ok());
//!
//! let broken = FoveaConfig { h_focus_angle: 120, ..FoveaConfig::default() };
//! assert!(broken.validate().is_err());
//! ```

use std::path::Path;

use fovea_scale::ResampleFilter;
use serde::{Deserialize, Serialize};

use crate::error::{FoveaError, FoveaResult};

/// Policy for an elevation that would place the focus patch partly outside
/// the frame (or leave no rows above or below it).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PolePolicy {
    /// Slide the patch back inside the frame, keeping its height.
    #[default]
    Clamp,
    /// Refuse the frame with a validation error.
    Reject,
}

/// Foveation policy for encode and decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoveaConfig {
    /// Angular width (degrees) of the viewport cropped around the azimuth.
    pub crop_angle: u32,

    /// Angular width (degrees) of the full-resolution band inside the
    /// viewport. Must be strictly less than `crop_angle`.
    pub h_focus_angle: u32,

    /// Angular height (degrees) of the full-resolution patch, centred on the
    /// elevation.
    pub v_focus_angle: u32,

    /// Linear shrink applied to both axes of every peripheral strip.
    /// 1 keeps the periphery at full resolution.
    pub shrink_factor: u32,

    /// Behaviour near the poles.
    pub pole_policy: PolePolicy,

    /// Resampling filter used by the downsampler and reconstructor.
    pub filter: ResampleFilter,

    /// Colour written into reconstructed pixels the viewport never covered.
    pub pad_bg: [u8; 4],
}

impl Default for FoveaConfig {
    fn default() -> Self {
        Self {
            crop_angle: 120,
            h_focus_angle: 20,
            v_focus_angle: 20,
            shrink_factor: 5,
            pole_policy: PolePolicy::Clamp,
            filter: ResampleFilter::Bilinear,
            pad_bg: [0, 0, 0, 255],
        }
    }
}

impl FoveaConfig {
    /// Validates the configuration parameters.
    ///
    /// The transcoder itself treats an invalid configuration as a programmer
    /// error and panics; call this first on anything that came from a user.
    pub fn validate(&self) -> FoveaResult<()> {
        if !(1..=360).contains(&self.crop_angle) {
            return Err(FoveaError::config(
                "crop_angle",
                self.crop_angle.to_string(),
                "must be between 1 and 360 degrees",
            ));
        }
        if self.h_focus_angle == 0 || self.h_focus_angle >= self.crop_angle {
            return Err(FoveaError::config(
                "h_focus_angle",
                self.h_focus_angle.to_string(),
                format!(
                    "must be at least 1 and less than crop_angle ({})",
                    self.crop_angle
                ),
            ));
        }
        if !(1..180).contains(&self.v_focus_angle) {
            return Err(FoveaError::config(
                "v_focus_angle",
                self.v_focus_angle.to_string(),
                "must be between 1 and 179 degrees",
            ));
        }
        if self.shrink_factor == 0 {
            return Err(FoveaError::config(
                "shrink_factor",
                "0",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// Load and validate a JSON configuration file. Missing keys take their
    /// default values.
    pub fn from_json_file(path: impl AsRef<Path>) -> FoveaResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| FoveaError::io("read config", e).with_path(path.display().to_string()))?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| FoveaError::from(e).with_context(format!("parsing {}", path.display())))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FoveaConfig::default();
        assert_eq!(config.crop_angle, 120);
        assert_eq!(config.h_focus_angle, 20);
        assert_eq!(config.v_focus_angle, 20);
        assert_eq!(config.shrink_factor, 5);
        assert_eq!(config.pole_policy, PolePolicy::Clamp);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = FoveaConfig::default();

        config.shrink_factor = 0;
        assert!(config.validate().is_err());
        config.shrink_factor = 1;
        assert!(config.validate().is_ok());

        config.h_focus_angle = config.crop_angle;
        assert!(config.validate().is_err());
        config.h_focus_angle = 20;

        config.crop_angle = 361;
        assert!(config.validate().is_err());
        config.crop_angle = 360;
        assert!(config.validate().is_ok());

        config.v_focus_angle = 180;
        assert!(config.validate().is_err());
        config.v_focus_angle = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: FoveaConfig =
            serde_json::from_str(r#"{"shrink_factor": 8, "pole_policy": "reject"}"#).unwrap();
        assert_eq!(config.shrink_factor, 8);
        assert_eq!(config.pole_policy, PolePolicy::Reject);
        assert_eq!(config.crop_angle, 120);
        assert_eq!(config.filter, ResampleFilter::Bilinear);
    }

    #[test]
    fn test_json_file_is_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fovea.json");
        std::fs::write(&path, r#"{"crop_angle": 30, "h_focus_angle": 45}"#).unwrap();
        let err = FoveaConfig::from_json_file(&path).unwrap_err();
        assert_eq!(err.category(), "config");

        let missing = FoveaConfig::from_json_file(dir.path().join("nope.json")).unwrap_err();
        assert_eq!(missing.category(), "io");
    }
}
