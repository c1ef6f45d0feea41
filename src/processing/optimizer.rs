//! Encode and decode entry points.
//!
//! [`Foveator`] owns a validated [`FoveaConfig`] and nothing else, so one
//! instance can serve any number of threads. Every call builds its own
//! `Resizer`.

use fast_image_resize::Resizer;
use fovea_scale::Frame;
use tracing::{debug, info_span};

use crate::config::FoveaConfig;
use crate::core::AngleMapper;
use crate::error::{FoveaError, FoveaResult};
use crate::logging::timed;
use crate::record::{Geometry, OptimizedImage, Panels};

use super::downsample::{restore, shrink};
use super::reconstruct::{reanchor, reassemble};
use super::split::{split_horizontal, split_vertical};
use super::viewport::{extract, locate};

/// Foveated panorama transcoder.
#[derive(Debug, Clone)]
pub struct Foveator {
    config: FoveaConfig,
}

impl Foveator {
    /// # Panics
    /// If `config` does not validate. Use [`Foveator::try_new`] for
    /// configuration that came from outside the program.
    pub fn new(config: FoveaConfig) -> Self {
        crate::requires!(
            config.validate().is_ok(),
            "invalid configuration: {:?}",
            config
        );
        Self { config }
    }

    pub fn try_new(config: FoveaConfig) -> FoveaResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &FoveaConfig {
        &self.config
    }

    /// Encode `image` for a viewer looking at azimuth `angle` and elevation
    /// `v_angle` (degrees, elevation 0 at the top row).
    ///
    /// Any azimuth is accepted and normalized. Frames too small to yield
    /// five non-empty panels are rejected with a validation error.
    pub fn optimize_image(
        &self,
        image: &Frame,
        angle: i32,
        v_angle: i32,
    ) -> FoveaResult<OptimizedImage> {
        let cfg = &self.config;
        crate::requires!(
            cfg.h_focus_angle < cfg.crop_angle,
            "h_focus_angle {} must be less than crop_angle {}",
            cfg.h_focus_angle,
            cfg.crop_angle
        );
        let _span = info_span!("optimize_image", angle, v_angle, frame = %image.size()).entered();

        let mapper = AngleMapper::new(image.size());
        let focus_w = mapper.width_of(cfg.h_focus_angle);
        let focus_h = mapper.height_of(cfg.v_focus_angle);
        if image.is_empty() || focus_w == 0 || focus_h == 0 {
            return Err(FoveaError::validation(
                "frame size",
                "a frame large enough for a focus patch of at least one pixel",
                image.size().to_string(),
            )
            .with_operation("optimize_image"));
        }

        let viewport = locate(&mapper, angle, cfg.crop_angle);
        debug!(
            left_col = viewport.left_col,
            right_col = viewport.right_col,
            wraps = viewport.wraps(),
            "viewport located"
        );
        let crop = timed("viewport", || extract(image, &viewport))?;

        let (h, v) = timed("split", || -> FoveaResult<_> {
            let h = split_horizontal(&crop, focus_w)?;
            let v = split_vertical(&h.band, mapper.row(v_angle), focus_h, cfg.pole_policy)?;
            Ok((h, v))
        })?;

        let mut resizer = Resizer::new();
        let (left, right, top, bottom) = timed("shrink", || -> FoveaResult<_> {
            let mut squash = |strip: &Frame| shrink(&mut resizer, strip, cfg.shrink_factor, cfg.filter);
            Ok((squash(&h.left)?, squash(&h.right)?, squash(&v.top)?, squash(&v.bottom)?))
        })?;

        let record = OptimizedImage::from_parts(
            Panels {
                focused: v.focused,
                blurred_left: left.panel,
                blurred_right: right.panel,
                blurred_top: top.panel,
                blurred_bottom: bottom.panel,
            },
            Geometry {
                orig_h_size: left.orig,
                orig_v_size: top.orig,
                orig_bottom_size: bottom.orig,
                full_size: image.size(),
                left_buffer: viewport.left_col,
            },
        );
        debug!(
            record_bytes = record.byte_size(),
            frame_bytes = image.byte_len(),
            "frame encoded"
        );
        Ok(record)
    }

    /// Decode `record` into a frame of its `full_size`. Columns outside the
    /// viewport are filled with the configured pad colour.
    pub fn extract_image(&self, record: &OptimizedImage) -> FoveaResult<Frame> {
        let filter = self.config.filter;
        let _span = info_span!("extract_image", full = %record.full_size()).entered();

        let mut resizer = Resizer::new();
        let (left, right, top, bottom) = timed("restore", || -> FoveaResult<_> {
            let h = record.orig_h_size();
            Ok((
                restore(&mut resizer, record.blurred_left(), h, filter)?,
                restore(&mut resizer, record.blurred_right(), h, filter)?,
                restore(&mut resizer, record.blurred_top(), record.orig_v_size(), filter)?,
                restore(&mut resizer, record.blurred_bottom(), record.orig_bottom_size(), filter)?,
            ))
        })?;

        let crop = timed("reassemble", || {
            reassemble(&left, &top, record.focused(), &bottom, &right)
        })?;
        timed("reanchor", || {
            reanchor(&crop, record.left_buffer(), record.full_size(), self.config.pad_bg)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PolePolicy;
    use fovea_scale::Size;

    fn gradient(w: u32, h: u32) -> Frame {
        Frame::from_fn(Size::new(w, h), |x, y| [(x % 251) as u8, (y % 241) as u8, 128, 255])
    }

    #[test]
    fn foveator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Foveator>();
        assert_send_sync::<OptimizedImage>();
    }

    #[test]
    fn encode_produces_expected_panels() {
        let f = Foveator::new(FoveaConfig::default());
        let r = f.optimize_image(&gradient(720, 360), 180, 90).unwrap();
        assert_eq!(r.focused().size(), Size::new(40, 40));
        assert_eq!(r.orig_h_size(), Size::new(100, 360));
        assert_eq!(r.orig_v_size(), Size::new(40, 160));
        assert_eq!(r.orig_bottom_size(), Size::new(40, 160));
        assert_eq!(r.blurred_left().size(), Size::new(20, 72));
        assert_eq!(r.blurred_top().size(), Size::new(8, 32));
        assert_eq!(r.left_buffer(), 240);
        assert_eq!(r.full_size(), Size::new(720, 360));
    }

    #[test]
    fn decode_restores_full_size_and_focus() {
        let f = Foveator::new(FoveaConfig::default());
        let src = gradient(720, 360);
        let r = f.optimize_image(&src, 180, 90).unwrap();
        let out = f.extract_image(&r).unwrap();
        assert_eq!(out.size(), src.size());
        // focus band starts 100 columns into the crop, patch at rows 160..200
        for y in 160..200 {
            for x in 340..380 {
                assert_eq!(out.pixel(x, y), src.pixel(x, y));
            }
        }
        assert_eq!(out.pixel(0, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn polar_elevation_follows_the_policy() {
        let src = gradient(720, 360);
        let clamp = Foveator::new(FoveaConfig::default());
        let r = clamp.optimize_image(&src, 30, 0).unwrap();
        assert_eq!(r.orig_v_size().h, 1);

        let reject = Foveator::new(FoveaConfig {
            pole_policy: PolePolicy::Reject,
            ..FoveaConfig::default()
        });
        let err = reject.optimize_image(&src, 30, 0).unwrap_err();
        assert_eq!(err.category(), "validation");
    }

    #[test]
    fn narrowest_valid_focus_encodes() {
        let f = Foveator::new(FoveaConfig {
            crop_angle: 21,
            h_focus_angle: 20,
            ..FoveaConfig::default()
        });
        let r = f.optimize_image(&gradient(720, 360), 90, 90).unwrap();
        assert_eq!(r.crop_width(), 42);
        assert_eq!(r.orig_h_size().w, 1);
        assert_eq!(f.extract_image(&r).unwrap().size(), Size::new(720, 360));
    }

    #[test]
    fn tiny_frames_are_rejected() {
        let f = Foveator::new(FoveaConfig::default());
        assert!(f.optimize_image(&gradient(8, 4), 0, 90).is_err());
        assert!(f.optimize_image(&gradient(0, 0), 0, 90).is_err());
    }

    #[test]
    fn try_new_reports_bad_config() {
        let err = Foveator::try_new(FoveaConfig {
            h_focus_angle: 120,
            ..FoveaConfig::default()
        })
        .unwrap_err();
        assert_eq!(err.category(), "config");
    }

    #[test]
    #[should_panic(expected = "precondition violated")]
    fn new_panics_on_bad_config() {
        Foveator::new(FoveaConfig {
            shrink_factor: 0,
            ..FoveaConfig::default()
        });
    }
}
