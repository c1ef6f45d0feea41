//! # Optimized Image Record
//!
//! [`OptimizedImage`] is everything decode needs: the full-resolution
//! focused patch, the four shrunk peripheral strips, their pre-shrink sizes,
//! the source frame size and the column where the viewport started.
//!
//! Fields are private and there are no setters. A record is built once by
//! the encoder (or parsed and validated from JSON) and only read afterwards,
//! so it can be shared freely between threads.
//!
//! ## Interchange Format
//!
//! Records serialize to a versioned JSON document:
//!
//! ```text
//! {
//!   "format": "fovea-optimized-image",
//!   "version": 1,
//!   "focused":        { "width": 200, "height": 200, "channels": 4, "data": "<base64>" },
//!   "blurred_left":   { ... },
//!   "blurred_right":  { ... },
//!   "blurred_top":    { ... },
//!   "blurred_bottom": { ... },
//!   "orig_h_size":      { "w": 500, "h": 1800 },
//!   "orig_v_size":      { "w": 200, "h": 800 },
//!   "orig_bottom_size": { "w": 200, "h": 800 },
//!   "full_size":        { "w": 3600, "h": 1800 },
//!   "left_buffer": 1200
//! }
//! ```
//!
//! Parsing checks the format tag, the version, every panel's byte length and
//! the geometric invariants below before handing out a record.

use std::io::{Read, Write};
use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use fovea_scale::frame::CHANNELS;
use fovea_scale::{Frame, Size};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{ErrorSeverity, FoveaError, FoveaResult};

/// Format tag written into every serialized record.
pub const RECORD_FORMAT: &str = "fovea-optimized-image";
/// Current record layout version.
pub const RECORD_VERSION: u32 = 1;

/// Reduced-footprint representation of one panorama frame.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RecordRepr")]
pub struct OptimizedImage {
    focused: Frame,
    blurred_left: Frame,
    blurred_right: Frame,
    blurred_top: Frame,
    blurred_bottom: Frame,
    orig_h_size: Size,
    orig_v_size: Size,
    orig_bottom_size: Size,
    full_size: Size,
    left_buffer: u32,
}

/// The five panels handed to [`OptimizedImage::from_parts`].
#[derive(Debug, Clone)]
pub struct Panels {
    pub focused: Frame,
    pub blurred_left: Frame,
    pub blurred_right: Frame,
    pub blurred_top: Frame,
    pub blurred_bottom: Frame,
}

/// Pre-shrink sizes and anchoring metadata handed to
/// [`OptimizedImage::from_parts`].
#[derive(Debug, Clone, Copy)]
pub struct Geometry {
    pub orig_h_size: Size,
    pub orig_v_size: Size,
    pub orig_bottom_size: Size,
    pub full_size: Size,
    pub left_buffer: u32,
}

impl OptimizedImage {
    /// Assemble a record from encoder output.
    ///
    /// # Panics
    /// If the parts break a record invariant; the encoder never produces
    /// such parts.
    pub fn from_parts(panels: Panels, geometry: Geometry) -> Self {
        let record = Self {
            focused: panels.focused,
            blurred_left: panels.blurred_left,
            blurred_right: panels.blurred_right,
            blurred_top: panels.blurred_top,
            blurred_bottom: panels.blurred_bottom,
            orig_h_size: geometry.orig_h_size,
            orig_v_size: geometry.orig_v_size,
            orig_bottom_size: geometry.orig_bottom_size,
            full_size: geometry.full_size,
            left_buffer: geometry.left_buffer,
        };
        if let Err(e) = record.validate() {
            panic!("invariant violated: encoder built an inconsistent record: {e}");
        }
        record
    }

    /// Full-resolution focus patch.
    pub fn focused(&self) -> &Frame {
        &self.focused
    }

    pub fn blurred_left(&self) -> &Frame {
        &self.blurred_left
    }

    pub fn blurred_right(&self) -> &Frame {
        &self.blurred_right
    }

    pub fn blurred_top(&self) -> &Frame {
        &self.blurred_top
    }

    pub fn blurred_bottom(&self) -> &Frame {
        &self.blurred_bottom
    }

    /// Size of the left and right strips before shrinking.
    pub fn orig_h_size(&self) -> Size {
        self.orig_h_size
    }

    /// Size of the top strip before shrinking.
    pub fn orig_v_size(&self) -> Size {
        self.orig_v_size
    }

    /// Size of the bottom strip before shrinking.
    pub fn orig_bottom_size(&self) -> Size {
        self.orig_bottom_size
    }

    /// Size of the source frame.
    pub fn full_size(&self) -> Size {
        self.full_size
    }

    /// Source column of the viewport's left edge.
    pub fn left_buffer(&self) -> u32 {
        self.left_buffer
    }

    /// Width of the viewport once the strips are restored. Saturates at
    /// `u32::MAX` for records that fail [`validate`](Self::validate).
    pub fn crop_width(&self) -> u32 {
        u32::try_from(self.crop_width_wide()).unwrap_or(u32::MAX)
    }

    fn crop_width_wide(&self) -> u64 {
        2 * u64::from(self.orig_h_size.w) + u64::from(self.focused.width())
    }

    /// The five panels in record order.
    pub fn panels(&self) -> [(&'static str, &Frame); 5] {
        [
            ("focused", &self.focused),
            ("blurred_left", &self.blurred_left),
            ("blurred_right", &self.blurred_right),
            ("blurred_top", &self.blurred_top),
            ("blurred_bottom", &self.blurred_bottom),
        ]
    }

    /// Total pixel bytes across all five panels.
    pub fn byte_size(&self) -> usize {
        self.panels().iter().map(|(_, p)| p.byte_len()).sum()
    }

    /// Check every record invariant.
    pub fn validate(&self) -> FoveaResult<()> {
        for (name, panel) in self.panels() {
            if panel.is_empty() {
                return Err(bad_record(name, "non-empty panel", panel.size()));
            }
        }
        for (name, size) in [
            ("orig_h_size", self.orig_h_size),
            ("orig_v_size", self.orig_v_size),
            ("orig_bottom_size", self.orig_bottom_size),
            ("full_size", self.full_size),
        ] {
            if size.is_empty() {
                return Err(bad_record(name, "strictly positive size", size));
            }
        }
        if self.left_buffer >= self.full_size.w {
            return Err(bad_record(
                "left_buffer",
                format!("less than frame width {}", self.full_size.w),
                self.left_buffer,
            ));
        }

        let focus = self.focused.size();
        if self.orig_v_size.w != focus.w || self.orig_bottom_size.w != focus.w {
            return Err(bad_record(
                "orig_v_size",
                format!("top and bottom strips {}px wide like the focused patch", focus.w),
                format!("{} / {}", self.orig_v_size, self.orig_bottom_size),
            ));
        }
        let stack =
            u64::from(self.orig_v_size.h) + u64::from(focus.h) + u64::from(self.orig_bottom_size.h);
        if stack != u64::from(self.full_size.h) || self.orig_h_size.h != self.full_size.h {
            return Err(bad_record(
                "orig_h_size",
                format!("strip heights summing to frame height {}", self.full_size.h),
                format!("stack {stack}, side strips {}", self.orig_h_size.h),
            ));
        }
        let crop = self.crop_width_wide();
        if crop > u64::from(self.full_size.w) {
            return Err(bad_record(
                "orig_h_size",
                format!("viewport no wider than frame width {}", self.full_size.w),
                crop,
            ));
        }
        Ok(())
    }

    /// Serialize to the JSON interchange format.
    pub fn to_json(&self) -> FoveaResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse and validate a JSON record.
    pub fn from_json(text: &str) -> FoveaResult<Self> {
        let repr: RecordRepr = serde_json::from_str(text)?;
        Self::try_from(repr)
    }

    pub fn to_writer(&self, writer: impl Write) -> FoveaResult<()> {
        Ok(serde_json::to_writer(writer, self)?)
    }

    pub fn from_reader(reader: impl Read) -> FoveaResult<Self> {
        let repr: RecordRepr = serde_json::from_reader(reader)?;
        Self::try_from(repr)
    }

    /// Write the record to `path` as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> FoveaResult<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)
            .map_err(|e| FoveaError::io("create record", e).with_path(path.display().to_string()))?;
        let mut writer = std::io::BufWriter::new(file);
        self.to_writer(&mut writer)?;
        writer
            .flush()
            .map_err(|e| FoveaError::io("flush record", e).with_path(path.display().to_string()))
    }

    /// Read and validate a JSON record from `path`.
    pub fn load(path: impl AsRef<Path>) -> FoveaResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| FoveaError::io("open record", e).with_path(path.display().to_string()))?;
        Self::from_reader(std::io::BufReader::new(file))
            .map_err(|e| e.with_context(format!("loading {}", path.display())))
    }
}

fn bad_record(field: &str, constraint: impl Into<String>, value: impl ToString) -> FoveaError {
    FoveaError::validation(field, constraint, value.to_string())
        .with_operation("validate record")
        .with_severity(ErrorSeverity::Critical)
}

#[derive(Serialize, Deserialize)]
struct PanelRepr {
    width: u32,
    height: u32,
    channels: u32,
    data: String,
}

impl From<&Frame> for PanelRepr {
    fn from(frame: &Frame) -> Self {
        Self {
            width: frame.width(),
            height: frame.height(),
            channels: CHANNELS as u32,
            data: STANDARD.encode(frame.as_bytes()),
        }
    }
}

impl PanelRepr {
    fn into_frame(self, name: &str) -> FoveaResult<Frame> {
        if self.channels as usize != CHANNELS {
            return Err(bad_record(name, format!("{CHANNELS} channels"), self.channels));
        }
        let bytes = STANDARD
            .decode(self.data.as_bytes())
            .map_err(|e| bad_record(name, "base64 pixel data", e))?;
        Frame::from_raw(self.width, self.height, bytes)
            .map_err(|e| bad_record(name, "pixel data matching its dimensions", e))
    }
}

#[derive(Serialize, Deserialize)]
struct RecordRepr {
    format: String,
    version: u32,
    focused: PanelRepr,
    blurred_left: PanelRepr,
    blurred_right: PanelRepr,
    blurred_top: PanelRepr,
    blurred_bottom: PanelRepr,
    orig_h_size: Size,
    orig_v_size: Size,
    orig_bottom_size: Size,
    full_size: Size,
    left_buffer: u32,
}

impl From<&OptimizedImage> for RecordRepr {
    fn from(r: &OptimizedImage) -> Self {
        Self {
            format: RECORD_FORMAT.to_string(),
            version: RECORD_VERSION,
            focused: (&r.focused).into(),
            blurred_left: (&r.blurred_left).into(),
            blurred_right: (&r.blurred_right).into(),
            blurred_top: (&r.blurred_top).into(),
            blurred_bottom: (&r.blurred_bottom).into(),
            orig_h_size: r.orig_h_size,
            orig_v_size: r.orig_v_size,
            orig_bottom_size: r.orig_bottom_size,
            full_size: r.full_size,
            left_buffer: r.left_buffer,
        }
    }
}

impl TryFrom<RecordRepr> for OptimizedImage {
    type Error = FoveaError;

    fn try_from(repr: RecordRepr) -> Result<Self, Self::Error> {
        if repr.format != RECORD_FORMAT {
            return Err(bad_record("format", RECORD_FORMAT, &repr.format));
        }
        if repr.version != RECORD_VERSION {
            return Err(bad_record("version", format!("version {RECORD_VERSION}"), repr.version)
                .with_recovery_suggestion("re-encode the frame with this version of fovea"));
        }
        let record = Self {
            focused: repr.focused.into_frame("focused")?,
            blurred_left: repr.blurred_left.into_frame("blurred_left")?,
            blurred_right: repr.blurred_right.into_frame("blurred_right")?,
            blurred_top: repr.blurred_top.into_frame("blurred_top")?,
            blurred_bottom: repr.blurred_bottom.into_frame("blurred_bottom")?,
            orig_h_size: repr.orig_h_size,
            orig_v_size: repr.orig_v_size,
            orig_bottom_size: repr.orig_bottom_size,
            full_size: repr.full_size,
            left_buffer: repr.left_buffer,
        };
        record.validate()?;
        Ok(record)
    }
}

impl Serialize for OptimizedImage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RecordRepr::from(self).serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_record() -> OptimizedImage {
        let px = |w, h, v| Frame::filled(Size::new(w, h), [v, v, v, 255]);
        OptimizedImage::from_parts(
            Panels {
                focused: px(4, 4, 200),
                blurred_left: px(1, 2, 10),
                blurred_right: px(1, 2, 20),
                blurred_top: px(1, 1, 30),
                blurred_bottom: px(1, 1, 40),
            },
            Geometry {
                orig_h_size: Size::new(5, 10),
                orig_v_size: Size::new(4, 3),
                orig_bottom_size: Size::new(4, 3),
                full_size: Size::new(40, 10),
                left_buffer: 38,
            },
        )
    }

    #[test]
    fn byte_size_sums_panels() {
        let r = tiny_record();
        assert_eq!(r.byte_size(), (16 + 2 + 2 + 1 + 1) * 4);
        assert_eq!(r.crop_width(), 14);
    }

    #[test]
    fn json_round_trip_keeps_every_field() {
        let r = tiny_record();
        let text = r.to_json().unwrap();
        assert!(text.contains(r#""format":"fovea-optimized-image""#));
        assert!(text.contains(r#""version":1"#));
        let back = OptimizedImage::from_json(&text).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn unknown_version_is_rejected() {
        let text = tiny_record().to_json().unwrap().replace(r#""version":1"#, r#""version":7"#);
        let err = OptimizedImage::from_json(&text).unwrap_err();
        assert!(err.to_string().contains("version"));
        assert_eq!(err.category(), "validation");
    }

    #[test]
    fn oversized_dimensions_are_rejected_without_overflow() {
        let good: serde_json::Value = serde_json::from_str(&tiny_record().to_json().unwrap()).unwrap();

        let mut tall = good.clone();
        tall["orig_bottom_size"]["h"] = serde_json::json!(u32::MAX);
        let err = OptimizedImage::from_json(&tall.to_string()).unwrap_err();
        assert_eq!(err.category(), "validation");

        // 3 + 4 + (u32::MAX - 6) wraps to 0 in u32 arithmetic
        let mut wrapping = good.clone();
        wrapping["orig_bottom_size"]["h"] = serde_json::json!(u32::MAX - 6);
        wrapping["full_size"]["h"] = serde_json::json!(1);
        assert!(OptimizedImage::from_json(&wrapping.to_string()).is_err());

        let mut wide = good;
        wide["orig_h_size"]["w"] = serde_json::json!(u32::MAX);
        let err = OptimizedImage::from_json(&wide.to_string()).unwrap_err();
        assert_eq!(err.category(), "validation");
        assert!(err.to_string().contains(&(2 * u64::from(u32::MAX) + 4).to_string()));
    }

    #[test]
    fn invalid_records_keep_their_category_and_severity() {
        use crate::error::HasSeverity;

        let text = tiny_record()
            .to_json()
            .unwrap()
            .replace(r#""left_buffer":38"#, r#""left_buffer":5000"#);
        let err = OptimizedImage::from_json(&text).unwrap_err();
        assert_eq!(err.category(), "validation");
        assert_eq!(err.severity(), ErrorSeverity::Critical);

        let err = OptimizedImage::from_reader(text.as_bytes()).unwrap_err();
        assert_eq!(err.category(), "validation");

        // malformed JSON is still a parser error
        assert_eq!(OptimizedImage::from_json("{").unwrap_err().category(), "external");
    }

    #[test]
    fn broken_invariants_are_rejected() {
        let text = tiny_record()
            .to_json()
            .unwrap()
            .replace(r#""left_buffer":38"#, r#""left_buffer":40"#);
        assert!(OptimizedImage::from_json(&text).is_err());

        let text = tiny_record()
            .to_json()
            .unwrap()
            .replace(r#""orig_v_size":{"w":4,"h":3}"#, r#""orig_v_size":{"w":4,"h":2}"#);
        assert!(OptimizedImage::from_json(&text).is_err());
    }

    #[test]
    fn truncated_pixels_are_rejected() {
        let mut value: serde_json::Value = serde_json::from_str(&tiny_record().to_json().unwrap()).unwrap();
        value["blurred_top"]["width"] = serde_json::json!(2);
        assert!(OptimizedImage::from_json(&value.to_string()).is_err());

        value["blurred_top"]["width"] = serde_json::json!(1);
        value["blurred_top"]["channels"] = serde_json::json!(3);
        assert!(OptimizedImage::from_json(&value.to_string()).is_err());
    }

    #[test]
    #[should_panic(expected = "invariant violated")]
    fn from_parts_panics_on_empty_panel() {
        let r = tiny_record();
        OptimizedImage::from_parts(
            Panels {
                focused: Frame::filled(Size::new(0, 4), [0; 4]),
                blurred_left: r.blurred_left().clone(),
                blurred_right: r.blurred_right().clone(),
                blurred_top: r.blurred_top().clone(),
                blurred_bottom: r.blurred_bottom().clone(),
            },
            Geometry {
                orig_h_size: r.orig_h_size(),
                orig_v_size: r.orig_v_size(),
                orig_bottom_size: r.orig_bottom_size(),
                full_size: r.full_size(),
                left_buffer: r.left_buffer(),
            },
        );
    }
}
