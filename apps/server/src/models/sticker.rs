//! Sticker sheet and upload DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fixed geometry of one sheet layout, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutGeometry {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Height every sticker is resized to.
    pub sticker_height: u32,
    /// Top edge of each sticker copy.
    pub y_offsets: &'static [u32],
}

// 6x8 inch sheet at 300 dpi.
const TWO_UP: LayoutGeometry = LayoutGeometry {
    canvas_width: 1800,
    canvas_height: 2400,
    sticker_height: 1100,
    y_offsets: &[66, 1234],
};

const THREE_UP: LayoutGeometry = LayoutGeometry {
    canvas_width: 1800,
    canvas_height: 2400,
    sticker_height: 740,
    y_offsets: &[50, 830, 1610],
};

/// Sheet layout choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum StickerLayout {
    #[serde(rename = "two_up", alias = "2up", alias = "2")]
    TwoUp,
    #[serde(rename = "three_up", alias = "3up", alias = "3")]
    ThreeUp,
}

impl StickerLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TwoUp => "two_up",
            Self::ThreeUp => "three_up",
        }
    }

    pub fn geometry(&self) -> &'static LayoutGeometry {
        match self {
            Self::TwoUp => &TWO_UP,
            Self::ThreeUp => &THREE_UP,
        }
    }
}

impl std::fmt::Display for StickerLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request to generate a sticker sheet.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateStickerSheetRequest {
    /// HTTP(S) URL of the source image.
    pub image_url: String,
    pub layout: StickerLayout,
}

/// Generated sticker sheet.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StickerSheetResponse {
    pub success: bool,
    /// Public URL of the stored PNG.
    pub url: String,
    /// Object key in the blob store.
    pub key: String,
    pub layout: StickerLayout,
    pub width: u32,
    pub height: u32,
}

/// Multipart form accepted by the upload endpoint (documentation only).
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    /// png, jpg, jpeg, gif or webp.
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// Stored upload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub success: bool,
    pub url: String,
    pub key: String,
    /// Size in bytes.
    pub size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_aliases() {
        for raw in [r#""two_up""#, r#""2up""#, r#""2""#] {
            let layout: StickerLayout = serde_json::from_str(raw).unwrap();
            assert_eq!(layout, StickerLayout::TwoUp);
        }
        let layout: StickerLayout = serde_json::from_str(r#""3up""#).unwrap();
        assert_eq!(layout, StickerLayout::ThreeUp);
        assert!(serde_json::from_str::<StickerLayout>(r#""4up""#).is_err());
    }

    #[test]
    fn test_layouts_fit_on_canvas() {
        for layout in [StickerLayout::TwoUp, StickerLayout::ThreeUp] {
            let geom = layout.geometry();
            for &y in geom.y_offsets {
                assert!(y + geom.sticker_height <= geom.canvas_height, "{layout}");
            }
            // Copies never overlap.
            for pair in geom.y_offsets.windows(2) {
                assert!(pair[0] + geom.sticker_height <= pair[1], "{layout}");
            }
        }
        assert_eq!(StickerLayout::TwoUp.geometry().y_offsets.len(), 2);
        assert_eq!(StickerLayout::ThreeUp.geometry().y_offsets.len(), 3);
    }
}
