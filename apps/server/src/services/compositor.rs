//! Sticker sheet compositor.
//!
//! Trims transparent margins from one source image, scales it to the
//! layout's sticker height and pastes it, horizontally centred, at each of
//! the layout's y-offsets on an opaque white canvas.

use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use crate::error::{AppError, AppResult};
use crate::models::StickerLayout;
use crate::models::sticker::LayoutGeometry;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Where one sticker copy landed on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Encoded sheet plus its geometry.
#[derive(Debug, Clone)]
pub struct SheetImage {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub placements: Vec<Placement>,
}

/// Decode `source`, build the sheet for `layout` and encode it as PNG.
pub fn compose(source: &[u8], layout: StickerLayout) -> AppResult<SheetImage> {
    let decoded = image::load_from_memory(source)?.to_rgba8();
    let trimmed = trim_transparent(&decoded).ok_or_else(|| {
        AppError::InvalidInput("Source image is fully transparent".to_string())
    })?;

    let geom = layout.geometry();
    let sticker = fit_sticker(&trimmed, geom);
    let (canvas, placements) = render_sheet(&sticker, geom);

    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(canvas)
        .to_rgb8()
        .write_to(&mut buf, ImageFormat::Png)?;

    Ok(SheetImage {
        png: buf.into_inner(),
        width: geom.canvas_width,
        height: geom.canvas_height,
        placements,
    })
}

/// Crop to the bounding box of pixels with non-zero alpha.
/// Returns `None` when every pixel is transparent.
pub fn trim_transparent(img: &RgbaImage) -> Option<RgbaImage> {
    let (mut min_x, mut min_y) = (u32::MAX, u32::MAX);
    let (mut max_x, mut max_y) = (0u32, 0u32);
    let mut found = false;

    for (x, y, px) in img.enumerate_pixels() {
        if px[3] > 0 {
            found = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    if !found {
        return None;
    }

    Some(imageops::crop_imm(img, min_x, min_y, max_x - min_x + 1, max_y - min_y + 1).to_image())
}

/// Target size for a `width` x `height` image: the layout's sticker height,
/// unless that makes it wider than the canvas.
pub fn sticker_size(width: u32, height: u32, geom: &LayoutGeometry) -> (u32, u32) {
    let scaled_w = scale(width, geom.sticker_height, height);
    if scaled_w <= geom.canvas_width {
        (scaled_w, geom.sticker_height)
    } else {
        (geom.canvas_width, scale(height, geom.canvas_width, width))
    }
}

fn scale(value: u32, numerator: u32, denominator: u32) -> u32 {
    let scaled = (value as u64 * numerator as u64 + denominator as u64 / 2) / denominator as u64;
    scaled.max(1) as u32
}

fn fit_sticker(img: &RgbaImage, geom: &LayoutGeometry) -> RgbaImage {
    let (w, h) = sticker_size(img.width(), img.height(), geom);
    if (w, h) == img.dimensions() {
        return img.clone();
    }
    imageops::resize(img, w, h, FilterType::Lanczos3)
}

fn render_sheet(sticker: &RgbaImage, geom: &LayoutGeometry) -> (RgbaImage, Vec<Placement>) {
    let mut canvas = RgbaImage::from_pixel(geom.canvas_width, geom.canvas_height, WHITE);
    let x = (geom.canvas_width - sticker.width()) / 2;

    let placements = geom
        .y_offsets
        .iter()
        .map(|&y| {
            imageops::overlay(&mut canvas, sticker, x as i64, y as i64);
            Placement {
                x,
                y,
                width: sticker.width(),
                height: sticker.height(),
            }
        })
        .collect();

    (canvas, placements)
}
