use crate::backend::{BackendError, BackendResult};
use crate::config::QrSettings;
use image::{DynamicImage, Luma, Rgb, RgbImage, imageops};
use qrcode::QrCode;

/// Square RGB8 image of a QR symbol, rows packed without padding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrBitmap {
    pub edge: usize,
    pub pixels: Vec<u8>,
}

impl QrBitmap {
    pub const BYTES_PER_PIXEL: usize = 3;

    pub fn stride(&self) -> usize {
        self.edge * Self::BYTES_PER_PIXEL
    }
}

pub fn render(payload: &str, settings: &QrSettings) -> BackendResult<QrBitmap> {
    let code = QrCode::new(payload.as_bytes())
        .map_err(|e| BackendError::RenderError(e.to_string()))?;
    let total = code.width() as u32 + 2 * settings.quiet_zone;
    let scale = (settings.image_size / total).max(1);
    let edge = total * scale;

    let symbol = code
        .render::<Luma<u8>>()
        .quiet_zone(false)
        .module_dimensions(scale, scale)
        .build();

    let mut canvas = RgbImage::from_pixel(edge, edge, Rgb([u8::MAX; 3]));
    let offset = i64::from(settings.quiet_zone * scale);
    imageops::overlay(
        &mut canvas,
        &DynamicImage::ImageLuma8(symbol).to_rgb8(),
        offset,
        offset,
    );

    Ok(QrBitmap {
        edge: edge as usize,
        pixels: canvas.into_raw(),
    })
}
