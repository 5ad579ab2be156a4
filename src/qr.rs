use std::io::Cursor;
use std::sync::Arc;

use axum::{extract::State, response::IntoResponse};
use image::{imageops, DynamicImage, ImageBuffer, ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};

use crate::error::AppError;
use crate::AppState;

/// Edge length of the served QR image in pixels
pub const QR_SIZE: u32 = 256;

/// `GET /` in upload mode: PNG QR code pointing at the upload page
pub async fn show_qrcode(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let url = state.config.upload_page_url();
    let png = encode_png(&url)?;
    Ok(([("content-type", "image/png")], png))
}

/// Encode `data` as a `QR_SIZE`×`QR_SIZE` PNG at medium error correction.
pub fn encode_png(data: &str) -> Result<Vec<u8>, AppError> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::M)
        .map_err(|e| AppError::Encoding(format!("QR encoding failed: {}", e)))?;

    let rendered = code
        .render::<Luma<u8>>()
        .max_dimensions(QR_SIZE, QR_SIZE)
        .build();

    // Centre the code on a white canvas so every response has the same size.
    let image = if rendered.width() < QR_SIZE && rendered.height() < QR_SIZE {
        let mut canvas = ImageBuffer::from_pixel(QR_SIZE, QR_SIZE, Luma([255u8]));
        let x = i64::from((QR_SIZE - rendered.width()) / 2);
        let y = i64::from((QR_SIZE - rendered.height()) / 2);
        imageops::overlay(&mut canvas, &rendered, x, y);
        canvas
    } else {
        rendered
    };

    let mut png = Vec::new();
    DynamicImage::ImageLuma8(image)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| AppError::Encoding(format!("PNG encoding failed: {}", e)))?;
    Ok(png)
}
