//! Chart snapshot capture.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};

use crate::error::ExportError;

use super::chart::ChartSurface;
use super::{ExportArtifact, ExportKind};

/// Encode an RGBA frame as PNG bytes
pub fn encode_png(frame: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    frame.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Capture whatever the chart surface currently shows.
///
/// Fails with [`ExportError::ChartNotReady`] if the surface has not been laid
/// out or has nothing drawn on it.
pub fn capture_chart(surface: &ChartSurface) -> Result<Vec<u8>, ExportError> {
    let frame = surface.frame().ok_or(ExportError::ChartNotReady)?;
    encode_png(frame)
}

/// Capture the chart and wrap it for hand-off
pub fn export_chart(surface: &ChartSurface, file_name: &str) -> Result<ExportArtifact, ExportError> {
    let bytes = capture_chart(surface)?;
    if let Some(viewport) = surface.viewport() {
        log::debug!(
            "Chart captured: {}x{} px, {} bytes",
            viewport.width_px,
            viewport.height_px,
            bytes.len()
        );
    }
    Ok(ExportArtifact::new(ExportKind::Chart, file_name, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartParameters;

    #[test]
    fn test_unmounted_surface_is_not_ready() {
        let surface = ChartSurface::new(ChartParameters::default());
        assert!(matches!(capture_chart(&surface), Err(ExportError::ChartNotReady)));
    }

    #[test]
    fn test_png_round_trip_dimensions() {
        let frame = RgbaImage::from_pixel(12, 7, image::Rgba([1, 2, 3, 255]));
        let bytes = encode_png(&frame).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (12, 7));
    }
}
