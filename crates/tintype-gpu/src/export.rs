//! Snapshot encoding.

use std::io::Cursor;

use tintype_core::SourceImage;

use crate::error::EngineError;

/// Encode a frame as PNG bytes.
pub fn encode_png(frame: &SourceImage) -> Result<Vec<u8>, EngineError> {
    let mut bytes = Vec::new();
    frame
        .to_rgba_image()
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_decodes_back_to_same_pixels() {
        let mut frame = SourceImage::solid(3, 2, [10, 20, 30, 255]);
        frame.pixels[4] = [200, 100, 50, 128];
        let bytes = encode_png(&frame).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(SourceImage::from(decoded), frame);
    }
}
