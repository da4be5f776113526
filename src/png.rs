use crate::raster::Raster;
use png::{BitDepth, ColorType, Transformations};
use std::io::Cursor;

/// Decode a PNG byte stream into an RGB raster. Palette and sub-byte images
/// are expanded and 16-bit channels stripped to 8, so everything lands on one
/// of the four 8-bit color types below. Alpha, where present, is dropped.
pub fn parse_img(data: &[u8]) -> Result<Raster, String> {
    let mut decoder = png::Decoder::new(Cursor::new(data));
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder.read_info().map_err(|e| e.to_string())?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).map_err(|e| e.to_string())?;
    let bytes = &buf[..info.buffer_size()];

    let mut pixels = Vec::with_capacity(info.width as usize * info.height as usize * 3);
    match info.color_type {
        ColorType::Rgb => pixels.extend_from_slice(bytes),
        ColorType::Rgba => {
            for px in bytes.chunks_exact(4) {
                pixels.extend_from_slice(&px[..3]);
            }
        }
        ColorType::Grayscale => {
            for &g in bytes {
                pixels.extend_from_slice(&[g, g, g]);
            }
        }
        ColorType::GrayscaleAlpha => {
            for px in bytes.chunks_exact(2) {
                pixels.extend_from_slice(&[px[0], px[0], px[0]]);
            }
        }
        other => return Err(format!("Unsupported PNG color type after expansion: {other:?}")),
    }

    Ok(Raster::new(info.height, info.width, pixels))
}

/// Encode a raster as an 8-bit RGB PNG.
pub fn encode_img(img: &Raster) -> Result<Vec<u8>, String> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, img.width, img.height);
        encoder.set_color(ColorType::Rgb);
        encoder.set_depth(BitDepth::Eight);
        let mut writer = encoder.write_header().map_err(|e| e.to_string())?;
        writer
            .write_image_data(&img.pixels)
            .map_err(|e| e.to_string())?;
    }
    Ok(out)
}
