use crate::raster::Raster;
use thiserror::Error;

/// 2-byte big-endian height followed by 2-byte big-endian width.
pub const HEADER_LEN: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("dimension {value} does not fit the 2-byte header field")]
    DimensionOverflow { value: u32 },
    #[error("pixel buffer holds {actual} bytes but dimensions require {expected}")]
    PixelCountMismatch { expected: usize, actual: usize },
    #[error("input ends before the 4-byte dimension header ({len} bytes)")]
    TruncatedHeader { len: usize },
    #[error("pixel data truncated: dimensions require {needed} bytes, found {available}")]
    TruncatedPixelData { needed: usize, available: usize },
}

/// Encode a raster into the `.bin` layout: height and width as 16-bit
/// big-endian, then the RGB triples row-major. Output is always exactly
/// `4 + 3*height*width` bytes.
pub fn encode_img(img: &Raster) -> Result<Vec<u8>, CodecError> {
    let height = to_dim(img.height)?;
    let width = to_dim(img.width)?;
    let expected = height as usize * width as usize * 3;
    if img.pixels.len() != expected {
        return Err(CodecError::PixelCountMismatch {
            expected,
            actual: img.pixels.len(),
        });
    }

    let mut bytes = Vec::with_capacity(HEADER_LEN + expected);
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&img.pixels);
    Ok(bytes)
}

fn to_dim(value: u32) -> Result<u16, CodecError> {
    u16::try_from(value).map_err(|_| CodecError::DimensionOverflow { value })
}

/// Decode a `.bin` byte sequence back into a raster. Bytes past the declared
/// `3*height*width` pixel data are ignored.
pub fn parse_img(bytes: &[u8]) -> Result<Raster, CodecError> {
    if bytes.len() < HEADER_LEN {
        return Err(CodecError::TruncatedHeader { len: bytes.len() });
    }
    let height = u16::from_be_bytes([bytes[0], bytes[1]]) as usize;
    let width = u16::from_be_bytes([bytes[2], bytes[3]]) as usize;

    let needed = height * width * 3;
    let data = &bytes[HEADER_LEN..];
    if data.len() < needed {
        return Err(CodecError::TruncatedPixelData {
            needed,
            available: data.len(),
        });
    }

    Ok(Raster::new(
        height as u32,
        width as u32,
        data[..needed].to_vec(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_pixel_encodes_to_known_bytes() {
        let img = Raster::new(1, 1, vec![255, 0, 128]);
        let bytes = encode_img(&img).unwrap();
        assert_eq!(bytes, vec![0x00, 0x01, 0x00, 0x01, 0xFF, 0x00, 0x80]);
        assert_eq!(parse_img(&bytes).unwrap(), img);
    }

    #[test]
    fn all_black_2x3_layout() {
        let img = Raster::black(2, 3);
        let bytes = encode_img(&img).unwrap();
        assert_eq!(&bytes[..4], &[0x00, 0x02, 0x00, 0x03]);
        assert_eq!(&bytes[4..], &[0u8; 18]);
        assert_eq!(parse_img(&bytes).unwrap(), img);
    }

    #[test]
    fn round_trip_preserves_raster() {
        let pixels: Vec<u8> = (0..3 * 4 * 5).map(|i| (i * 7 % 256) as u8).collect();
        let img = Raster::new(4, 5, pixels);
        let back = parse_img(&encode_img(&img).unwrap()).unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn output_length_is_header_plus_pixels() {
        let img = Raster::black(3, 7);
        assert_eq!(encode_img(&img).unwrap().len(), 4 + 3 * 3 * 7);

        let empty = Raster::black(0, 9);
        assert_eq!(encode_img(&empty).unwrap().len(), 4);
    }

    #[test]
    fn header_fields_are_big_endian_dims() {
        let img = Raster::black(258, 300);
        let bytes = encode_img(&img).unwrap();
        assert_eq!(u16::from_be_bytes([bytes[0], bytes[1]]), 258);
        assert_eq!(u16::from_be_bytes([bytes[2], bytes[3]]), 300);
    }

    #[test]
    fn oversized_dimension_is_rejected() {
        let img = Raster::new(65536, 1, vec![]);
        assert_eq!(
            encode_img(&img),
            Err(CodecError::DimensionOverflow { value: 65536 })
        );
        let img = Raster::new(1, 70000, vec![]);
        assert_eq!(
            encode_img(&img),
            Err(CodecError::DimensionOverflow { value: 70000 })
        );
        let img = Raster::black(65535, 0);
        assert!(encode_img(&img).is_ok());
    }

    #[test]
    fn wrong_pixel_count_is_rejected() {
        let img = Raster::new(2, 2, vec![0; 11]);
        assert_eq!(
            encode_img(&img),
            Err(CodecError::PixelCountMismatch {
                expected: 12,
                actual: 11
            })
        );
    }

    #[test]
    fn short_header_is_rejected() {
        for len in 0..4 {
            assert_eq!(
                parse_img(&vec![0; len]),
                Err(CodecError::TruncatedHeader { len })
            );
        }
    }

    #[test]
    fn truncated_pixel_data_is_rejected() {
        let mut bytes = encode_img(&Raster::black(2, 3)).unwrap();
        bytes.pop();
        assert_eq!(
            parse_img(&bytes),
            Err(CodecError::TruncatedPixelData {
                needed: 18,
                available: 17
            })
        );
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let img = Raster::new(1, 2, vec![1, 2, 3, 4, 5, 6]);
        let mut bytes = encode_img(&img).unwrap();
        bytes.extend_from_slice(&[9, 9, 9, 9]);
        assert_eq!(parse_img(&bytes).unwrap(), img);
    }
}
