//! In-memory RGBA images: decoding inputs, composing the atlas and encoding
//! it back out.

use std::io::{Read, Write};

use thiserror::Error;

const STRIDE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// An 8-bit RGBA image.
#[derive(Debug, Clone)]
pub(crate) struct Image {
    size: (u32, u32),
    data: Vec<u8>,
}

impl Image {
    pub fn new_rgba8<D: Into<Vec<u8>>>(size: (u32, u32), data: D) -> Self {
        let data = data.into();

        assert_eq!(
            data.len(),
            size.0 as usize * size.1 as usize * STRIDE,
            "RGBA8 data does not match image size"
        );

        Self { size, data }
    }

    pub fn new_empty_rgba8(size: (u32, u32)) -> Self {
        let data = vec![0; size.0 as usize * size.1 as usize * STRIDE];
        Self::new_rgba8(size, data)
    }

    /// Decodes a PNG of any 8 or 16 bit color type, converting it to RGBA8.
    pub fn decode_png<R: Read>(input: R) -> Result<Self, ImageError> {
        let mut decoder = png::Decoder::new(input);
        decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

        let (info, mut reader) = decoder.read_info()?;

        let mut raw = vec![0; info.buffer_size()];
        reader.next_frame(&mut raw)?;

        let size = (info.width, info.height);
        let pixel_count = size.0 as usize * size.1 as usize;

        let data = match info.color_type {
            png::ColorType::RGBA => raw,
            png::ColorType::RGB => expand(&raw, 3, pixel_count, |px| [px[0], px[1], px[2], 255]),
            png::ColorType::GrayscaleAlpha => {
                expand(&raw, 2, pixel_count, |px| [px[0], px[0], px[0], px[1]])
            }
            png::ColorType::Grayscale => {
                expand(&raw, 1, pixel_count, |px| [px[0], px[0], px[0], 255])
            }
            color_type => return Err(ImageError::UnsupportedColorType { color_type }),
        };

        Ok(Self::new_rgba8(size, data))
    }

    pub fn encode_png<W: Write>(&self, output: W) -> Result<(), ImageError> {
        let mut encoder = png::Encoder::new(output, self.size.0, self.size.1);
        encoder.set_color(png::ColorType::RGBA);
        encoder.set_depth(png::BitDepth::Eight);

        let mut output_writer = encoder.write_header()?;
        output_writer.write_image_data(&self.data)?;

        // On drop, output_writer will write the last chunk of the PNG file.
        Ok(())
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Copies `other` into this image with its top-left corner at `pos`.
    pub fn blit(&mut self, other: &Image, pos: (u32, u32)) {
        assert!(
            pos.0 + other.size.0 <= self.size.0 && pos.1 + other.size.1 <= self.size.1,
            "blit of {:?} at {:?} is outside of {:?}",
            other.size,
            pos,
            self.size
        );

        let other_row_bytes = other.size.0 as usize * STRIDE;
        if other_row_bytes == 0 {
            return;
        }

        for (other_y, other_row) in other.data.chunks_exact(other_row_bytes).enumerate() {
            let self_y = pos.1 as usize + other_y;
            let start = (pos.0 as usize + self.size.0 as usize * self_y) * STRIDE;

            self.data[start..start + other_row.len()].copy_from_slice(other_row);
        }
    }

    pub fn get_pixel(&self, pos: (u32, u32)) -> Pixel {
        let start = self.offset(pos);

        Pixel {
            r: self.data[start],
            g: self.data[start + 1],
            b: self.data[start + 2],
            a: self.data[start + 3],
        }
    }

    pub fn set_pixel(&mut self, pos: (u32, u32), pixel: Pixel) {
        let start = self.offset(pos);

        self.data[start] = pixel.r;
        self.data[start + 1] = pixel.g;
        self.data[start + 2] = pixel.b;
        self.data[start + 3] = pixel.a;
    }

    fn offset(&self, pos: (u32, u32)) -> usize {
        assert!(pos.0 < self.size.0);
        assert!(pos.1 < self.size.1);

        STRIDE * (pos.0 as usize + pos.1 as usize * self.size.0 as usize)
    }
}

fn expand<F>(raw: &[u8], channels: usize, pixel_count: usize, convert: F) -> Vec<u8>
where
    F: Fn(&[u8]) -> [u8; STRIDE],
{
    let mut data = Vec::with_capacity(pixel_count * STRIDE);
    for pixel in raw.chunks_exact(channels).take(pixel_count) {
        data.extend_from_slice(&convert(pixel));
    }

    data
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error(transparent)]
    Decode {
        #[from]
        source: png::DecodingError,
    },

    #[error(transparent)]
    Encode {
        #[from]
        source: png::EncodingError,
    },

    #[error("Images with color type {color_type:?} are not supported")]
    UnsupportedColorType { color_type: png::ColorType },
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn blit_zero() {
        let source = Image::new_empty_rgba8((17, 20));
        let mut target = Image::new_empty_rgba8((17, 20));

        target.blit(&source, (0, 0));
    }

    #[test]
    fn blit_corner() {
        let mut source = Image::new_empty_rgba8((4, 4));
        source.set_pixel((3, 3), Pixel::new(9, 9, 9, 255));
        let mut target = Image::new_empty_rgba8((8, 8));

        target.blit(&source, (4, 4));

        assert_eq!(target.get_pixel((7, 7)), Pixel::new(9, 9, 9, 255));
        assert_eq!(target.get_pixel((3, 3)), Pixel::new(0, 0, 0, 0));
    }

    #[test]
    fn blit_keeps_surroundings() {
        let mut target = Image::new_empty_rgba8((3, 3));
        target.set_pixel((0, 1), Pixel::new(1, 1, 1, 1));

        let source = Image::new_rgba8((2, 1), vec![5; 8]);
        target.blit(&source, (1, 1));

        assert_eq!(target.get_pixel((0, 1)), Pixel::new(1, 1, 1, 1));
        assert_eq!(target.get_pixel((1, 1)), Pixel::new(5, 5, 5, 5));
        assert_eq!(target.get_pixel((2, 1)), Pixel::new(5, 5, 5, 5));
        assert_eq!(target.get_pixel((1, 0)), Pixel::new(0, 0, 0, 0));
    }

    #[test]
    fn set_pixel() {
        let mut source = Image::new_empty_rgba8((3, 3));

        source.set_pixel((0, 0), Pixel::new(1, 2, 3, 4));
        assert_eq!(source.get_pixel((0, 0)), Pixel::new(1, 2, 3, 4));

        source.set_pixel((2, 2), Pixel::new(5, 6, 7, 8));
        assert_eq!(source.get_pixel((2, 2)), Pixel::new(5, 6, 7, 8));

        assert_eq!(&source.data[0..4], &[1, 2, 3, 4]);
        assert_eq!(&source.data[(source.data.len() - 4)..], &[5, 6, 7, 8]);
    }

    #[test]
    fn png_round_trip() {
        let mut image = Image::new_empty_rgba8((3, 2));
        image.set_pixel((1, 1), Pixel::new(10, 20, 30, 40));

        let mut encoded = Vec::new();
        image.encode_png(&mut encoded).unwrap();

        let decoded = Image::decode_png(encoded.as_slice()).unwrap();
        assert_eq!(decoded.size(), (3, 2));
        assert_eq!(decoded.get_pixel((1, 1)), Pixel::new(10, 20, 30, 40));
        assert_eq!(decoded.data, image.data);
    }

    #[test]
    fn rgb_gets_opaque_alpha() {
        let mut encoded = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut encoded, 2, 1);
            encoder.set_color(png::ColorType::RGB);
            encoder.set_depth(png::BitDepth::Eight);

            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[1, 2, 3, 4, 5, 6]).unwrap();
        }

        let decoded = Image::decode_png(encoded.as_slice()).unwrap();
        assert_eq!(decoded.get_pixel((0, 0)), Pixel::new(1, 2, 3, 255));
        assert_eq!(decoded.get_pixel((1, 0)), Pixel::new(4, 5, 6, 255));
    }
}
