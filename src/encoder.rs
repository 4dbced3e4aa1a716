//! Turns grayscale images into the panel's black/white and red bitplanes
//!
//! Both planes use one bit per pixel, 8 pixels per byte, rows from top to bottom.
//! The most significant bit is the leftmost pixel of its group, so pixel (x, y) is
//! bit `0x80 >> (x % 8)` of byte `y * width / 8 + x / 8`.
//!
//! - black/white plane: starts as all `0xFF`, a cleared bit is a black pixel
//! - red plane: starts as all `0x00`, a set bit is a red pixel

use core::fmt::{Display, Formatter};

use bit_field::BitField;

#[cfg(feature = "alloc")]
use alloc::{vec, vec::Vec};

use crate::color::PixelClass;
use crate::config::RedBounds;
use crate::traits::GrayscaleSource;

/// Bytes needed for one bitplane of `width` x `height` pixels
pub const fn buffer_len(width: u32, height: u32) -> usize {
    (width as usize * height as usize + 7) / 8
}

/// Reasons an image can't be encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodeError {
    /// The image doesn't have the size of the frame. It is never cropped or scaled.
    DimensionMismatch {
        /// (width, height) of the frame
        expected: (u32, u32),
        /// (width, height) of the image
        actual: (u32, u32),
    },
    /// Rows have to fill whole bytes
    UnalignedWidth(u32),
    /// A buffer doesn't fit the frame
    BufferSizeMismatch {
        /// Needed bytes
        expected: usize,
        /// Given bytes
        actual: usize,
    },
}

impl Display for EncodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::DimensionMismatch { expected, actual } => write!(
                f,
                "image is {}x{}, the frame is {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            Self::UnalignedWidth(width) => {
                write!(f, "frame width {width} is not a multiple of 8")
            }
            Self::BufferSizeMismatch { expected, actual } => {
                write!(f, "buffer has {actual} bytes, expected {expected}")
            }
        }
    }
}

/// A borrowed 8-bit grayscale image, one byte per pixel, row-major
#[derive(Debug, Clone, Copy)]
pub struct GrayImage<'a> {
    width: u32,
    height: u32,
    pixels: &'a [u8],
}

impl<'a> GrayImage<'a> {
    /// `pixels` needs to hold exactly `width * height` bytes
    pub fn new(width: u32, height: u32, pixels: &'a [u8]) -> Result<Self, EncodeError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(EncodeError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(GrayImage {
            width,
            height,
            pixels,
        })
    }

    /// The raw pixels
    pub fn pixels(&self) -> &'a [u8] {
        self.pixels
    }
}

impl GrayscaleSource for GrayImage<'_> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn luma(&self, x: u32, y: u32) -> u8 {
        self.pixels[y as usize * self.width as usize + x as usize]
    }
}

fn check_frame<S: GrayscaleSource + ?Sized>(
    source: &S,
    width: u32,
    height: u32,
) -> Result<(), EncodeError> {
    let actual = (source.width(), source.height());
    if actual != (width, height) {
        return Err(EncodeError::DimensionMismatch {
            expected: (width, height),
            actual,
        });
    }
    if width % 8 != 0 {
        return Err(EncodeError::UnalignedWidth(width));
    }
    Ok(())
}

/// Encodes `source` into caller provided planes
///
/// Both planes need [buffer_len] bytes. They are completely overwritten, their
/// previous content doesn't matter. On error nothing is written.
pub fn encode_frame_into<S: GrayscaleSource + ?Sized>(
    source: &S,
    bounds: RedBounds,
    width: u32,
    height: u32,
    white: &mut [u8],
    red: &mut [u8],
) -> Result<(), EncodeError> {
    check_frame(source, width, height)?;
    let expected = buffer_len(width, height);
    for actual in [white.len(), red.len()] {
        if actual != expected {
            return Err(EncodeError::BufferSizeMismatch { expected, actual });
        }
    }

    let line_bytes = width as usize / 8;
    for y in 0..height {
        for group in 0..line_bytes {
            let mut white_byte = PixelClass::White.white_byte();
            let mut red_byte = PixelClass::White.red_byte();
            for offset in 0..8 {
                let x = (group * 8 + offset) as u32;
                let bit = 7 - offset;
                match bounds.classify(source.luma(x, y)) {
                    PixelClass::Black => {
                        white_byte.set_bit(bit, false);
                    }
                    PixelClass::Red => {
                        red_byte.set_bit(bit, true);
                    }
                    PixelClass::White => {}
                }
            }
            let index = y as usize * line_bytes + group;
            white[index] = white_byte;
            red[index] = red_byte;
        }
    }
    Ok(())
}

/// Reads the class of pixel (x, y) back from both planes
///
/// Returns `None` if the pixel is outside of the planes.
pub fn decode_pixel(white: &[u8], red: &[u8], width: u32, x: u32, y: u32) -> Option<PixelClass> {
    if x >= width {
        return None;
    }
    let index = y as usize * (width as usize / 8) + x as usize / 8;
    let bit = 7 - (x % 8) as usize;
    let white = white.get(index)?.get_bit(bit);
    let red = red.get(index)?.get_bit(bit);
    Some(PixelClass::from_bits(white, red))
}

/// An owned pair of bitplanes, ready for
/// [render_frame](crate::gdey075z08::Gdey075z08::render_frame)
#[cfg(feature = "alloc")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitplanes {
    width: u32,
    white: Vec<u8>,
    red: Vec<u8>,
}

#[cfg(feature = "alloc")]
impl Bitplanes {
    /// The black/white plane
    pub fn white(&self) -> &[u8] {
        &self.white
    }

    /// The red plane
    pub fn red(&self) -> &[u8] {
        &self.red
    }

    /// Class of pixel (x, y)
    pub fn pixel(&self, x: u32, y: u32) -> Option<PixelClass> {
        decode_pixel(&self.white, &self.red, self.width, x, y)
    }

    /// Both planes, black/white first
    pub fn into_parts(self) -> (Vec<u8>, Vec<u8>) {
        (self.white, self.red)
    }
}

/// Encodes `source` into a fresh pair of planes
///
/// The source must be exactly `width` x `height`, see [encode_frame_into].
#[cfg(feature = "alloc")]
pub fn encode_frame<S: GrayscaleSource + ?Sized>(
    source: &S,
    bounds: RedBounds,
    width: u32,
    height: u32,
) -> Result<Bitplanes, EncodeError> {
    // before allocating a frame for nothing
    check_frame(source, width, height)?;

    let len = buffer_len(width, height);
    let mut white = vec![PixelClass::White.white_byte(); len];
    let mut red = vec![PixelClass::White.red_byte(); len];
    encode_frame_into(source, bounds, width, height, &mut white, &mut red)?;
    Ok(Bitplanes { width, white, red })
}
