//! Graphics Support for EPDs
//!
//! The panel itself only knows black, white and red. Drawing happens in 8-bit
//! grayscale, the [encoder](crate::encoder) decides what turns red.

use crate::traits::GrayscaleSource;
use embedded_graphics_core::pixelcolor::{Gray8, GrayColor};
use embedded_graphics_core::prelude::*;

/// Display rotation, only 90° increments supported
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayRotation {
    /// No rotation
    #[default]
    Rotate0,
    /// Rotate by 90 degrees clockwise
    Rotate90,
    /// Rotate by 180 degrees clockwise
    Rotate180,
    /// Rotate 270 degrees clockwise
    Rotate270,
}

/// Error found during usage of GrayDisplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrayDisplayError {
    /// The provided buffer was too small
    BufferTooSmall,
}

/// Grayscale drawing surface for use with embedded-graphics
///
/// One byte per pixel in panel orientation, so the buffer needs `width * height`
/// bytes (384000 for the full panel). Rotation only changes how drawing
/// coordinates map onto the buffer.
///
/// Also a [GrayscaleSource], hand it to [encode_frame](crate::encoder::encode_frame)
/// or [display_image](crate::gdey075z08::Gdey075z08::display_image) when done.
pub struct GrayDisplay<'a> {
    width: u32,
    height: u32,
    buffer: &'a mut [u8],
    rotation: DisplayRotation,
}

impl<'a> GrayDisplay<'a> {
    /// You must allocate the buffer by yourself, it must be large enough to contain all pixels.
    ///
    /// The buffer keeps its content, call `clear` for a defined start.
    pub fn new(width: u32, height: u32, buffer: &'a mut [u8]) -> Result<Self, GrayDisplayError> {
        if (width as usize * height as usize) > buffer.len() {
            return Err(GrayDisplayError::BufferTooSmall);
        }
        Ok(GrayDisplay {
            width,
            height,
            buffer,
            rotation: DisplayRotation::default(),
        })
    }

    fn buffer_size(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// get internal buffer to use it
    pub fn buffer(&self) -> &[u8] {
        &self.buffer[..self.buffer_size()]
    }

    /// Set the display rotation.
    ///
    /// This only concerns future drawing made to it. Anything aready drawn
    /// stays as it is in the buffer.
    pub fn set_rotation(&mut self, rotation: DisplayRotation) {
        self.rotation = rotation;
    }

    /// Get current rotation
    pub fn rotation(&self) -> DisplayRotation {
        self.rotation
    }

    /// Set a specific pixel color on this display
    ///
    /// Pixels outside of the display are ignored.
    pub fn set_pixel(&mut self, pixel: Pixel<Gray8>) {
        let Pixel(point, color) = pixel;
        // i64 so mirroring coordinates near i32::MIN can't overflow
        let (width, height) = (i64::from(self.width), i64::from(self.height));
        let (px, py) = (i64::from(point.x), i64::from(point.y));

        // final coordinates
        let (x, y) = match self.rotation {
            DisplayRotation::Rotate0 => (px, py),
            DisplayRotation::Rotate90 => (width - 1 - py, px),
            DisplayRotation::Rotate180 => (width - 1 - px, height - 1 - py),
            DisplayRotation::Rotate270 => (py, height - 1 - px),
        };

        if x < 0 || x >= width || y < 0 || y >= height {
            return;
        }

        self.buffer[y as usize * self.width as usize + x as usize] = color.luma();
    }
}

/// For use with embedded_grahics
impl DrawTarget for GrayDisplay<'_> {
    type Color = Gray8;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for pixel in pixels {
            self.set_pixel(pixel);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let size = self.buffer_size();
        self.buffer[..size].fill(color.luma());
        Ok(())
    }
}

/// For use with embedded_grahics
impl OriginDimensions for GrayDisplay<'_> {
    fn size(&self) -> Size {
        match self.rotation {
            DisplayRotation::Rotate0 | DisplayRotation::Rotate180 => {
                Size::new(self.width, self.height)
            }
            DisplayRotation::Rotate90 | DisplayRotation::Rotate270 => {
                Size::new(self.height, self.width)
            }
        }
    }
}

impl GrayscaleSource for GrayDisplay<'_> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn luma(&self, x: u32, y: u32) -> u8 {
        self.buffer[y as usize * self.width as usize + x as usize]
    }
}
